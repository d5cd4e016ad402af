//! Prompt templates for front-matter generation.
//!
//! One static instruction per supported language, each asking the model for
//! a JSON object with `description`, `categories` and `tags`. The body of the
//! post follows the instruction after a single newline.

use std::fmt;
use std::str::FromStr;

use tracing::warn;

/// English instruction.
pub const ENGLISH_TEMPLATE: &str = r#"Please analyze the following blog content and generate:
1. A brief description (maximum {max_length} characters)
2. {max_categories} relevant categories
3. {max_tags} relevant tags

Please return in the following JSON format:
{
    "description": "brief description text",
    "categories": ["category1", "category2", ...],
    "tags": ["tag1", "tag2", ...]
}

Blog content:"#;

/// Simplified Chinese instruction.
pub const CHINESE_TEMPLATE: &str = r#"请分析以下博客内容并生成：
1. 一个简短的描述（不超过{max_length}个字符）
2. {max_categories}个相关的分类
3. {max_tags}个相关的标签

请按照以下JSON格式返回：
{
    "description": "描述文本",
    "categories": ["分类1", "分类2", ...],
    "tags": ["标签1", "标签2", ...]
}

博客内容："#;

/// Japanese instruction.
pub const JAPANESE_TEMPLATE: &str = r#"以下のブログコンテンツを分析し、生成してください：
1. 簡単な説明（最大{max_length}文字）
2. {max_categories}個の関連カテゴリー
3. {max_tags}個の関連タグ

以下のJSON形式で返してください：
{
    "description": "説明文",
    "categories": ["カテゴリー1", "カテゴリー2", ...],
    "tags": ["タグ1", "タグ2", ...]
}

ブログ内容："#;

/// Simple template interpolation for prompts.
///
/// Replaces `{key}` with the corresponding value.
#[must_use]
pub fn render_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{key}}}"), value);
    }
    result
}

/// Languages with a built-in instruction template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    /// English (the fallback).
    #[default]
    English,
    /// Simplified Chinese.
    Chinese,
    /// Japanese.
    Japanese,
}

impl Language {
    /// All supported languages.
    #[must_use]
    pub fn all() -> &'static [Language] {
        &[Self::English, Self::Chinese, Self::Japanese]
    }

    /// Configuration key for this language.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Chinese => "chinese",
            Self::Japanese => "japanese",
        }
    }

    /// The instruction template, with `{max_length}`, `{max_categories}`
    /// and `{max_tags}` placeholders.
    #[must_use]
    pub fn template(self) -> &'static str {
        match self {
            Self::English => ENGLISH_TEMPLATE,
            Self::Chinese => CHINESE_TEMPLATE,
            Self::Japanese => JAPANESE_TEMPLATE,
        }
    }

    /// Resolve a configured key, falling back to English for anything unknown.
    #[must_use]
    pub fn from_config_key(key: &str) -> Self {
        key.parse().unwrap_or_else(|err| {
            warn!("{err}; falling back to english");
            Self::English
        })
    }

    /// Render the instruction for the given limits.
    #[must_use]
    pub fn instruction(self, limits: &PromptLimits) -> String {
        render_template(
            self.template(),
            &[
                ("max_length", &limits.max_length.to_string()),
                ("max_categories", &limits.max_categories.to_string()),
                ("max_tags", &limits.max_tags.to_string()),
            ],
        )
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" => Ok(Self::English),
            "chinese" => Ok(Self::Chinese),
            "japanese" => Ok(Self::Japanese),
            _ => Err(format!("unsupported language: '{s}'")),
        }
    }
}

/// What the prompt asks the model to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptLimits {
    /// Maximum description length in characters.
    pub max_length: u32,
    /// Number of categories.
    pub max_categories: u32,
    /// Number of tags.
    pub max_tags: u32,
}

impl Default for PromptLimits {
    fn default() -> Self {
        Self {
            max_length: 50,
            max_categories: 3,
            max_tags: 5,
        }
    }
}

/// Full prompt: instruction, a newline, then the post body.
#[must_use]
pub fn build_prompt(language: Language, limits: &PromptLimits, body: &str) -> String {
    let mut prompt = language.instruction(limits);
    prompt.push('\n');
    prompt.push_str(body);
    prompt
}
