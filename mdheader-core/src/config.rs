//! Configuration for header generation.
//!
//! Maps directly to `mdheader.toml`:
//!
//! ```toml
//! author = "Ada"
//! language = "english"
//!
//! [openai]
//! api_key = "sk-..."
//! base_url = "https://api.openai.com/v1"
//! model = "gpt-3.5-turbo"
//!
//! [description]
//! max_length = 50
//!
//! [categories]
//! max_count = 3
//!
//! [tags]
//! max_count = 5
//! ```

use serde::{Deserialize, Serialize};

use crate::error::HeaderError;

/// Environment variables consulted for the API key, in order.
pub const API_KEY_ENV_VARS: &[&str] = &["MDHEADER_API_KEY", "OPENAI_API_KEY"];

/// Top-level configuration, loadable from TOML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Author written into every header.
    #[serde(default)]
    pub author: String,
    /// Prompt language key: `english`, `chinese` or `japanese`.
    #[serde(default = "default_language")]
    pub language: String,
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Completion endpoint settings.
    #[serde(default)]
    pub openai: OpenAiConfig,
    /// Description limits.
    #[serde(default)]
    pub description: DescriptionConfig,
    /// Category limits.
    #[serde(default)]
    pub categories: CategoryConfig,
    /// Tag limits.
    #[serde(default)]
    pub tags: TagConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            author: String::new(),
            language: default_language(),
            general: GeneralConfig::default(),
            openai: OpenAiConfig::default(),
            description: DescriptionConfig::default(),
            categories: CategoryConfig::default(),
            tags: TagConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `HeaderError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| HeaderError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Fill a missing API key from the environment.
    ///
    /// A key already present in the file wins.
    #[must_use]
    pub fn with_env_api_key(self) -> Self {
        self.with_api_key_from(|name| std::env::var(name).ok())
    }

    fn with_api_key_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if self.openai.api_key.as_deref().is_none_or(|k| k.trim().is_empty()) {
            self.openai.api_key = API_KEY_ENV_VARS
                .iter()
                .find_map(|name| lookup(name).filter(|v| !v.trim().is_empty()));
        }
        self
    }

    /// The API key, or an error when none is configured.
    ///
    /// # Errors
    /// Returns `HeaderError::Config` if the key is missing or blank.
    pub fn api_key(&self) -> crate::error::Result<&str> {
        self.openai
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                HeaderError::Config("Please configure OpenAI API Key in settings".into())
            })
    }

    /// Description length asked of the model; `0` means the default.
    #[must_use]
    pub fn description_max_length(&self) -> u32 {
        nonzero_or(self.description.max_length, default_max_length())
    }

    /// Number of categories asked of the model; `0` means the default.
    #[must_use]
    pub fn category_count(&self) -> u32 {
        nonzero_or(self.categories.max_count, default_category_count())
    }

    /// Number of tags asked of the model; `0` means the default.
    #[must_use]
    pub fn tag_count(&self) -> u32 {
        nonzero_or(self.tags.max_count, default_tag_count())
    }

    /// Check the settings needed before any work starts.
    ///
    /// # Errors
    /// Returns `HeaderError::Config` when the API key or base URL is unusable.
    pub fn validate(&self) -> crate::error::Result<()> {
        self.api_key()?;
        if self.openai.base_url.trim().is_empty() {
            return Err(HeaderError::Config("openai.base_url must not be empty".into()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General process settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// OpenAI-compatible endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// Bearer token. Required; may come from the environment instead.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL; `/chat/completions` is appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Description length limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptionConfig {
    /// Maximum characters asked of the model.
    #[serde(default = "default_max_length")]
    pub max_length: u32,
}

impl Default for DescriptionConfig {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
        }
    }
}

/// How many categories to ask for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Number of categories requested.
    #[serde(default = "default_category_count")]
    pub max_count: u32,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            max_count: default_category_count(),
        }
    }
}

/// How many tags to ask for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagConfig {
    /// Number of tags requested.
    #[serde(default = "default_tag_count")]
    pub max_count: u32,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            max_count: default_tag_count(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

fn default_language() -> String {
    "english".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}
fn default_timeout_ms() -> u64 {
    60_000
}
fn default_max_length() -> u32 {
    50
}
fn default_category_count() -> u32 {
    3
}
fn default_tag_count() -> u32 {
    5
}

fn nonzero_or(value: u32, fallback: u32) -> u32 {
    if value == 0 { fallback } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = GeneratorConfig::from_toml("").expect("should parse");
        assert_eq!(config.author, "");
        assert_eq!(config.language, "english");
        assert_eq!(config.openai.base_url, "https://api.openai.com/v1");
        assert_eq!(config.openai.model, "gpt-3.5-turbo");
        assert_eq!(config.description.max_length, 50);
        assert_eq!(config.categories.max_count, 3);
        assert_eq!(config.tags.max_count, 5);
        assert!(config.openai.api_key.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = GeneratorConfig::from_toml(
            r#"
            author = "Ada"
            language = "japanese"

            [openai]
            api_key = "sk-test"

            [tags]
            max_count = 8
            "#,
        )
        .expect("should parse");
        assert_eq!(config.author, "Ada");
        assert_eq!(config.language, "japanese");
        assert_eq!(config.openai.model, "gpt-3.5-turbo");
        assert_eq!(config.tags.max_count, 8);
        assert_eq!(config.categories.max_count, 3);
        assert_eq!(config.api_key().expect("key"), "sk-test");
    }

    #[test]
    fn default_matches_empty_file() {
        let config = GeneratorConfig::default();
        assert_eq!(config.language, "english");
        assert_eq!(config.tags.max_count, 5);
        assert_eq!(config.openai.timeout_ms, 60_000);
    }

    #[test]
    fn empty_tags_section_keeps_tag_default() {
        let config = GeneratorConfig::from_toml("[tags]\n").expect("parse");
        assert_eq!(config.tags.max_count, 5);
    }

    #[test]
    fn zero_limits_fall_back_to_defaults() {
        let config = GeneratorConfig::from_toml(
            "[description]\nmax_length = 0\n[categories]\nmax_count = 0\n[tags]\nmax_count = 0\n",
        )
        .expect("parse");
        assert_eq!(config.description_max_length(), 50);
        assert_eq!(config.category_count(), 3);
        assert_eq!(config.tag_count(), 5);

        let config = GeneratorConfig::from_toml("[description]\nmax_length = 120\n[tags]\nmax_count = 1\n")
            .expect("parse");
        assert_eq!(config.description_max_length(), 120);
        assert_eq!(config.tag_count(), 1);
    }

    #[test]
    fn missing_api_key_fails_validation() {
        let config = GeneratorConfig::default();
        assert!(matches!(config.validate(), Err(HeaderError::Config(_))));
    }

    #[test]
    fn blank_api_key_fails_validation() {
        let config = GeneratorConfig::from_toml("[openai]\napi_key = \"  \"").expect("parse");
        assert!(config.validate().is_err());
    }

    #[test]
    fn env_key_fills_gap_in_order() {
        let config = GeneratorConfig::default().with_api_key_from(|name| match name {
            "OPENAI_API_KEY" => Some("from-openai".into()),
            _ => None,
        });
        assert_eq!(config.api_key().expect("key"), "from-openai");

        let config = GeneratorConfig::default().with_api_key_from(|_| Some("first".into()));
        assert_eq!(config.api_key().expect("key"), "first");
    }

    #[test]
    fn file_key_beats_env() {
        let config = GeneratorConfig::from_toml("[openai]\napi_key = \"file\"")
            .expect("parse")
            .with_api_key_from(|_| Some("env".into()));
        assert_eq!(config.api_key().expect("key"), "file");
    }

    #[test]
    fn invalid_toml_is_config_error() {
        assert!(matches!(
            GeneratorConfig::from_toml("language = ["),
            Err(HeaderError::Config(_))
        ));
    }
}
