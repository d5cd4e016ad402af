//! LLM Client: a single chat-completion call against an OpenAI-compatible API.

use std::time::{Duration, Instant};

use mdheader_core::config::GeneratorConfig;
use mdheader_core::tokens::estimate_reply_tokens;
use mdheader_core::BlogMetadata;
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::error::LlmError;
use crate::prompt::{build_prompt, Language, PromptLimits};
use crate::response::parse_metadata;
use crate::types::{
    ChatCompletionBody, ChatCompletionReply, ChatMessage, CompletionRequest, CompletionResponse,
};

/// Settings for [`LlmClient::generate_metadata`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataOptions {
    /// Prompt language.
    pub language: Language,
    /// Requested description length and list sizes.
    pub limits: PromptLimits,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl MetadataOptions {
    /// Options from configuration; an unknown language falls back to English.
    #[must_use]
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            language: Language::from_config_key(&config.language),
            limits: PromptLimits {
                max_length: config.description_max_length(),
                max_categories: config.category_count(),
                max_tags: config.tag_count(),
            },
            timeout_ms: config.openai.timeout_ms,
        }
    }
}

/// Client for an OpenAI-compatible `chat/completions` endpoint.
///
/// Every call is a single attempt: no retry, no streaming.
pub struct LlmClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl LlmClient {
    /// Create a new LLM client.
    #[must_use]
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigError`] when no API key is configured.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, LlmError> {
        let api_key = config
            .api_key()
            .map_err(|e| LlmError::ConfigError(e.to_string()))?;
        Ok(Self::new(
            config.openai.base_url.clone(),
            api_key,
            config.openai.model.clone(),
        ))
    }

    /// Model identifier sent with each request.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Send one completion request and return the first choice's text.
    ///
    /// A reply with no choices or no content yields an empty `text`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout, or a non-success status.
    pub async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let url = self.endpoint();
        let body = ChatCompletionBody {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        debug!(
            url = %url,
            model = %self.model,
            prompt_chars = request.prompt.chars().count(),
            max_tokens = request.max_tokens,
            "sending completion request"
        );

        let start = Instant::now();
        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .timeout(Duration::from_millis(request.timeout_ms))
            .send()
            .await
            .map_err(|e| transport_error(e, request.timeout_ms))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "completion endpoint returned an error");
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatCompletionReply = resp.json().await.map_err(|e| {
            if e.is_decode() {
                LlmError::RequestFailed(format!("invalid completion payload: {e}"))
            } else {
                transport_error(e, request.timeout_ms)
            }
        })?;
        let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        let text = reply.first_text().trim().to_string();
        let tokens_generated = reply.usage.map_or(0, |u| u.completion_tokens);
        debug!(latency_ms, tokens_generated, reply_chars = text.len(), "completion received");

        Ok(CompletionResponse {
            text,
            tokens_generated,
            latency_ms,
            model: self.model.clone(),
        })
    }

    /// Ask the model for a post's description, categories and tags.
    ///
    /// # Errors
    ///
    /// Returns the request error, or [`LlmError::ParseError`] if the reply
    /// is not the expected JSON object.
    pub async fn generate_metadata(
        &self,
        body: &str,
        options: &MetadataOptions,
    ) -> Result<BlogMetadata, LlmError> {
        let prompt = build_prompt(options.language, &options.limits, body);
        let max_tokens = estimate_reply_tokens(
            options.limits.max_length,
            options.limits.max_categories,
            options.limits.max_tags,
        );
        let request = CompletionRequest::new(prompt, max_tokens).with_timeout(options.timeout_ms);

        info!(language = %options.language, max_tokens, "generating metadata");
        let response = self.complete(&request).await?;
        parse_metadata(&response.text)
    }
}

fn transport_error(err: reqwest::Error, timeout_ms: u64) -> LlmError {
    if err.is_timeout() {
        warn!("completion request timed out after {timeout_ms}ms");
        LlmError::Timeout(timeout_ms)
    } else {
        warn!("completion request failed: {err}");
        LlmError::from(err)
    }
}
