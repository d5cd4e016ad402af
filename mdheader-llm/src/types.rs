//! Core types for completion requests and responses.

use serde::{Deserialize, Serialize};

/// Sampling temperature used for metadata generation.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// A request to the LLM.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Fully rendered prompt, sent as the single user message.
    pub prompt: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Temperature (0.0 = deterministic, 1.0 = creative).
    pub temperature: f32,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl CompletionRequest {
    /// Create a request with the default temperature and timeout.
    #[must_use]
    pub fn new(prompt: impl Into<String>, max_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens,
            temperature: DEFAULT_TEMPERATURE,
            timeout_ms: 60_000,
        }
    }

    /// Set the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

/// A response from the LLM.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// The generated text; empty when the reply carried none.
    pub text: String,
    /// How many tokens were generated, when reported.
    pub tokens_generated: u32,
    /// Latency in milliseconds.
    pub latency_ms: u64,
    /// Which model was used.
    pub model: String,
}

// ---------------------------------------------------------------------------
// Wire format of the chat/completions endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatCompletionBody<'a> {
    pub model: &'a str,
    pub messages: [ChatMessage<'a>; 1],
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

/// The subset of the reply we read.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ChatCompletionReply {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: Option<ChatUsage>,
}

impl ChatCompletionReply {
    /// Text of the first choice, or `""`.
    pub fn first_text(&self) -> &str {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChatChoice {
    #[serde(default)]
    pub message: Option<ChatReplyMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChatReplyMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChatUsage {
    #[serde(default)]
    pub completion_tokens: u32,
}
