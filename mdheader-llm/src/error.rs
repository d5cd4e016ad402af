//! LLM error types.

use thiserror::Error;

/// Errors that can occur during LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP request failed.
    #[error("API call failed: {0}")]
    RequestFailed(String),

    /// The endpoint answered with a non-success status.
    #[error("API call failed: HTTP {status}: {body}")]
    Api {
        status: u16,
        body: String,
    },

    /// Request timed out.
    #[error("API call failed: request timed out after {0}ms")]
    Timeout(u64),

    /// LLM provider is unavailable.
    #[error("API call failed: provider unavailable: {0}")]
    Unavailable(String),

    /// The reply could not be read as the expected JSON object.
    #[error("Failed to parse model response: {reason}\n\nRaw response:\n{raw}\n\nCleaned response:\n{cleaned}")]
    ParseError {
        reason: String,
        raw: String,
        cleaned: String,
    },

    /// Configuration error.
    #[error("LLM configuration error: {0}")]
    ConfigError(String),
}

/// Timeouts are mapped by the caller, which knows the configured limit.
impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            LlmError::Unavailable(err.to_string())
        } else {
            LlmError::RequestFailed(err.to_string())
        }
    }
}
