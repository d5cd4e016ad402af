//! Errors surfaced by the `generate` command.

use std::path::PathBuf;

use mdheader_core::HeaderError;
use mdheader_llm::LlmError;
use thiserror::Error;

/// Anything that stops header generation.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// No document to work on.
    #[error("No document found at {}", .0.display())]
    NoDocument(PathBuf),

    /// The document is not Markdown.
    #[error("This is not a Markdown file: {}", .0.display())]
    NotMarkdown(PathBuf),

    /// No API key in config or environment.
    #[error("Please configure OpenAI API Key in settings")]
    MissingApiKey,

    /// Renaming the post failed; nothing was generated.
    #[error("Failed to rename file: {0}")]
    Rename(#[source] HeaderError),

    /// Reading, parsing or writing the document failed.
    #[error(transparent)]
    Document(#[from] HeaderError),

    /// The completion call or reply parsing failed.
    #[error("Error generating metadata: {0}")]
    Metadata(#[from] LlmError),

    /// Talking to the user failed.
    #[error("Host interaction failed: {0}")]
    Host(#[from] std::io::Error),
}

impl GenerateError {
    /// Whether the command stopped before doing any work.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NoDocument(_) | Self::NotMarkdown(_) | Self::MissingApiKey
        )
    }
}
