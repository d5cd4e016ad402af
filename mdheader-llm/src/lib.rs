//! # mdheader-llm: LLM layer for mdheader
//!
//! Turns a post body into [`BlogMetadata`](mdheader_core::BlogMetadata):
//!
//! ```text
//! body ──► prompt (per-language template) ──► chat/completions ──► fenced JSON ──► BlogMetadata
//!                  token budget ─────────────────┘
//! ```
//!
//! Works with any OpenAI-compatible endpoint. One request per call; errors
//! are returned, never retried.

#![deny(clippy::unwrap_used)]

pub mod client;
pub mod error;
pub mod prompt;
pub mod response;
pub mod types;

pub use client::{LlmClient, MetadataOptions};
pub use error::LlmError;
pub use prompt::{Language, PromptLimits};
pub use types::{CompletionRequest, CompletionResponse};
