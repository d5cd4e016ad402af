//! # mdheader-core
//!
//! Everything about a blog post that does not need a language model:
//!
//! - **Filename**: `yyyy-MM-dd-title.md` parsing and canonical names
//! - **Header**: find, strip, render and read back the `---` front-matter block
//! - **Tokens**: reply token budget for the completion call
//! - **Document**: the open post, header splicing, rename-and-reopen
//! - **Config**: `mdheader.toml` settings with defaults
//!
//! ## Header layout
//!
//! ```text
//! ---
//! title: "my-post"
//! date: 2024-01-15
//! author: "Ada"
//! description: "A short post"
//! categories: ["Rust","Tools"]
//! tags: ["cli"]
//! ---
//!
//! <body>
//! ```

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod document;
pub mod error;
pub mod filename;
pub mod header;
pub mod tokens;
pub mod types;

pub use config::GeneratorConfig;
pub use document::Document;
pub use error::HeaderError;
pub use types::*;
