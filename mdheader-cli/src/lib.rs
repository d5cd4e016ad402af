//! # mdheader-cli: command-line host for mdheader
//!
//! Wires `mdheader-core` and `mdheader-llm` into the `generate` command and
//! supplies a terminal [`EditorHost`](host::EditorHost).
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │  mdheader (binary: clap + tracing)   │
//! │  ┌────────────────────────────────┐  │
//! │  │  command::GenerateHeader        │  │
//! │  │      │               │          │  │
//! │  │      ▼               ▼          │  │
//! │  │  mdheader-core   mdheader-llm   │  │
//! │  └────────────────────────────────┘  │
//! │  host::TerminalHost (stdin/stderr)   │
//! └──────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `command`: the stage sequence and its preconditions
//! - `host`: confirmation and message channel
//! - `error`: `GenerateError`
//! - `logging`: tracing subscriber setup

pub mod command;
pub mod error;
pub mod host;
pub mod logging;

pub use command::{GenerateHeader, GenerateOptions, GenerateOutcome, RenamePolicy, Stage, generate};
pub use error::GenerateError;
pub use host::{EditorHost, TerminalHost};
