//! Error types for the mdheader core library.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for document, filename and configuration operations.
#[derive(Error, Debug)]
pub enum HeaderError {
    /// A rename was requested but a file already sits at the target path.
    #[error("Target filename already exists: {}", .0.display())]
    TargetExists(PathBuf),

    /// The path has no usable file name component.
    #[error("Invalid document path: {}", .0.display())]
    InvalidPath(PathBuf),

    /// A composed header block could not be read back.
    #[error("Malformed front-matter: {0}")]
    MalformedHeader(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, HeaderError>;
