//! An open Markdown post: its path, its text, and the edits applied to it.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{HeaderError, Result};
use crate::filename::parse_file_name;
use crate::header::{replace_header, strip_existing_header};
use crate::types::ParsedFileName;

/// A post loaded from disk.
///
/// Renaming consumes the document, so no handle to the old path survives
/// the move; the returned document is re-read from the new location.
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    text: String,
}

impl Document {
    /// Read a document from disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let text = fs::read_to_string(&path)?;
        debug!(path = %path.display(), bytes = text.len(), "opened document");
        Ok(Self { path, text })
    }

    /// Build a document from in-memory text without touching disk.
    #[must_use]
    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Where the document lives.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current text, including any header.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The bare file name.
    ///
    /// # Errors
    /// Returns [`HeaderError::InvalidPath`] if the path has no UTF-8 file name.
    pub fn file_name(&self) -> Result<&str> {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| HeaderError::InvalidPath(self.path.clone()))
    }

    /// Date and title as encoded in the file name.
    ///
    /// # Errors
    /// Returns [`HeaderError::InvalidPath`] if the path has no UTF-8 file name.
    pub fn parsed_name(&self) -> Result<ParsedFileName> {
        Ok(parse_file_name(self.file_name()?))
    }

    /// Text below the existing header, or everything when there is none.
    #[must_use]
    pub fn body(&self) -> &str {
        strip_existing_header(&self.text).body
    }

    /// Replace any existing header with `header` in a single edit.
    pub fn apply_header(&mut self, header: &str) {
        let had_header = strip_existing_header(&self.text).had_header();
        self.text = replace_header(&self.text, header);
        debug!(path = %self.path.display(), replaced = had_header, "applied header");
    }

    /// Write the current text back to disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> Result<()> {
        fs::write(&self.path, &self.text)?;
        info!(path = %self.path.display(), "saved document");
        Ok(())
    }

    /// Move the file to `new_file_name` in the same directory and reopen it.
    ///
    /// Nothing is touched if a file already exists at the target.
    ///
    /// # Errors
    /// Returns [`HeaderError::TargetExists`] when the target is taken, or an
    /// I/O error if the rename or the reopen fails.
    pub fn rename(self, new_file_name: &str) -> Result<Self> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new(""));
        let target = dir.join(new_file_name);

        if target.exists() {
            return Err(HeaderError::TargetExists(target));
        }

        let Self { path: old, .. } = self;
        fs::rename(&old, &target)?;
        info!(from = %old.display(), to = %target.display(), "renamed document");

        Self::open(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_skips_header() {
        let doc = Document::from_text("/tmp/a.md", "---\ntitle: x\n---\n\nHello");
        assert_eq!(doc.body(), "Hello");
    }

    #[test]
    fn apply_header_replaces_in_place() {
        let mut doc = Document::from_text("/tmp/a.md", "---\ntitle: x\n---\n\nHello");
        doc.apply_header("---\ntitle: y\n---\n\n");
        assert_eq!(doc.text(), "---\ntitle: y\n---\n\nHello");
    }

    #[test]
    fn parsed_name_reads_file_name() {
        let doc = Document::from_text("/posts/2024-01-15-my-post.md", "");
        let parsed = doc.parsed_name().expect("has a name");
        assert_eq!(parsed.date.as_deref(), Some("2024-01-15"));
        assert_eq!(parsed.title, "my-post");
    }

    #[test]
    fn rename_moves_and_reopens() {
        let dir = tempfile::tempdir().expect("tempdir");
        let old = dir.path().join("my-post.md");
        fs::write(&old, "Body").expect("write");

        let doc = Document::open(&old).expect("open");
        let renamed = doc.rename("2024-02-01-my-post.md").expect("rename");

        assert!(!old.exists());
        assert_eq!(renamed.path(), dir.path().join("2024-02-01-my-post.md"));
        assert_eq!(renamed.text(), "Body");
    }

    #[test]
    fn rename_refuses_existing_target() {
        let dir = tempfile::tempdir().expect("tempdir");
        let old = dir.path().join("my-post.md");
        let taken = dir.path().join("2024-02-01-my-post.md");
        fs::write(&old, "Body").expect("write");
        fs::write(&taken, "Other").expect("write");

        let err = Document::open(&old)
            .expect("open")
            .rename("2024-02-01-my-post.md")
            .expect_err("target exists");

        assert!(matches!(err, HeaderError::TargetExists(p) if p == taken));
        assert!(old.exists());
        assert_eq!(fs::read_to_string(&taken).expect("read"), "Other");
    }

    #[test]
    fn save_writes_text() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("a.md");
        fs::write(&path, "Body").expect("write");

        let mut doc = Document::open(&path).expect("open");
        doc.apply_header("---\na: 1\n---\n\n");
        doc.save().expect("save");

        assert_eq!(fs::read_to_string(&path).expect("read"), "---\na: 1\n---\n\nBody");
    }
}
