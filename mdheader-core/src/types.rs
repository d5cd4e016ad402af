//! Core data model shared by every stage of header generation.

use serde::{Deserialize, Serialize};

/// What a post's filename says about it.
///
/// Derived purely from the filename string; see [`crate::filename::parse_file_name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFileName {
    /// ISO `yyyy-MM-dd` prefix, when the name carries one.
    pub date: Option<String>,
    /// Remainder of the name with the `.md` suffix removed.
    pub title: String,
    /// Whether the name already follows `yyyy-MM-dd-title.md`.
    pub is_valid_format: bool,
}

/// Metadata the model produces for a post (matches the JSON shape asked for in the prompt).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogMetadata {
    /// One-line summary of the post.
    pub description: String,
    /// Broad categories, most relevant first.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Finer-grained tags, most relevant first.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// All fields of a front-matter block, in rendering order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontMatter {
    /// Post title (taken from the filename).
    pub title: String,
    /// Publication date, `yyyy-MM-dd`.
    pub date: String,
    /// Configured author, possibly empty.
    pub author: String,
    /// Generated description.
    pub description: String,
    /// Generated categories.
    pub categories: Vec<String>,
    /// Generated tags.
    pub tags: Vec<String>,
}

impl FrontMatter {
    /// Assemble the header fields from model output plus filename-derived values.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        date: impl Into<String>,
        author: impl Into<String>,
        metadata: BlogMetadata,
    ) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
            author: author.into(),
            description: metadata.description,
            categories: metadata.categories,
            tags: metadata.tags,
        }
    }

    /// The model-generated portion of the header.
    #[must_use]
    pub fn metadata(&self) -> BlogMetadata {
        BlogMetadata {
            description: self.description.clone(),
            categories: self.categories.clone(),
            tags: self.tags.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_missing_lists_default_to_empty() {
        let meta: BlogMetadata =
            serde_json::from_str(r#"{"description":"only a summary"}"#).expect("should parse");
        assert_eq!(meta.description, "only a summary");
        assert!(meta.categories.is_empty());
        assert!(meta.tags.is_empty());
    }

    #[test]
    fn front_matter_keeps_metadata() {
        let meta = BlogMetadata {
            description: "d".into(),
            categories: vec!["rust".into()],
            tags: vec!["cli".into(), "yaml".into()],
        };
        let fm = FrontMatter::new("t", "2024-01-15", "me", meta.clone());
        assert_eq!(fm.metadata(), meta);
        assert_eq!(fm.title, "t");
    }
}
