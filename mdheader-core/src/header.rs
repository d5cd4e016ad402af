//! Front-matter blocks: detection, removal, rendering and read-back.
//!
//! A header is a `---` line, at least one line of fields, a closing `---`
//! line and a blank line, anchored at the very start of the document.
//! Anything else at the top (missing closing delimiter, no blank line after
//! it) is treated as body text and left alone.

use std::fmt::Write as _;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::{HeaderError, Result};
use crate::types::FrontMatter;

static HEADER_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A---\n(.+?)\n---\n\n").expect("header block regex is valid")
});

/// Header delimiter line.
pub const DELIMITER: &str = "---";

/// A document split around its leading header block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedDocument<'a> {
    /// Text after the header, or the whole text when there was none.
    pub body: &'a str,
    /// Byte span of the removed header, always starting at 0.
    pub span: Option<Range<usize>>,
}

impl StrippedDocument<'_> {
    /// Whether a header block was found.
    #[must_use]
    pub fn had_header(&self) -> bool {
        self.span.is_some()
    }
}

/// Locate and cut the leading header block, if any.
#[must_use]
pub fn strip_existing_header(text: &str) -> StrippedDocument<'_> {
    match HEADER_BLOCK.find(text) {
        Some(m) => StrippedDocument {
            body: &text[m.end()..],
            span: Some(0..m.end()),
        },
        None => StrippedDocument { body: text, span: None },
    }
}

/// Render a header block in the fixed field order.
///
/// Strings are emitted as JSON string literals, which YAML reads as
/// double-quoted scalars; lists are JSON arrays. The block always ends with
/// the closing delimiter and a blank line.
#[must_use]
pub fn compose_header(front_matter: &FrontMatter) -> String {
    let lines = [
        DELIMITER.to_string(),
        format!("title: {}", quote(&front_matter.title)),
        format!("date: {}", front_matter.date),
        format!("author: {}", quote(&front_matter.author)),
        format!("description: {}", quote(&front_matter.description)),
        format!("categories: {}", json_list(&front_matter.categories)),
        format!("tags: {}", json_list(&front_matter.tags)),
        format!("{DELIMITER}\n\n"),
    ];
    lines.join("\n")
}

/// Put `header` at the top of `text`, dropping any existing header block.
///
/// Removal and insertion happen in one pass so the result never holds two
/// headers or none.
#[must_use]
pub fn replace_header(text: &str, header: &str) -> String {
    let stripped = strip_existing_header(text);
    let mut out = String::with_capacity(header.len() + stripped.body.len());
    out.push_str(header);
    out.push_str(stripped.body);
    out
}

/// Read the fields of a document's leading header block.
///
/// # Errors
///
/// Returns [`HeaderError::MalformedHeader`] when the text does not start
/// with a header block or its fields do not match [`FrontMatter`].
pub fn parse_header(text: &str) -> Result<FrontMatter> {
    let caps = HEADER_BLOCK
        .captures(text)
        .ok_or_else(|| HeaderError::MalformedHeader("no header block at document start".into()))?;
    serde_yaml::from_str(&caps[1]).map_err(|e| HeaderError::MalformedHeader(e.to_string()))
}

fn quote(s: &str) -> String {
    escape_unprintable(&Value::String(s.to_string()).to_string())
}

fn json_list(items: &[String]) -> String {
    escape_unprintable(&Value::from(items.to_vec()).to_string())
}

/// JSON leaves DEL, C1 controls and the Unicode line separators raw; YAML
/// folds or rejects them inside double quotes, so they become `\uXXXX`.
fn escape_unprintable(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        if needs_escape(c) {
            let _ = write!(out, "\\u{:04x}", u32::from(c));
        } else {
            out.push(c);
        }
    }
    out
}

fn needs_escape(c: char) -> bool {
    c.is_control() || matches!(c, '\u{2028}' | '\u{2029}' | '\u{feff}' | '\u{fffe}' | '\u{ffff}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BlogMetadata;

    fn sample() -> FrontMatter {
        FrontMatter::new(
            "my-post",
            "2024-01-15",
            "Ada",
            BlogMetadata {
                description: "A short post".into(),
                categories: vec!["Rust".into(), "Tools".into()],
                tags: vec!["cli".into()],
            },
        )
    }

    #[test]
    fn header_is_removed_with_span() {
        let text = "---\ntitle: \"old\"\n---\n\nBody here.\n";
        let stripped = strip_existing_header(text);
        assert_eq!(stripped.body, "Body here.\n");
        assert_eq!(stripped.span, Some(0..22));
    }

    #[test]
    fn missing_header_returns_text() {
        let text = "# Title\n\nBody.";
        let stripped = strip_existing_header(text);
        assert_eq!(stripped.body, text);
        assert!(!stripped.had_header());
    }

    #[test]
    fn header_without_blank_line_is_not_stripped() {
        let text = "---\ntitle: x\n---\nBody";
        assert!(!strip_existing_header(text).had_header());
    }

    #[test]
    fn unterminated_header_is_not_stripped() {
        let text = "---\ntitle: x\n\nBody";
        assert!(!strip_existing_header(text).had_header());
    }

    #[test]
    fn header_not_at_start_is_ignored() {
        let text = "Intro\n---\ntitle: x\n---\n\nBody";
        assert!(!strip_existing_header(text).had_header());
    }

    #[test]
    fn only_the_first_block_is_removed() {
        let text = "---\na: 1\n---\n\nbody\n---\nb: 2\n---\n\nmore";
        let stripped = strip_existing_header(text);
        assert_eq!(stripped.body, "body\n---\nb: 2\n---\n\nmore");
    }

    #[test]
    fn composed_header_layout() {
        let header = compose_header(&sample());
        assert_eq!(
            header,
            "---\n\
             title: \"my-post\"\n\
             date: 2024-01-15\n\
             author: \"Ada\"\n\
             description: \"A short post\"\n\
             categories: [\"Rust\",\"Tools\"]\n\
             tags: [\"cli\"]\n\
             ---\n\n"
        );
    }

    #[test]
    fn composed_header_is_strippable() {
        let doc = format!("{}Body", compose_header(&sample()));
        assert_eq!(strip_existing_header(&doc).body, "Body");
    }

    #[test]
    fn quotes_in_fields_survive_round_trip() {
        let mut fm = sample();
        fm.description = "He said \"hi\": a\\b".into();
        fm.tags = vec!["c\"q".into(), "日本語".into()];
        let parsed = parse_header(&compose_header(&fm)).expect("should parse");
        assert_eq!(parsed, fm);
    }

    #[test]
    fn control_and_separator_chars_survive_round_trip() {
        let mut fm = sample();
        fm.title = "a\u{85}b".into();
        fm.description = "x\u{7f}y\u{2028}z\tw".into();
        fm.categories = vec!["c\u{9f}".into()];
        fm.tags = vec!["line\nbreak".into(), "\u{feff}bom".into()];
        let header = compose_header(&fm);
        assert!(header.contains(r#"title: "a\u0085b""#));
        assert!(header.contains(r#"description: "x\u007fy\u2028z\tw""#));
        let parsed = parse_header(&header).expect("should parse");
        assert_eq!(parsed, fm);
    }

    #[test]
    fn replace_swaps_existing_header() {
        let text = "---\ntitle: \"old\"\n---\n\nBody";
        let out = replace_header(text, &compose_header(&sample()));
        assert!(out.ends_with("---\n\nBody"));
        assert_eq!(out.matches("title:").count(), 1);
        assert_eq!(parse_header(&out).expect("should parse"), sample());
    }

    #[test]
    fn replace_inserts_when_absent() {
        let out = replace_header("Body", "---\na: 1\n---\n\n");
        assert_eq!(out, "---\na: 1\n---\n\nBody");
    }

    #[test]
    fn parse_rejects_plain_text() {
        assert!(matches!(
            parse_header("no header"),
            Err(HeaderError::MalformedHeader(_))
        ));
    }
}
