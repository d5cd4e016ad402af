//! Filename conventions for blog posts.
//!
//! Posts are expected to be named `yyyy-MM-dd-title.md`. The date prefix
//! becomes the header `date`, the rest becomes the `title`.

use std::path::Path;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::types::ParsedFileName;

/// `[0-9]` rather than `\d`: the regex crate's `\d` is Unicode-aware.
static DATED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4}-[0-9]{2}-[0-9]{2})-(.+)$").expect("dated filename regex is valid")
});

/// ISO date format used for filenames and the header `date` field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Split a filename into its date prefix and title.
///
/// Never fails: a name that does not follow the convention comes back
/// whole (minus `.md`) as the title.
#[must_use]
pub fn parse_file_name(file_name: &str) -> ParsedFileName {
    let stem = file_name.strip_suffix(".md").unwrap_or(file_name);

    match DATED_NAME.captures(stem) {
        Some(caps) => ParsedFileName {
            date: Some(caps[1].to_string()),
            title: caps[2].to_string(),
            is_valid_format: true,
        },
        None => ParsedFileName {
            date: None,
            title: stem.to_string(),
            is_valid_format: false,
        },
    }
}

/// Canonical `yyyy-MM-dd-title.md` name for a post.
#[must_use]
pub fn canonical_file_name(title: &str, date: NaiveDate) -> String {
    format!("{}-{title}.md", format_date(date))
}

/// Whether the path names a Markdown file (`.md`, any case).
#[must_use]
pub fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("md"))
}

/// Render a date as `yyyy-MM-dd`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Today's date in the local timezone.
#[must_use]
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
