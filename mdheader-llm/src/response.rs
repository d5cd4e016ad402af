//! Reading `BlogMetadata` out of a completion reply.
//!
//! Models often wrap JSON in a Markdown code fence, sometimes with a line of
//! chatter in front. The fence markers are stripped first; if the result
//! still is not JSON, the outermost `{ ... }` span is tried before giving up.

use std::sync::LazyLock;

use mdheader_core::BlogMetadata;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::LlmError;

static LEADING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\A```(?:json)?\s*").expect("leading fence regex is valid"));

static TRAILING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*```\s*\z").expect("trailing fence regex is valid"));

const FENCE: &str = "```";

/// Strip code-fence markers from a reply and trim it.
///
/// Removes one leading fence (optionally tagged `json`, any case), one
/// trailing fence, then any fence left in between.
#[must_use]
pub fn clean_response(raw: &str) -> String {
    let text = LEADING_FENCE.replace(raw, "");
    let text = TRAILING_FENCE.replace(&text, "");
    text.replace(FENCE, "").trim().to_string()
}

/// Parse a reply into [`BlogMetadata`].
///
/// # Errors
///
/// Returns [`LlmError::ParseError`] carrying both the raw and the cleaned
/// text when neither the cleaned reply nor its outermost object parses.
pub fn parse_metadata(raw: &str) -> Result<BlogMetadata, LlmError> {
    let cleaned = clean_response(raw);

    let first_err = match serde_json::from_str::<BlogMetadata>(&cleaned) {
        Ok(meta) => return Ok(meta),
        Err(e) => e,
    };

    if let Some(object) = outermost_object(&cleaned) {
        if object.len() < cleaned.len() {
            if let Ok(meta) = serde_json::from_str::<BlogMetadata>(object) {
                debug!(
                    skipped = cleaned.len() - object.len(),
                    "parsed metadata after dropping text around the JSON object"
                );
                return Ok(meta);
            }
        }
    }

    warn!(raw_len = raw.len(), error = %first_err, "model reply is not valid metadata JSON");
    Err(LlmError::ParseError {
        reason: first_err.to_string(),
        raw: raw.to_string(),
        cleaned,
    })
}

fn outermost_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}
