//! Reply token budget.
//!
//! A linear estimate, not a tokenizer. Under-estimating truncates the JSON
//! reply; over-estimating only costs quota, so every constant leans high.

/// Average characters per token assumed for the description.
pub const CHARS_PER_TOKEN: f64 = 2.5;
/// Fixed allowance for the instruction text.
pub const PROMPT_OVERHEAD_TOKENS: u32 = 200;
/// Per-category allowance, quotes and separators included.
pub const TOKENS_PER_CATEGORY: u32 = 15;
/// Per-tag allowance, quotes and separators included.
pub const TOKENS_PER_TAG: u32 = 10;
/// Braces, keys and punctuation of the reply object.
pub const JSON_OVERHEAD_TOKENS: u32 = 50;
/// Multiplier applied to the summed estimate.
pub const SAFETY_MARGIN: f64 = 1.5;
/// Floor for the returned budget.
pub const MIN_REPLY_TOKENS: u32 = 500;

/// Upper bound on reply tokens for the requested description length and list sizes.
///
/// Never below [`MIN_REPLY_TOKENS`]; non-decreasing in every argument.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn estimate_reply_tokens(max_length: u32, max_categories: u32, max_tags: u32) -> u32 {
    let description = (f64::from(max_length) / CHARS_PER_TOKEN).ceil();
    let sum = f64::from(PROMPT_OVERHEAD_TOKENS)
        + description
        + f64::from(TOKENS_PER_CATEGORY) * f64::from(max_categories)
        + f64::from(TOKENS_PER_TAG) * f64::from(max_tags)
        + f64::from(JSON_OVERHEAD_TOKENS);
    let total = (sum * SAFETY_MARGIN).ceil().min(f64::from(u32::MAX)) as u32;
    total.max(MIN_REPLY_TOKENS)
}
