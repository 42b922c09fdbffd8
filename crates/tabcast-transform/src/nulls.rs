//! Null-token normalization.
//!
//! A fixed, overridable vocabulary of sentinel strings maps to "missing".
//! Matching is exact after trimming; everything else passes through unchanged
//! for further classification.

use tabcast_model::ConvertOptions;

/// Normalize one raw cell: `None` when the trimmed value is a null token,
/// otherwise the trimmed value.
#[must_use]
pub fn normalize_null<'a>(raw: &'a str, options: &ConvertOptions) -> Option<&'a str> {
    let trimmed = raw.trim();
    if options.null_tokens.contains(trimmed) {
        None
    } else {
        Some(trimmed)
    }
}
