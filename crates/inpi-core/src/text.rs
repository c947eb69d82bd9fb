//! Small text helpers shared by the classifier and the extractors.
//!
//! Windows are measured in chars, never bytes, so slicing is safe on
//! accented Portuguese text.

use unicode_normalization::UnicodeNormalization;

/// Prefix of `text` holding at most `max_chars` characters.
pub fn char_window(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Strip diacritics (NFKD, ASCII only).
pub fn strip_diacritics(text: &str) -> String {
    text.nfkd().filter(|c| c.is_ascii()).collect()
}

/// Storage-key slug: lowercase, no diacritics, runs of non-alphanumerics
/// collapsed to a single `_`, no leading/trailing `_`.
pub fn slugify(text: &str) -> String {
    let ascii = strip_diacritics(text).to_lowercase();
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_sep = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.push(c);
        } else {
            pending_sep = true;
        }
    }

    slug
}

/// Collapse all whitespace runs into single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Trimmed value, or `None` when nothing is left.
pub fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Keep only ASCII digits.
pub fn digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}
