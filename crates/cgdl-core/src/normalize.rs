//! Canonical and display forms of class names, labels and line text.

/// Identity form: trimmed, whitespace runs collapsed to one space, lower-cased.
///
/// Only ever used for comparison (node keys, edge de-duplication).
#[must_use]
pub fn normalize_key_part(raw: &str) -> String {
    collapse_whitespace(raw).to_lowercase()
}

/// Display form: trimmed, whitespace runs collapsed, case preserved.
#[must_use]
pub fn normalize_display(raw: &str) -> String {
    collapse_whitespace(raw)
}

fn collapse_whitespace(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for word in raw.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
