//! Merge-tag detection in template text.
//!
//! A merge tag is `{{KEY}}` where KEY is uppercase letters and underscores
//! only. Digits, lowercase letters, or whitespace inside the braces mean the
//! text is not a tag and passes through as literal content.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

// Captures:
// 1: the tag key
pub(crate) static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Z_]+)\}\}").unwrap());

/// Return the keys of all merge tags in `document`.
///
/// Keys appear in first-occurrence order with repeats removed.
pub fn detect_tags(document: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();

    for cap in TAG_RE.captures_iter(document) {
        let Some(key) = cap.get(1).map(|m| m.as_str()) else { continue };
        if seen.insert(key) {
            keys.push(key.to_string());
        }
    }

    keys
}
