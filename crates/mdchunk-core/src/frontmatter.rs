//! Minimal YAML-style frontmatter extraction.
//!
//! Only flat `key: value` lines are understood. Nested structures, lists
//! and quoting are kept as raw strings.

use std::collections::BTreeMap;

const FENCE: &str = "---";

/// Split a leading `---` block off a document.
///
/// Returns the parsed metadata and the remaining body (trimmed). Documents
/// without a leading fence, or whose fence is never closed, come back
/// unchanged with empty metadata.
///
/// ```rust
/// use mdchunk_core::frontmatter::split_frontmatter;
///
/// let (meta, body) = split_frontmatter("---\ntitle: Notes\ntags: a, b\n---\n# Notes\n");
/// assert_eq!(meta["title"], "Notes");
/// assert_eq!(meta["tags"], "a, b");
/// assert_eq!(body, "# Notes");
/// ```
pub fn split_frontmatter(text: &str) -> (BTreeMap<String, String>, &str) {
    let Some(rest) = text.strip_prefix(FENCE) else {
        return (BTreeMap::new(), text);
    };
    let Some(close) = rest.find(FENCE) else {
        return (BTreeMap::new(), text);
    };

    let metadata = rest[..close]
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            Some((key.trim().to_string(), value.trim().to_string()))
        })
        .collect();
    let body = rest[close + FENCE.len()..].trim();

    (metadata, body)
}
