//! Loose tag-list parsing.
//!
//! Enrichment fields that hold tag lists come from several upstream sources
//! and arrive either as a JSON array (`["DeFi","Lending"]`) or as a
//! delimiter-separated string (`DeFi, Lending`). Parsing is two-stage: a
//! strict JSON parse first, then a comma-split fallback. A malformed value
//! degrades to whatever the fallback yields for that one record; it never
//! fails the surrounding result set.

use serde_json::Value;

/// Parses a raw tag-list value into individual tags.
///
/// Stage one attempts a strict JSON parse; arrays keep their string elements
/// (scalars are stringified). Anything that is not a JSON array falls back to
/// [`split_delimited`]. Blank input yields an empty list.
pub fn parse_tag_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => {
                    let tag = s.trim().to_string();
                    (!tag.is_empty()).then_some(tag)
                }
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => None,
            })
            .collect(),
        // A bare JSON string is still a delimited list, minus the quotes.
        Ok(Value::String(inner)) => split_delimited(&inner),
        _ => split_delimited(trimmed),
    }
}

/// Fallback stage: splits on commas, trims, and drops empty segments.
pub fn split_delimited(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
