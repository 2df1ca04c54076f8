//! Tag presence table and key tag summary

use serde::Serialize;

use crate::format::{format_value, is_present, to_label};
use crate::model::TagMap;

/// Display text for an absent tag in the key tag summary
pub const NOT_SPECIFIED: &str = "Not specified";

/// One row of the tag presence table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagRow {
    /// Original tag key
    pub key: String,
    /// Human-readable label derived from the key
    pub label: String,
    pub display_value: String,
    pub present: bool,
}

/// Build the tag presence table, one row per tag in the order received
pub fn build_tag_table(tags: Option<&TagMap>) -> Vec<TagRow> {
    build_tag_table_with_filter(tags, |_| false)
}

/// Build the tag presence table, skipping keys for which `is_excluded` holds
pub fn build_tag_table_with_filter<F>(tags: Option<&TagMap>, is_excluded: F) -> Vec<TagRow>
where
    F: Fn(&str) -> bool,
{
    let Some(tags) = tags else {
        return Vec::new();
    };

    tags.iter()
        .filter(|(key, _)| !is_excluded(key))
        .map(|(key, value)| TagRow {
            key: key.to_string(),
            label: to_label(key),
            display_value: format_value(Some(value)),
            present: is_present(Some(value)),
        })
        .collect()
}

/// Fixed rows of the key tag summary: (label, source tag)
const KEY_TAGS: [(&str, &str); 4] = [
    ("Title", "title"),
    ("Description", "description"),
    ("Canonical URL", "canonical"),
    ("Open Graph", "ogTitle"),
];

/// One row of the key tag summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyTagRow {
    pub label: String,
    pub value: String,
    pub present: bool,
}

/// Build the four-row summary of the tags that matter most for SEO
///
/// Unlike the full table, the rows are fixed and an absent tag reads
/// "Not specified".
pub fn build_key_tag_summary(tags: Option<&TagMap>) -> Vec<KeyTagRow> {
    KEY_TAGS
        .iter()
        .map(|(label, key)| {
            let value = tags.and_then(|t| t.get(key));
            let present = is_present(value);
            KeyTagRow {
                label: label.to_string(),
                value: if present {
                    format_value(value)
                } else {
                    NOT_SPECIFIED.to_string()
                },
                present,
            }
        })
        .collect()
}
