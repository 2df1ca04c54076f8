//! Social platform preview projection
//!
//! Projects the tag map onto the fixed card shape each platform shows when
//! a link is shared. Absent tags fall back to placeholder text so every
//! card always has something to draw.

use std::fmt;

use serde::Serialize;

use crate::format::{format_value, is_present};
use crate::model::TagMap;

/// Notice carried by the record of an unsupported platform
pub const NO_PREVIEW: &str = "No preview available.";

/// Target platform of a preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    /// Search engine result (Google)
    Search,
    Twitter,
    Facebook,
    /// Any platform without a preview layout
    Other(String),
}

impl Platform {
    /// The three platforms shown on every result page, in display order
    pub const STANDARD: [Platform; 3] = [Platform::Search, Platform::Facebook, Platform::Twitter];

    /// Parse a platform name (case-insensitive, `google` is an alias of `search`)
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "search" | "google" => Platform::Search,
            "twitter" => Platform::Twitter,
            "facebook" => Platform::Facebook,
            _ => Platform::Other(name.trim().to_string()),
        }
    }

    /// Heading shown above the card
    pub fn label(&self) -> String {
        match self {
            Platform::Search => "Google Preview".to_string(),
            Platform::Twitter => "Twitter Preview".to_string(),
            Platform::Facebook => "Facebook Preview".to_string(),
            Platform::Other(name) => format!("{} Preview", name),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Search => write!(f, "search"),
            Platform::Twitter => write!(f, "twitter"),
            Platform::Facebook => write!(f, "facebook"),
            Platform::Other(name) => write!(f, "{}", name),
        }
    }
}

impl Serialize for Platform {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Slot of a preview card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewSlot {
    Heading,
    Url,
    Snippet,
}

impl fmt::Display for PreviewSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewSlot::Heading => write!(f, "heading"),
            PreviewSlot::Url => write!(f, "url"),
            PreviewSlot::Snippet => write!(f, "snippet"),
        }
    }
}

/// One resolved field of a preview card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewField {
    pub slot: PreviewSlot,
    /// Tag the value was read from
    pub source_tag: &'static str,
    pub value: String,
    /// True when the tag was absent and placeholder text was used
    pub is_fallback: bool,
}

/// Account line drawn on social cards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Byline {
    pub avatar: char,
    pub name: &'static str,
}

/// A platform-specific preview card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PreviewRecord {
    pub platform: Platform,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub byline: Option<Byline>,
    pub fields: Vec<PreviewField>,
    /// Set for platforms without a layout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
}

impl PreviewRecord {
    pub fn is_available(&self) -> bool {
        self.notice.is_none()
    }

    /// Value of a slot, if the card has one
    pub fn field(&self, slot: PreviewSlot) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.slot == slot)
            .map(|f| f.value.as_str())
    }
}

/// (slot, source tag, fallback) in display order
type FieldSpec = (PreviewSlot, &'static str, &'static str);

const SEARCH_FIELDS: [FieldSpec; 3] = [
    (PreviewSlot::Heading, "title", "Title"),
    (PreviewSlot::Url, "canonical", "www.example.com"),
    (
        PreviewSlot::Snippet,
        "description",
        "Description will appear here.",
    ),
];

const TWITTER_FIELDS: [FieldSpec; 3] = [
    (PreviewSlot::Heading, "twitterTitle", "Twitter Title"),
    (
        PreviewSlot::Snippet,
        "twitterDescription",
        "Twitter description will appear here.",
    ),
    (PreviewSlot::Url, "canonical", "example.com"),
];

const FACEBOOK_FIELDS: [FieldSpec; 3] = [
    (PreviewSlot::Heading, "ogTitle", "Open Graph Title"),
    (
        PreviewSlot::Snippet,
        "ogDescription",
        "Open Graph description will appear here.",
    ),
    (PreviewSlot::Url, "canonical", "example.com"),
];

/// Project the tags onto the preview card of `platform`
pub fn project(platform: &Platform, tags: Option<&TagMap>) -> PreviewRecord {
    let (specs, byline): (&[FieldSpec], Option<Byline>) = match platform {
        Platform::Search => (&SEARCH_FIELDS[..], None),
        Platform::Twitter => (
            &TWITTER_FIELDS[..],
            Some(Byline {
                avatar: 'T',
                name: "@yourhandle",
            }),
        ),
        Platform::Facebook => (
            &FACEBOOK_FIELDS[..],
            Some(Byline {
                avatar: 'F',
                name: "MetaSnap",
            }),
        ),
        Platform::Other(_) => {
            return PreviewRecord {
                platform: platform.clone(),
                label: platform.label(),
                byline: None,
                fields: Vec::new(),
                notice: Some(NO_PREVIEW),
            };
        }
    };

    let fields = specs
        .iter()
        .map(|&(slot, source_tag, fallback)| resolve_field(tags, slot, source_tag, fallback))
        .collect();

    PreviewRecord {
        platform: platform.clone(),
        label: platform.label(),
        byline,
        fields,
        notice: None,
    }
}

fn resolve_field(
    tags: Option<&TagMap>,
    slot: PreviewSlot,
    source_tag: &'static str,
    fallback: &'static str,
) -> PreviewField {
    let value = tags.and_then(|t| t.get(source_tag));
    if is_present(value) {
        PreviewField {
            slot,
            source_tag,
            value: format_value(value),
            is_fallback: false,
        }
    } else {
        PreviewField {
            slot,
            source_tag,
            value: fallback.to_string(),
            is_fallback: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn tags(pairs: Vec<(&str, Value)>) -> TagMap {
        pairs.into_iter().collect()
    }

    fn slots(record: &PreviewRecord) -> Vec<(PreviewSlot, &str)> {
        record
            .fields
            .iter()
            .map(|f| (f.slot, f.value.as_str()))
            .collect()
    }

    #[test]
    fn test_search_fallbacks() {
        let record = project(&Platform::Search, Some(&TagMap::new()));
        assert_eq!(
            slots(&record),
            vec![
                (PreviewSlot::Heading, "Title"),
                (PreviewSlot::Url, "www.example.com"),
                (PreviewSlot::Snippet, "Description will appear here."),
            ]
        );
        assert!(record.fields.iter().all(|f| f.is_fallback));
        assert!(record.is_available());
        assert_eq!(record.label, "Google Preview");
        assert!(record.byline.is_none());
    }

    #[test]
    fn test_search_with_tags() {
        let map = tags(vec![
            ("title", json!("X")),
            ("canonical", json!("y.com")),
            ("description", json!("D")),
        ]);
        let record = project(&Platform::Search, Some(&map));
        assert_eq!(
            slots(&record),
            vec![
                (PreviewSlot::Heading, "X"),
                (PreviewSlot::Url, "y.com"),
                (PreviewSlot::Snippet, "D"),
            ]
        );
        assert!(record.fields.iter().all(|f| !f.is_fallback));
    }

    #[test]
    fn test_twitter_fallbacks() {
        let record = project(&Platform::Twitter, None);
        assert_eq!(
            slots(&record),
            vec![
                (PreviewSlot::Heading, "Twitter Title"),
                (PreviewSlot::Snippet, "Twitter description will appear here."),
                (PreviewSlot::Url, "example.com"),
            ]
        );
        assert_eq!(
            record.byline,
            Some(Byline {
                avatar: 'T',
                name: "@yourhandle"
            })
        );
    }

    #[test]
    fn test_facebook_uses_open_graph_tags() {
        let map = tags(vec![
            ("title", json!("Plain title")),
            ("ogTitle", json!("OG title")),
            ("ogDescription", Value::Null),
            ("canonical", json!("https://acme.test/")),
        ]);
        let record = project(&Platform::Facebook, Some(&map));
        assert_eq!(record.field(PreviewSlot::Heading), Some("OG title"));
        assert_eq!(
            record.field(PreviewSlot::Snippet),
            Some("Open Graph description will appear here.")
        );
        assert_eq!(record.field(PreviewSlot::Url), Some("https://acme.test/"));
        assert_eq!(record.label, "Facebook Preview");
    }

    #[test]
    fn test_empty_string_uses_fallback() {
        let map = tags(vec![("twitterTitle", json!(""))]);
        let record = project(&Platform::Twitter, Some(&map));
        assert_eq!(record.field(PreviewSlot::Heading), Some("Twitter Title"));
        assert!(record.fields[0].is_fallback);
    }

    #[test]
    fn test_non_string_values_are_formatted() {
        let map = tags(vec![("title", json!(0)), ("description", json!(false))]);
        let record = project(&Platform::Search, Some(&map));
        assert_eq!(record.field(PreviewSlot::Heading), Some("0"));
        assert_eq!(record.field(PreviewSlot::Snippet), Some("false"));
    }

    #[test]
    fn test_unknown_platform() {
        let record = project(&Platform::parse("LinkedIn"), Some(&TagMap::new()));
        assert!(!record.is_available());
        assert!(record.fields.is_empty());
        assert_eq!(record.notice, Some("No preview available."));
        assert_eq!(record.label, "LinkedIn Preview");
    }

    #[test]
    fn test_platform_parse() {
        assert_eq!(Platform::parse("search"), Platform::Search);
        assert_eq!(Platform::parse("Google"), Platform::Search);
        assert_eq!(Platform::parse("TWITTER"), Platform::Twitter);
        assert_eq!(Platform::parse("facebook"), Platform::Facebook);
        assert_eq!(
            Platform::parse("mastodon"),
            Platform::Other("mastodon".to_string())
        );
    }

    #[test]
    fn test_record_serialization() {
        let record = project(&Platform::Twitter, None);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["platform"], "twitter");
        assert_eq!(json["byline"]["avatar"], "T");
        assert_eq!(json["fields"][0]["slot"], "heading");
        assert!(json.get("notice").is_none());
    }
}
