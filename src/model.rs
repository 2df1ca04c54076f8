//! Analysis payload data structures
//!
//! These types mirror the JSON contract emitted by the remote meta tag
//! analyzer. Parsing is lenient: every documented partial or
//! unknown shape maps to a value the renderers can display, and only a
//! payload that is not a JSON object at all is rejected.

use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors that can occur when reading an analysis payload
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("Failed to read payload: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid analysis payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Payload must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}

/// One analysis result as received from the analyzer
///
/// Immutable once parsed. A new analysis replaces the whole value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Overall quality score, nominally 0-100 (NaN when missing)
    #[serde(default = "missing_score", deserialize_with = "lenient_score")]
    pub score: f64,

    /// Extracted tag values in the order the analyzer emitted them
    #[serde(default)]
    pub meta: TagMap,

    /// Suggestions; `None` when the analyzer sent none, or not a list
    #[serde(default, deserialize_with = "lenient_feedback")]
    pub feedback: Option<Vec<FeedbackItem>>,

    /// Per-category point breakdown, if the analyzer provided one
    #[serde(
        default,
        deserialize_with = "lenient_breakdown",
        skip_serializing_if = "Option::is_none"
    )]
    pub breakdown: Option<ScoreBreakdown>,
}

fn missing_score() -> f64 {
    f64::NAN
}

fn lenient_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()).unwrap_or(f64::NAN))
}

fn lenient_feedback<'de, D>(deserializer: D) -> Result<Option<Vec<FeedbackItem>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => Some(items.into_iter().map(FeedbackItem::from).collect()),
        _ => None,
    })
}

fn lenient_breakdown<'de, D>(deserializer: D) -> Result<Option<ScoreBreakdown>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .filter(Value::is_object)
        .and_then(|v| serde_json::from_value(v).ok()))
}

impl AnalysisResult {
    /// Parse a payload from a JSON string
    pub fn from_json_str(input: &str) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    /// Build a result from an already-parsed JSON value
    pub fn from_value(value: Value) -> Result<Self, PayloadError> {
        if !value.is_object() {
            return Err(PayloadError::NotAnObject(json_kind(&value)));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Read a payload from any reader (stdin, socket, file)
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, PayloadError> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Self::from_json_str(&content)
    }

    /// Read a payload from a file on disk
    pub fn from_file(path: &Path) -> Result<Self, PayloadError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ============================================================================
// Tag map
// ============================================================================

/// Tag key to tag value mapping that keeps insertion order
///
/// The key set is open: anything the analyzer sends is kept. Row order in
/// every renderer follows the order stored here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct TagMap {
    entries: Vec<(String, Value)>,
}

impl TagMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tag, replacing an existing value in place
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Value> for TagMap {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => map.into(),
            _ => TagMap::new(),
        }
    }
}

impl From<Map<String, Value>> for TagMap {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            entries: map.into_iter().collect(),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for TagMap {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut tags = TagMap::new();
        for (key, value) in iter {
            tags.insert(key, value);
        }
        tags
    }
}

impl Serialize for TagMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// ============================================================================
// Feedback
// ============================================================================

/// Category of a feedback item
///
/// The analyzer's category set is open; anything outside the three known
/// categories (including a missing or non-string `type`) lands in `Other`.
/// Matching is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackKind {
    Good,
    Warning,
    Missing,
    /// Unrecognized category, keeps the raw text ("" when absent)
    Other(String),
}

impl FeedbackKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "good" => FeedbackKind::Good,
            "warning" => FeedbackKind::Warning,
            "missing" => FeedbackKind::Missing,
            other => FeedbackKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FeedbackKind::Good => "good",
            FeedbackKind::Warning => "warning",
            FeedbackKind::Missing => "missing",
            FeedbackKind::Other(raw) => raw,
        }
    }
}

impl From<Option<&Value>> for FeedbackKind {
    fn from(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(s)) => FeedbackKind::parse(s),
            None | Some(Value::Null) => FeedbackKind::Other(String::new()),
            Some(other) => FeedbackKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FeedbackKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A single suggestion from the analyzer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct FeedbackItem {
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
    pub message: String,
}

impl FeedbackItem {
    pub fn new(kind: FeedbackKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<Value> for FeedbackItem {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(obj) => {
                let message = match obj.get("message") {
                    None | Some(Value::Null) => String::new(),
                    Some(v) => crate::format::format_value(Some(v)),
                };
                Self {
                    kind: FeedbackKind::from(obj.get("type")),
                    message,
                }
            }
            Value::Null => FeedbackItem::new(FeedbackKind::Other(String::new()), ""),
            other => FeedbackItem::new(
                FeedbackKind::Other(String::new()),
                crate::format::format_value(Some(&other)),
            ),
        }
    }
}

// ============================================================================
// Score breakdown
// ============================================================================

/// Points earned per scoring category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    #[serde(default, deserialize_with = "lenient_points")]
    pub title_description: i64,
    #[serde(default, deserialize_with = "lenient_points")]
    pub open_graph: i64,
    #[serde(default, deserialize_with = "lenient_points")]
    pub twitter_card: i64,
    #[serde(default, deserialize_with = "lenient_points")]
    pub canonical_robots: i64,
    #[serde(default, deserialize_with = "lenient_points")]
    pub structured_data: i64,
}

fn lenient_points<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
        .unwrap_or(0))
}
