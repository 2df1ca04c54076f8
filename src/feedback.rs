//! Feedback classification
//!
//! Every feedback category maps to an icon and a color treatment. Unknown
//! categories get a neutral treatment that implies neither a pass nor a
//! failure.

use serde::Serialize;

use crate::model::{FeedbackItem, FeedbackKind};

/// Text shown when the analyzer sent no suggestions
pub const NO_SUGGESTIONS: &str = "No suggestions";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackIcon {
    Check,
    Warn,
    Cross,
    None,
}

impl FeedbackIcon {
    /// Terminal glyph for this icon
    pub fn glyph(&self) -> &'static str {
        match self {
            FeedbackIcon::Check => "✅",
            FeedbackIcon::Warn => "⚠️",
            FeedbackIcon::Cross => "❌",
            FeedbackIcon::None => "•",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorClass {
    Positive,
    Caution,
    Negative,
    Neutral,
}

impl ColorClass {
    /// CSS class used by the HTML renderer
    pub fn css_class(&self) -> &'static str {
        match self {
            ColorClass::Positive => "positive",
            ColorClass::Caution => "caution",
            ColorClass::Negative => "negative",
            ColorClass::Neutral => "neutral",
        }
    }
}

/// Visual treatment of one feedback item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeedbackStyle {
    pub icon: FeedbackIcon,
    pub color_class: ColorClass,
}

/// Pick the icon and color for a feedback item
pub fn classify(item: &FeedbackItem) -> FeedbackStyle {
    let (icon, color_class) = match &item.kind {
        FeedbackKind::Good => (FeedbackIcon::Check, ColorClass::Positive),
        FeedbackKind::Warning => (FeedbackIcon::Warn, ColorClass::Caution),
        FeedbackKind::Missing => (FeedbackIcon::Cross, ColorClass::Negative),
        FeedbackKind::Other(_) => (FeedbackIcon::None, ColorClass::Neutral),
    };
    FeedbackStyle { icon, color_class }
}

/// One row of the suggestions list
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "entry", rename_all = "lowercase")]
pub enum FeedbackEntry {
    Item {
        kind: FeedbackKind,
        message: String,
        style: FeedbackStyle,
    },
    /// Stands in for an absent or empty feedback list
    Placeholder { message: String },
}

impl FeedbackEntry {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, FeedbackEntry::Placeholder { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            FeedbackEntry::Item { message, .. } | FeedbackEntry::Placeholder { message } => {
                message
            }
        }
    }
}

/// Build the suggestions list
///
/// Never returns an empty list: no feedback and zero feedback items both
/// produce a single placeholder entry.
pub fn build_feedback_list(items: Option<&[FeedbackItem]>) -> Vec<FeedbackEntry> {
    match items {
        Some(items) if !items.is_empty() => items
            .iter()
            .map(|item| FeedbackEntry::Item {
                kind: item.kind.clone(),
                message: item.message.clone(),
                style: classify(item),
            })
            .collect(),
        _ => vec![FeedbackEntry::Placeholder {
            message: NO_SUGGESTIONS.to_string(),
        }],
    }
}
