//! Composition of all result views
//!
//! `ResultView::render` takes one analysis result and derives every view the
//! renderers draw. Each part is computed independently from the same
//! snapshot.

use serde::Serialize;

use crate::feedback::{FeedbackEntry, build_feedback_list};
use crate::gauge::ScoreGauge;
use crate::model::{AnalysisResult, ScoreBreakdown};
use crate::preview::{Platform, PreviewRecord, project};
use crate::tags::{KeyTagRow, TagRow, build_key_tag_summary, build_tag_table_with_filter};

/// One category of the score breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BreakdownRow {
    pub label: &'static str,
    pub points: i64,
    pub max: i64,
}

/// Category rows with the analyzer's maximum points per category
pub fn breakdown_rows(breakdown: &ScoreBreakdown) -> Vec<BreakdownRow> {
    let row = |label, points, max| BreakdownRow { label, points, max };
    vec![
        row("Title & Description", breakdown.title_description, 30),
        row("Open Graph", breakdown.open_graph, 25),
        row("Twitter Card", breakdown.twitter_card, 20),
        row("Canonical & Robots", breakdown.canonical_robots, 15),
        row("Structured Data", breakdown.structured_data, 10),
    ]
}

/// Options that shape the rendered view
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    /// Tag keys hidden from the full tag table
    pub excluded_tags: Vec<glob::Pattern>,
}

impl ViewOptions {
    pub fn with_excluded_tags(patterns: Vec<glob::Pattern>) -> Self {
        Self {
            excluded_tags: patterns,
        }
    }

    fn is_excluded(&self, key: &str) -> bool {
        self.excluded_tags.iter().any(|p| p.matches(key))
    }
}

/// Every derived view of one analysis result
#[derive(Debug, Clone, Serialize)]
pub struct ResultView {
    pub gauge: ScoreGauge,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<Vec<BreakdownRow>>,
    pub feedback: Vec<FeedbackEntry>,
    pub key_tags: Vec<KeyTagRow>,
    pub tags: Vec<TagRow>,
    pub previews: Vec<PreviewRecord>,
}

impl ResultView {
    /// Derive all views with default options
    pub fn render(result: &AnalysisResult) -> Self {
        Self::render_with_options(result, &ViewOptions::default())
    }

    pub fn render_with_options(result: &AnalysisResult, options: &ViewOptions) -> Self {
        let tags = Some(&result.meta);

        Self {
            gauge: ScoreGauge::render(result.score),
            breakdown: result.breakdown.as_ref().map(breakdown_rows),
            feedback: build_feedback_list(result.feedback.as_deref()),
            key_tags: build_key_tag_summary(tags),
            tags: build_tag_table_with_filter(tags, |key| options.is_excluded(key)),
            previews: Platform::STANDARD
                .iter()
                .map(|platform| project(platform, tags))
                .collect(),
        }
    }

    pub fn preview(&self, platform: &Platform) -> Option<&PreviewRecord> {
        self.previews.iter().find(|p| &p.platform == platform)
    }
}
