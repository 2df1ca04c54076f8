//! CLI output helpers
//!
//! Provides the terminal score bar, the machine-readable JSON output and
//! format parsing for the command line.

use std::fmt;
use std::io::{self, Write};

use crate::gauge::ScoreGauge;
use crate::view::ResultView;

// ============================================================================
// Output formats
// ============================================================================

/// Output format of the `render` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Markdown,
    Json,
    Html,
}

impl OutputFormat {
    /// Parse a format name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(OutputFormat::Text),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            "json" => Some(OutputFormat::Json),
            "html" => Some(OutputFormat::Html),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Html => write!(f, "html"),
        }
    }
}

// ============================================================================
// Score bar
// ============================================================================

/// Draw the gauge as a horizontal bar, `width` cells wide
///
/// Uses the same clamped fill as the circular gauge, so a score of 130
/// draws a full bar and NaN draws an empty one.
pub fn score_bar(gauge: &ScoreGauge, width: usize) -> String {
    let filled = (gauge.sweep_fraction() * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

// ============================================================================
// JSON output
// ============================================================================

/// Write the complete view as pretty JSON
pub fn generate_json_output<W: Write>(view: &ResultView, writer: &mut W) -> io::Result<()> {
    let json = serde_json::to_string_pretty(view).map_err(io::Error::other)?;
    writeln!(writer, "{}", json)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnalysisResult;

    #[test]
    fn test_parse_format() {
        assert_eq!(OutputFormat::parse("text"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::parse("Markdown"), Some(OutputFormat::Markdown));
        assert_eq!(OutputFormat::parse("md"), Some(OutputFormat::Markdown));
        assert_eq!(OutputFormat::parse("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("html"), Some(OutputFormat::Html));
        assert_eq!(OutputFormat::parse("pdf"), None);
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }

    #[test]
    fn test_score_bar() {
        assert_eq!(score_bar(&ScoreGauge::render(50.0), 10), "[█████░░░░░]");
        assert_eq!(score_bar(&ScoreGauge::render(0.0), 4), "[░░░░]");
        assert_eq!(score_bar(&ScoreGauge::render(130.0), 4), "[████]");
        assert_eq!(score_bar(&ScoreGauge::render(-20.0), 4), "[░░░░]");
        assert_eq!(score_bar(&ScoreGauge::render(f64::NAN), 4), "[░░░░]");
    }

    #[test]
    fn test_generate_json_output() {
        let result = AnalysisResult::from_json_str(
            r#"{"score": 64, "meta": {"title": "T", "canonical": null}}"#,
        )
        .unwrap();
        let view = ResultView::render(&result);

        let mut output = Vec::new();
        generate_json_output(&view, &mut output).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(json["gauge"]["color_tier"], "mid");
        assert_eq!(json["gauge"]["display_label"], "64");
        assert_eq!(json["tags"][0]["key"], "title");
        assert_eq!(json["tags"][1]["present"], false);
        assert_eq!(json["feedback"][0]["entry"], "placeholder");
        assert_eq!(json["previews"][0]["platform"], "search");
        assert!(json.get("breakdown").is_none());
    }
}
