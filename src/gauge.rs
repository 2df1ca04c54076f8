//! Circular score gauge
//!
//! Maps a raw score to the geometry of a circular progress ring and a
//! severity tier. The arc is clamped to 0-100; the number shown in the
//! middle of the ring never is.

use std::f64::consts::PI;
use std::fmt;

use serde::Serialize;

use crate::format::format_score;

/// Outer radius of the gauge SVG
pub const GAUGE_RADIUS: f64 = 48.0;
/// Ring stroke width
pub const GAUGE_STROKE: f64 = 8.0;
/// Color of the unfilled track
pub const TRACK_COLOR: &str = "#e5e7eb";
/// Caption under the gauge
pub const GAUGE_CAPTION: &str = "SEO SCORE";

/// Lowest score in the high tier
pub const HIGH_THRESHOLD: f64 = 80.0;
/// Lowest score in the mid tier
pub const MID_THRESHOLD: f64 = 60.0;

/// Severity tier of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTier {
    /// score >= 80
    High,
    /// 60 <= score < 80
    Mid,
    /// score < 60, or not a number
    Low,
}

impl ColorTier {
    pub fn for_score(score: f64) -> Self {
        if score >= HIGH_THRESHOLD {
            ColorTier::High
        } else if score >= MID_THRESHOLD {
            ColorTier::Mid
        } else {
            ColorTier::Low
        }
    }

    /// Stroke color of the filled arc
    pub fn hex(&self) -> &'static str {
        match self {
            ColorTier::High => "#22c55e",
            ColorTier::Mid => "#facc15",
            ColorTier::Low => "#ef4444",
        }
    }
}

impl fmt::Display for ColorTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorTier::High => write!(f, "high"),
            ColorTier::Mid => write!(f, "mid"),
            ColorTier::Low => write!(f, "low"),
        }
    }
}

/// Everything needed to draw the score gauge
#[derive(Debug, Clone, Serialize)]
pub struct ScoreGauge {
    /// Arc fill in percent, always within 0-100
    pub clamped_percent: f64,
    pub color_tier: ColorTier,
    /// The score exactly as received
    pub display_number: f64,
    /// Text shown inside the ring (`85`, `-5`, `NaN`)
    pub display_label: String,
    /// Radius of the ring's center line
    pub ring_radius: f64,
    pub stroke_width: f64,
    pub circumference: f64,
    /// Dash offset that leaves `clamped_percent` of the ring drawn
    pub dash_offset: f64,
}

impl ScoreGauge {
    pub fn render(score: f64) -> Self {
        let clamped_percent = clamp_percent(score);
        let ring_radius = GAUGE_RADIUS - GAUGE_STROKE / 2.0;
        let circumference = 2.0 * PI * ring_radius;
        let dash_offset = circumference * (1.0 - clamped_percent / 100.0);

        Self {
            clamped_percent,
            color_tier: ColorTier::for_score(score),
            display_number: score,
            display_label: format_score(score),
            ring_radius,
            stroke_width: GAUGE_STROKE,
            circumference,
            dash_offset,
        }
    }

    /// Fraction of the ring that is drawn (0.0 - 1.0)
    pub fn sweep_fraction(&self) -> f64 {
        self.clamped_percent / 100.0
    }
}

fn clamp_percent(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 100.0)
    }
}
