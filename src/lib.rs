//! # metasnap - SEO Meta Tag Result Viewer
//!
//! Renders the result of an SEO meta tag analysis: a circular score gauge,
//! a list of suggestions, a table of every extracted tag, and previews of how
//! the page would look in a search engine and on social platforms.
//!
//! ## Usage
//!
//! ```bash
//! # Render a result as a text report
//! metasnap render result.json
//!
//! # Markdown report to a file
//! curl -s https://analyzer.example/api/analyze?url=... | metasnap render -f md -o report.md
//!
//! # Serve the result page and accept new results over HTTP
//! metasnap serve result.json --port 3000
//! ```
//!
//! ## Views
//!
//! Every view is a pure function of one `AnalysisResult`:
//!
//! - **Score gauge** - arc fill clamped to 0-100, tier high (>= 80), mid (>= 60) or low
//! - **Suggestions** - icon and color per feedback category, placeholder when empty
//! - **Tag table** - one row per tag in the order received, absent values read "Missing"
//! - **Previews** - Google, Facebook and Twitter cards with placeholder fallbacks

pub mod cli_output;
pub mod config;
pub mod feedback;
pub mod format;
pub mod gauge;
pub mod model;
pub mod preview;
pub mod report;
pub mod tags;
pub mod view;
pub mod web;

pub use cli_output::{OutputFormat, generate_json_output, score_bar};
pub use config::{
    CompiledConfig, ConfigError, MetasnapConfig, OutputConfig, ServerSection, TagsConfig,
    find_config_file, load_compiled_config, load_config, load_config_file,
};
pub use feedback::{
    ColorClass, FeedbackEntry, FeedbackIcon, FeedbackStyle, NO_SUGGESTIONS, build_feedback_list,
    classify,
};
pub use format::{MISSING_LABEL, format_score, format_value, is_present, to_label};
pub use gauge::{ColorTier, ScoreGauge};
pub use model::{AnalysisResult, FeedbackItem, FeedbackKind, PayloadError, ScoreBreakdown, TagMap};
pub use preview::{Platform, PreviewField, PreviewRecord, PreviewSlot, project};
pub use report::{generate_markdown_report, generate_text_report};
pub use tags::{
    KeyTagRow, NOT_SPECIFIED, TagRow, build_key_tag_summary, build_tag_table,
    build_tag_table_with_filter,
};
pub use view::{BreakdownRow, ResultView, ViewOptions};
