//! Report generation for analysis results
//!
//! Generates human-readable reports from a rendered `ResultView`.

use std::io::{self, Write};

use crate::cli_output::score_bar;
use crate::feedback::FeedbackEntry;
use crate::gauge::{ColorTier, GAUGE_CAPTION};
use crate::preview::PreviewRecord;
use crate::view::ResultView;

/// Width of the score bar in the text report
const BAR_WIDTH: usize = 30;

/// Generate a plain text report to the given writer
pub fn generate_text_report<W: Write>(view: &ResultView, writer: &mut W) -> io::Result<()> {
    let gauge = &view.gauge;

    writeln!(writer, "SEO Meta Tag Analysis")?;
    writeln!(writer, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
    writeln!(writer)?;
    writeln!(
        writer,
        "{}: {}/100 {} ({})",
        GAUGE_CAPTION,
        gauge.display_label,
        score_bar(gauge, BAR_WIDTH),
        gauge.color_tier
    )?;
    writeln!(writer)?;

    if let Some(rows) = &view.breakdown {
        writeln!(writer, "Score Breakdown:")?;
        for row in rows {
            writeln!(writer, "  {:<22} {:>3}/{}", row.label, row.points, row.max)?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "Suggestions:")?;
    for entry in &view.feedback {
        match entry {
            FeedbackEntry::Item { message, style, .. } => {
                writeln!(writer, "  {} {}", style.icon.glyph(), message)?;
            }
            FeedbackEntry::Placeholder { message } => {
                writeln!(writer, "  {}", message)?;
            }
        }
    }
    writeln!(writer)?;

    writeln!(writer, "Key Tags:")?;
    for row in &view.key_tags {
        writeln!(writer, "  {:<14} {}", row.label, row.value)?;
    }
    writeln!(writer)?;

    writeln!(writer, "Meta Tags:")?;
    if view.tags.is_empty() {
        writeln!(writer, "  (none)")?;
    }
    for row in &view.tags {
        let mark = if row.present { "✓" } else { "✗" };
        writeln!(writer, "  {} {}: {}", mark, row.label, row.display_value)?;
    }

    for record in &view.previews {
        writeln!(writer)?;
        write_text_preview(record, writer)?;
    }

    Ok(())
}

fn write_text_preview<W: Write>(record: &PreviewRecord, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{}", record.label)?;
    writeln!(writer, "────────────────────────────────────────────")?;

    if let Some(notice) = record.notice {
        writeln!(writer, "  {}", notice)?;
        return Ok(());
    }
    if let Some(byline) = &record.byline {
        writeln!(writer, "  [{}] {}", byline.avatar, byline.name)?;
    }
    for field in &record.fields {
        writeln!(writer, "  {}", field.value)?;
    }
    Ok(())
}

/// Generate a Markdown report to the given writer
pub fn generate_markdown_report<W: Write>(view: &ResultView, writer: &mut W) -> io::Result<()> {
    let gauge = &view.gauge;

    writeln!(writer, "# SEO Meta Tag Report\n")?;

    let tier_emoji = match gauge.color_tier {
        ColorTier::High => "🟢",
        ColorTier::Mid => "🟡",
        ColorTier::Low => "🔴",
    };
    writeln!(
        writer,
        "**SEO Score**: {} {}/100 ({})\n",
        tier_emoji, gauge.display_label, gauge.color_tier
    )?;

    if let Some(rows) = &view.breakdown {
        writeln!(writer, "## Score Breakdown\n")?;
        writeln!(writer, "| Category | Points |")?;
        writeln!(writer, "|----------|--------|")?;
        for row in rows {
            writeln!(writer, "| {} | {}/{} |", row.label, row.points, row.max)?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "## Suggestions\n")?;
    for entry in &view.feedback {
        match entry {
            FeedbackEntry::Item { message, style, .. } => {
                writeln!(writer, "- {} {}", style.icon.glyph(), message)?;
            }
            FeedbackEntry::Placeholder { message } => {
                writeln!(writer, "_{}_", message)?;
            }
        }
    }
    writeln!(writer)?;

    writeln!(writer, "## Key Tags\n")?;
    writeln!(writer, "| Tag | Value |")?;
    writeln!(writer, "|-----|-------|")?;
    for row in &view.key_tags {
        let value = if row.present {
            escape_cell(&row.value)
        } else {
            format!("**{}**", row.value)
        };
        writeln!(writer, "| {} | {} |", row.label, value)?;
    }
    writeln!(writer)?;

    writeln!(writer, "## Meta Tags\n")?;
    if view.tags.is_empty() {
        writeln!(writer, "No meta tags were extracted.\n")?;
    } else {
        writeln!(writer, "| Tag | Value | Status |")?;
        writeln!(writer, "|-----|-------|--------|")?;
        for row in &view.tags {
            writeln!(
                writer,
                "| {} | {} | {} |",
                escape_cell(&row.label),
                escape_cell(&row.display_value),
                if row.present { "✓" } else { "✗" }
            )?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "## Previews\n")?;
    for record in &view.previews {
        write_markdown_preview(record, writer)?;
    }

    Ok(())
}

fn write_markdown_preview<W: Write>(record: &PreviewRecord, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "### {}\n", record.label)?;

    if let Some(notice) = record.notice {
        writeln!(writer, "_{}_\n", notice)?;
        return Ok(());
    }
    if let Some(byline) = &record.byline {
        writeln!(writer, "> **{}** {}", byline.avatar, byline.name)?;
    }
    for field in &record.fields {
        writeln!(writer, "> {}", field.value)?;
    }
    writeln!(writer)?;
    Ok(())
}

/// Keep values from breaking out of a Markdown table cell
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
