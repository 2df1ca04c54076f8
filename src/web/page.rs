//! HTML page rendering
//!
//! Renders a `ResultView` as a self-contained HTML page with inline CSS and
//! an SVG score gauge. Every value coming from the payload is escaped.

use std::fmt::Write as _;

use crate::feedback::FeedbackEntry;
use crate::gauge::{GAUGE_CAPTION, GAUGE_RADIUS, ScoreGauge, TRACK_COLOR};
use crate::preview::{PreviewRecord, PreviewSlot};
use crate::tags::{KeyTagRow, TagRow};
use crate::view::{BreakdownRow, ResultView};

/// Page variants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageOptions {
    /// Served by the web server: link the favicon and the live reload script
    pub live: bool,
}

/// Render the result page, or the empty state when no result is loaded
pub fn render_html_page(view: Option<&ResultView>, options: PageOptions) -> String {
    let body = match view {
        Some(view) => render_result(view),
        None => render_empty_state(),
    };

    let live_head = if options.live {
        r#"<link rel="icon" href="/assets/favicon.svg" type="image/svg+xml">
    <script src="/assets/live.js" defer></script>"#
    } else {
        ""
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>MetaSnap - SEO Meta Tag Analysis</title>
    <style>{css}</style>
    {live_head}
</head>
<body>
    <div class="container">
        <header><h1>MetaSnap</h1><p class="subtitle">SEO meta tag analysis</p></header>
        {body}
    </div>
</body>
</html>"#,
        css = inline_css(),
        live_head = live_head,
        body = body,
    )
}

fn render_empty_state() -> String {
    r#"<section class="card empty-state">
            <h2>No analysis loaded</h2>
            <p>POST an analysis result to <code>/api/result</code> to display it here.</p>
        </section>"#
        .to_string()
}

fn render_result(view: &ResultView) -> String {
    let mut html = String::new();

    html.push_str(r#"<section class="card summary">"#);
    html.push_str(&render_gauge(&view.gauge));
    html.push_str(&render_key_tags(&view.key_tags));
    html.push_str("</section>");

    if let Some(rows) = &view.breakdown {
        html.push_str(&render_breakdown(rows));
    }

    html.push_str(&render_feedback(&view.feedback));
    html.push_str(&render_tag_table(&view.tags));

    html.push_str(r#"<section class="previews">"#);
    for record in &view.previews {
        html.push_str(&render_preview(record));
    }
    html.push_str("</section>");

    html
}

/// SVG circular gauge
///
/// The arc starts at 12 o'clock: the ring is rotated by -90 degrees.
pub fn render_gauge(gauge: &ScoreGauge) -> String {
    let size = GAUGE_RADIUS * 2.0;
    let center = GAUGE_RADIUS;

    format!(
        r#"<div class="gauge tier-{tier}">
    <svg width="{size}" height="{size}" viewBox="0 0 {size} {size}" role="img" aria-label="{caption} {label}">
        <circle cx="{c}" cy="{c}" r="{r}" fill="none" stroke="{track}" stroke-width="{stroke}"/>
        <circle cx="{c}" cy="{c}" r="{r}" fill="none" stroke="{color}" stroke-width="{stroke}"
            stroke-linecap="round" stroke-dasharray="{circ:.3}" stroke-dashoffset="{offset:.3}"
            transform="rotate(-90 {c} {c})"/>
        <text x="{c}" y="{c}" text-anchor="middle" dominant-baseline="central" class="gauge-number">{label}</text>
    </svg>
    <div class="gauge-caption">{caption}</div>
</div>"#,
        tier = gauge.color_tier,
        size = size,
        c = center,
        r = gauge.ring_radius,
        track = TRACK_COLOR,
        color = gauge.color_tier.hex(),
        stroke = gauge.stroke_width,
        circ = gauge.circumference,
        offset = gauge.dash_offset,
        label = html_escape(&gauge.display_label),
        caption = GAUGE_CAPTION,
    )
}

fn render_key_tags(rows: &[KeyTagRow]) -> String {
    let mut html = String::from(r#"<dl class="key-tags">"#);
    for row in rows {
        let class = if row.present { "" } else { r#" class="not-specified""# };
        let _ = write!(
            html,
            "<dt>{}</dt><dd{}>{}</dd>",
            html_escape(&row.label),
            class,
            html_escape(&row.value)
        );
    }
    html.push_str("</dl>");
    html
}

fn render_breakdown(rows: &[BreakdownRow]) -> String {
    let mut html = String::from(r#"<section class="card"><h2>Score Breakdown</h2><table class="breakdown">"#);
    for row in rows {
        let percent = if row.max > 0 {
            (row.points as f64 / row.max as f64 * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
        let _ = write!(
            html,
            r#"<tr><td>{}</td><td class="bar"><span style="width: {:.0}%"></span></td><td class="points">{}/{}</td></tr>"#,
            html_escape(row.label),
            percent,
            row.points,
            row.max
        );
    }
    html.push_str("</table></section>");
    html
}

fn render_feedback(entries: &[FeedbackEntry]) -> String {
    let mut html = String::from(r#"<section class="card"><h2>Suggestions</h2><ul class="feedback">"#);
    for entry in entries {
        match entry {
            FeedbackEntry::Item { message, style, .. } => {
                let _ = write!(
                    html,
                    r#"<li class="{}"><span class="icon">{}</span>{}</li>"#,
                    style.color_class.css_class(),
                    style.icon.glyph(),
                    html_escape(message)
                );
            }
            FeedbackEntry::Placeholder { message } => {
                let _ = write!(html, r#"<li class="placeholder">{}</li>"#, html_escape(message));
            }
        }
    }
    html.push_str("</ul></section>");
    html
}

fn render_tag_table(rows: &[TagRow]) -> String {
    let mut html = String::from(r#"<section class="card"><h2>Meta Tags</h2>"#);
    if rows.is_empty() {
        html.push_str(r#"<p class="muted">No meta tags were extracted.</p></section>"#);
        return html;
    }

    html.push_str("<table class=\"tags\"><thead><tr><th>Tag</th><th>Value</th></tr></thead><tbody>");
    for row in rows {
        let class = if row.present { "present" } else { "missing" };
        let _ = write!(
            html,
            r#"<tr class="{}"><td title="{}">{}</td><td>{}</td></tr>"#,
            class,
            html_escape(&row.key),
            html_escape(&row.label),
            html_escape(&row.display_value)
        );
    }
    html.push_str("</tbody></table></section>");
    html
}

fn render_preview(record: &PreviewRecord) -> String {
    let mut html = format!(
        r#"<article class="card preview preview-{}"><h3>{}</h3>"#,
        html_escape(&record.platform.to_string()),
        html_escape(&record.label)
    );

    if let Some(notice) = record.notice {
        let _ = write!(html, r#"<p class="muted">{}</p></article>"#, html_escape(notice));
        return html;
    }

    if let Some(byline) = &record.byline {
        let _ = write!(
            html,
            r#"<div class="byline"><span class="avatar">{}</span>{}</div>"#,
            html_escape(&byline.avatar.to_string()),
            html_escape(byline.name)
        );
    }

    for field in &record.fields {
        let slot_class = match field.slot {
            PreviewSlot::Heading => "heading",
            PreviewSlot::Url => "url",
            PreviewSlot::Snippet => "snippet",
        };
        let fallback = if field.is_fallback { " fallback" } else { "" };
        let _ = write!(
            html,
            r#"<div class="{}{}">{}</div>"#,
            slot_class,
            fallback,
            html_escape(&field.value)
        );
    }

    html.push_str("</article>");
    html
}

/// Escape HTML special characters
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn inline_css() -> &'static str {
    r#"
* { box-sizing: border-box; }
body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; background: #f9fafb; color: #111827; }
.container { max-width: 960px; margin: 0 auto; padding: 24px; }
header h1 { margin: 0; font-size: 28px; }
.subtitle, .muted { color: #6b7280; }
.card { background: #fff; border: 1px solid #e5e7eb; border-radius: 12px; padding: 20px; margin-bottom: 16px; }
.summary { display: flex; gap: 32px; align-items: center; }
.gauge { text-align: center; }
.gauge-number { font-size: 24px; font-weight: 700; fill: #111827; }
.gauge-caption { font-size: 12px; letter-spacing: 0.08em; color: #6b7280; margin-top: 4px; }
.key-tags { display: grid; grid-template-columns: max-content 1fr; gap: 6px 16px; margin: 0; }
.key-tags dt { font-weight: 600; }
.key-tags dd { margin: 0; word-break: break-word; }
.not-specified { color: #ef4444; font-style: italic; }
.breakdown { width: 100%; border-collapse: collapse; }
.breakdown td { padding: 4px 8px; }
.breakdown .bar { width: 50%; }
.breakdown .bar span { display: block; height: 8px; border-radius: 4px; background: #22c55e; }
.breakdown .points { text-align: right; font-variant-numeric: tabular-nums; }
.feedback { list-style: none; padding: 0; margin: 0; }
.feedback li { padding: 8px 12px; border-radius: 8px; margin-bottom: 6px; }
.feedback .icon { margin-right: 8px; }
.feedback .positive { background: #f0fdf4; color: #166534; }
.feedback .caution { background: #fefce8; color: #854d0e; }
.feedback .negative { background: #fef2f2; color: #991b1b; }
.feedback .neutral, .feedback .placeholder { background: #f3f4f6; color: #374151; }
.tags { width: 100%; border-collapse: collapse; }
.tags th, .tags td { text-align: left; padding: 6px 8px; border-bottom: 1px solid #f3f4f6; vertical-align: top; word-break: break-word; }
.tags .missing td:last-child { color: #ef4444; }
.previews { display: grid; grid-template-columns: repeat(auto-fit, minmax(260px, 1fr)); gap: 16px; }
.preview h3 { margin-top: 0; font-size: 14px; color: #6b7280; }
.preview .heading { font-weight: 600; }
.preview-search .heading { color: #1a0dab; font-size: 18px; }
.preview-search .url { color: #006621; }
.preview .url { font-size: 13px; color: #6b7280; }
.preview .snippet { font-size: 14px; }
.preview .fallback { opacity: 0.6; }
.byline { display: flex; align-items: center; gap: 8px; margin-bottom: 8px; }
.avatar { display: inline-flex; width: 28px; height: 28px; border-radius: 50%; background: #e5e7eb; align-items: center; justify-content: center; font-weight: 700; }
.empty-state { text-align: center; padding: 48px 20px; }
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnalysisResult;

    fn view(json: &str) -> ResultView {
        ResultView::render(&AnalysisResult::from_json_str(json).unwrap())
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_empty_state_page() {
        let html = render_html_page(None, PageOptions::default());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("No analysis loaded"));
        assert!(!html.contains("<svg"));
        assert!(!html.contains("/assets/live.js"));
    }

    #[test]
    fn test_live_page_links_assets() {
        let html = render_html_page(None, PageOptions { live: true });
        assert!(html.contains("/assets/live.js"));
        assert!(html.contains("/assets/favicon.svg"));
    }

    #[test]
    fn test_result_page_sections() {
        let view = view(
            r#"{
                "score": 91,
                "breakdown": {"titleDescription": 30, "openGraph": 25},
                "meta": {"title": "Acme", "description": "", "ogTitle": "Acme OG"},
                "feedback": [{"type": "good", "message": "Title tag is present"}]
            }"#,
        );
        let html = render_html_page(Some(&view), PageOptions::default());

        assert!(html.contains("SEO SCORE"));
        assert!(html.contains("stroke=\"#22c55e\""));
        assert!(html.contains(r#"class="gauge-number">91</text>"#));
        assert!(html.contains("Score Breakdown"));
        assert!(html.contains(r#"<li class="positive">"#));
        assert!(html.contains(r#"<tr class="missing">"#));
        assert!(html.contains("Google Preview"));
        assert!(html.contains("Facebook Preview"));
        assert!(html.contains("Twitter Preview"));
        assert!(html.contains("@yourhandle"));
        assert!(html.contains(r#"<dd class="not-specified">Not specified</dd>"#));
    }

    #[test]
    fn test_payload_values_are_escaped() {
        let view = view(
            r#"{
                "score": 50,
                "meta": {"title": "<script>alert(1)</script>"},
                "feedback": [{"type": "warning", "message": "Use <title> & \"quotes\""}]
            }"#,
        );
        let html = render_html_page(Some(&view), PageOptions::default());

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("Use &lt;title&gt; &amp; &quot;quotes&quot;"));
    }

    #[test]
    fn test_gauge_geometry_in_svg() {
        let gauge = ScoreGauge::render(50.0);
        let svg = render_gauge(&gauge);
        let circ = format!("{:.3}", gauge.circumference);
        let offset = format!("{:.3}", gauge.dash_offset);

        assert!(svg.contains(&format!("stroke-dasharray=\"{}\"", circ)));
        assert!(svg.contains(&format!("stroke-dashoffset=\"{}\"", offset)));
        assert!(svg.contains("r=\"44\""));
        assert!(svg.contains("stroke-width=\"8\""));
        assert!(svg.contains("stroke=\"#e5e7eb\""));
        assert!(svg.contains("stroke=\"#ef4444\""));
        assert!(svg.contains("tier-low"));
    }

    #[test]
    fn test_nan_gauge() {
        let svg = render_gauge(&ScoreGauge::render(f64::NAN));
        assert!(svg.contains(">NaN</text>"));
        assert!(svg.contains("stroke=\"#ef4444\""));
    }
}
