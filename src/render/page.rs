use super::charts::{histogram_svg, line_chart_svg};
use super::theme::{Palette, Theme};
use super::{emphasis_to_html, escape_html};
use forecast_insight::api::DashboardSnapshot;
use std::fmt::Write;

fn stylesheet(palette: &Palette) -> String {
    format!(
        r#"
        body {{ margin: 0; background: {bg}; color: {text}; font-family: {font}; }}
        .block-container {{ max-width: {width}px; margin: 0 auto; padding: 2rem 1rem; }}
        h1, h2, h3 {{ font-weight: 600; }}
        .subtitle {{ color: {muted}; }}
        .card {{ background: {surface}; border-radius: {radius}px; padding: 1rem 1.25rem; margin-bottom: 1.5rem; }}
        .metrics {{ display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem; }}
        .metric-label {{ font-size: 0.9rem; color: {muted}; }}
        .metric-value {{ font-size: 1.75rem; }}
        .chart {{ width: 100%; height: auto; }}
        .themes a {{ color: {accent}; margin-right: 0.75rem; }}
        .themes a.active {{ font-weight: 600; text-decoration: none; }}
        .notice {{ color: {muted}; font-style: italic; }}
        footer {{ color: {muted}; }}
        "#,
        bg = palette.background,
        text = palette.text,
        font = palette.font_family,
        width = palette.max_width_px,
        muted = palette.muted,
        surface = palette.surface,
        radius = palette.radius_px,
        accent = palette.accent,
    )
}

fn theme_switcher(active: Theme) -> String {
    let links: Vec<String> = Theme::ALL
        .iter()
        .map(|theme| {
            format!(
                r#"<a href="/?theme={id}"{class}>{name}</a>"#,
                id = theme.as_str(),
                class = if *theme == active { r#" class="active""# } else { "" },
                name = theme.display_name(),
            )
        })
        .collect();
    format!(r#"<nav class="themes">{}</nav>"#, links.join(""))
}

/// Render the full dashboard page for one theme
pub fn render_dashboard(snapshot: &DashboardSnapshot, theme: Theme) -> String {
    let palette = theme.palette();
    let mut body = String::new();

    body.push_str(&theme_switcher(theme));
    let _ = write!(
        body,
        r#"<h2>📈 {subject}</h2><p class="subtitle">{subtitle}</p>"#,
        subject = escape_html(&snapshot.forecast.subject_label),
        subtitle = escape_html(&snapshot.subtitle),
    );

    let _ = write!(
        body,
        r#"<section class="card summary"><h3>🧠 Market Summary</h3><p>{}</p></section>"#,
        emphasis_to_html(&snapshot.interpretation.narrative),
    );

    body.push_str(r#"<h3>📊 Forecast Snapshot</h3><section class="metrics">"#);
    for metric in snapshot.metrics.as_array() {
        let _ = write!(
            body,
            r#"<div class="card metric"><div class="metric-label">{}</div><div class="metric-value">{}</div></div>"#,
            escape_html(&metric.label),
            escape_html(&metric.value),
        );
    }
    body.push_str("</section>");

    if snapshot.has_history() {
        let charts = &snapshot.charts;
        let _ = write!(
            body,
            r#"<h3>📈 Recent Price Trend</h3>{}"#,
            line_chart_svg(&charts.price_series, "Price", &palette)
        );
        let _ = write!(
            body,
            r#"<h3>📉 Volatility Context (20-day)</h3>{}"#,
            line_chart_svg(&charts.volatility_series, "Volatility", &palette)
        );
        if let Some(histogram) = &charts.return_histogram {
            let _ = write!(
                body,
                r#"<h3>📊 5-Day Return Distribution</h3>{}"#,
                histogram_svg(histogram, "5-Day Return", &palette)
            );
        }
    } else {
        body.push_str(r#"<p class="notice">Price history is not available yet.</p>"#);
    }

    let _ = write!(
        body,
        r#"<hr><footer><small>{}</small></footer>"#,
        escape_html(&snapshot.footer)
    );

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{style}</style>
</head>
<body class="theme-{theme}">
<main class="block-container">{body}</main>
</body>
</html>"#,
        title = escape_html(&snapshot.title),
        style = stylesheet(&palette),
        theme = theme.as_str(),
        body = body,
    )
}
