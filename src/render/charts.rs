use super::escape_html;
use super::theme::Palette;
use chrono::{Datelike, NaiveDate};
use forecast_insight::models::SeriesPoint;
use forecast_insight::utils::Histogram;
use std::fmt::Write;

// 6x3 figure at 100 dpi
const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 300.0;
const PAD_LEFT: f64 = 64.0;
const PAD_RIGHT: f64 = 16.0;
const PAD_TOP: f64 = 12.0;
const PAD_BOTTOM: f64 = 40.0;
const GRID_LINES: usize = 4;

struct Frame {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Frame {
    fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        let (x_min, x_max) = widen(x_min, x_max);
        let (y_min, y_max) = widen(y_min, y_max);
        Self { x_min, x_max, y_min, y_max }
    }

    fn x(&self, value: f64) -> f64 {
        PAD_LEFT + (value - self.x_min) / (self.x_max - self.x_min) * (WIDTH - PAD_LEFT - PAD_RIGHT)
    }

    fn y(&self, value: f64) -> f64 {
        HEIGHT - PAD_BOTTOM - (value - self.y_min) / (self.y_max - self.y_min) * (HEIGHT - PAD_TOP - PAD_BOTTOM)
    }
}

fn widen(min: f64, max: f64) -> (f64, f64) {
    if (max - min).abs() < f64::EPSILON {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    }
}

/// Day number for chronological x positions; falls back to the row index
fn x_positions(series: &[SeriesPoint]) -> Vec<f64> {
    let days: Option<Vec<f64>> = series
        .iter()
        .map(|p| {
            NaiveDate::parse_from_str(&p.date, "%Y-%m-%d")
                .ok()
                .map(|d| d.num_days_from_ce() as f64)
        })
        .collect();

    days.unwrap_or_else(|| (0..series.len()).map(|i| i as f64).collect())
}

fn open_svg(out: &mut String, label: &str) {
    let _ = write!(
        out,
        r#"<svg class="chart" viewBox="0 0 {w} {h}" role="img" aria-label="{label}" xmlns="http://www.w3.org/2000/svg">"#,
        w = WIDTH,
        h = HEIGHT,
        label = escape_html(label),
    );
}

fn draw_y_grid(out: &mut String, frame: &Frame, palette: &Palette, y_label: &str, precision: usize) {
    for i in 0..=GRID_LINES {
        let value = frame.y_min + (frame.y_max - frame.y_min) * i as f64 / GRID_LINES as f64;
        let y = frame.y(value);
        let _ = write!(
            out,
            r#"<line x1="{x1:.1}" y1="{y:.1}" x2="{x2:.1}" y2="{y:.1}" stroke="{grid}" stroke-opacity="0.6" stroke-width="1"/><text x="{tx:.1}" y="{ty:.1}" text-anchor="end" font-size="11" fill="{muted}">{value:.precision$}</text>"#,
            x1 = PAD_LEFT,
            x2 = WIDTH - PAD_RIGHT,
            grid = palette.grid,
            tx = PAD_LEFT - 6.0,
            ty = y + 4.0,
            muted = palette.muted,
        );
    }

    let _ = write!(
        out,
        r#"<text x="14" y="{cy:.1}" transform="rotate(-90 14 {cy:.1})" text-anchor="middle" font-size="12" fill="{muted}">{label}</text>"#,
        cy = (HEIGHT - PAD_BOTTOM + PAD_TOP) / 2.0,
        muted = palette.muted,
        label = escape_html(y_label),
    );
}

fn draw_x_labels(out: &mut String, palette: &Palette, left: &str, right: &str, caption: Option<&str>) {
    let baseline = HEIGHT - PAD_BOTTOM + 16.0;
    let _ = write!(
        out,
        r#"<text x="{lx:.1}" y="{y:.1}" text-anchor="start" font-size="11" fill="{muted}">{left}</text><text x="{rx:.1}" y="{y:.1}" text-anchor="end" font-size="11" fill="{muted}">{right}</text>"#,
        lx = PAD_LEFT,
        rx = WIDTH - PAD_RIGHT,
        y = baseline,
        muted = palette.muted,
        left = escape_html(left),
        right = escape_html(right),
    );

    if let Some(caption) = caption {
        let _ = write!(
            out,
            r#"<text x="{cx:.1}" y="{y:.1}" text-anchor="middle" font-size="12" fill="{muted}">{caption}</text>"#,
            cx = (PAD_LEFT + WIDTH - PAD_RIGHT) / 2.0,
            y = HEIGHT - 6.0,
            muted = palette.muted,
            caption = escape_html(caption),
        );
    }
}

/// Line chart of a date-indexed series, no resampling. Gaps split the line.
pub fn line_chart_svg(series: &[SeriesPoint], y_label: &str, palette: &Palette) -> String {
    let mut out = String::new();
    open_svg(&mut out, y_label);

    let xs = x_positions(series);
    let present: Vec<(f64, f64)> = xs
        .iter()
        .zip(series)
        .filter_map(|(x, p)| p.value.filter(|v| v.is_finite()).map(|v| (*x, v)))
        .collect();

    if present.is_empty() {
        let _ = write!(
            out,
            r#"<text x="{x}" y="{y}" text-anchor="middle" font-size="13" fill="{muted}">No data</text></svg>"#,
            x = WIDTH / 2.0,
            y = HEIGHT / 2.0,
            muted = palette.muted,
        );
        return out;
    }

    let (x_min, x_max, y_min, y_max) = present.iter().fold(
        (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
        |(x_lo, x_hi, y_lo, y_hi), (x, y)| (x_lo.min(*x), x_hi.max(*x), y_lo.min(*y), y_hi.max(*y)),
    );
    let frame = Frame::new(x_min, x_max, y_min, y_max);

    let precision = if y_max.abs() < 1.0 { 3 } else { 2 };
    draw_y_grid(&mut out, &frame, palette, y_label, precision);

    let mut runs: Vec<Vec<String>> = vec![Vec::new()];
    for (x, p) in xs.iter().zip(series) {
        match p.value.filter(|v| v.is_finite()) {
            Some(value) => {
                if let Some(run) = runs.last_mut() {
                    run.push(format!("{:.1},{:.1}", frame.x(*x), frame.y(value)));
                }
            }
            None if runs.last().is_some_and(|run| !run.is_empty()) => runs.push(Vec::new()),
            None => {}
        }
    }

    for run in runs.iter().filter(|run| !run.is_empty()) {
        let _ = write!(
            out,
            r#"<polyline fill="none" stroke="{accent}" stroke-width="2" stroke-linejoin="round" points="{points}"/>"#,
            accent = palette.accent,
            points = run.join(" "),
        );
    }

    let mut dated = series.iter().filter(|p| p.value.is_some_and(f64::is_finite));
    let first = dated.next().map(|p| p.date.as_str()).unwrap_or("");
    let last = dated.next_back().map(|p| p.date.as_str()).unwrap_or(first);
    draw_x_labels(&mut out, palette, first, last, None);

    out.push_str("</svg>");
    out
}

/// Histogram bars with a dashed vertical line at zero
pub fn histogram_svg(histogram: &Histogram, x_label: &str, palette: &Palette) -> String {
    let mut out = String::new();
    open_svg(&mut out, x_label);

    // Keep the zero reference visible
    let x_min = histogram.min.min(histogram.zero_reference);
    let x_max = histogram.max.max(histogram.zero_reference);
    let frame = Frame::new(x_min, x_max, 0.0, histogram.max_count().max(1) as f64);

    draw_y_grid(&mut out, &frame, palette, "Frequency", 0);

    for bin in &histogram.bins {
        if bin.count == 0 {
            continue;
        }
        let x0 = frame.x(bin.start);
        let x1 = frame.x(bin.end);
        let top = frame.y(bin.count as f64);
        let _ = write!(
            out,
            r#"<rect x="{x:.1}" y="{y:.1}" width="{w:.1}" height="{h:.1}" fill="{accent}" fill-opacity="0.75"/>"#,
            x = x0,
            y = top,
            w = (x1 - x0).max(0.5),
            h = frame.y(0.0) - top,
            accent = palette.accent,
        );
    }

    let zero_x = frame.x(histogram.zero_reference);
    let _ = write!(
        out,
        r#"<line class="zero-reference" x1="{x:.1}" y1="{y1:.1}" x2="{x:.1}" y2="{y2:.1}" stroke="{text}" stroke-width="1" stroke-dasharray="6 4"/>"#,
        x = zero_x,
        y1 = PAD_TOP,
        y2 = HEIGHT - PAD_BOTTOM,
        text = palette.text,
    );

    draw_x_labels(
        &mut out,
        palette,
        &format!("{:.3}", x_min),
        &format!("{:.3}", x_max),
        Some(x_label),
    );

    out.push_str("</svg>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Theme;

    fn series() -> Vec<SeriesPoint> {
        vec![
            SeriesPoint { date: "2024-01-02".into(), value: Some(150.0) },
            SeriesPoint { date: "2024-01-03".into(), value: Some(152.5) },
            SeriesPoint { date: "2024-01-08".into(), value: Some(149.0) },
        ]
    }

    #[test]
    fn test_line_chart_has_one_vertex_per_point() {
        let svg = line_chart_svg(&series(), "Price", &Theme::Classic.palette());
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        let polyline = svg.split("points=\"").nth(1).unwrap().split('"').next().unwrap();
        assert_eq!(polyline.split(' ').count(), 3);
        assert!(svg.contains("2024-01-02"));
        assert!(svg.contains("2024-01-08"));
    }

    #[test]
    fn test_line_chart_uses_calendar_spacing() {
        let xs = x_positions(&series());
        assert_eq!(xs[1] - xs[0], 1.0);
        assert_eq!(xs[2] - xs[1], 5.0);
    }

    #[test]
    fn test_empty_line_chart() {
        let svg = line_chart_svg(&[], "Volatility", &Theme::Midnight.palette());
        assert!(svg.contains("No data"));

        let gaps = vec![SeriesPoint { date: "2024-01-02".into(), value: None }];
        assert!(line_chart_svg(&gaps, "Volatility", &Theme::Midnight.palette()).contains("No data"));
    }

    #[test]
    fn test_line_chart_breaks_at_gaps() {
        let csv = "Date,Close,vol_20d,future_5d_return\n\
2024-01-02,150.0,,\n\
2024-01-03,151.0,,\n\
2024-01-04,NaN,,\n\
2024-01-05,153.0,,\n\
2024-01-08,154.0,,\n";
        let history = forecast_insight::services::parse_csv_content(csv).unwrap();
        let series = history.close_series();
        assert_eq!(series[2].value, None);

        let svg = line_chart_svg(&series, "Price", &Theme::Classic.palette());
        assert!(!svg.contains("NaN"));
        assert_eq!(svg.matches("<polyline").count(), 2);
        let runs: Vec<usize> = svg
            .split("points=\"")
            .skip(1)
            .map(|rest| rest.split('"').next().unwrap().split(' ').count())
            .collect();
        assert_eq!(runs, vec![2, 2]);
    }

    #[test]
    fn test_histogram_draws_zero_reference() {
        let hist = Histogram::from_values(&[0.01, 0.02, 0.03, 0.05], 50);
        let svg = histogram_svg(&hist, "5-Day Return", &Theme::Terminal.palette());
        assert!(svg.contains("zero-reference"));
        assert!(svg.contains("stroke-dasharray"));
        assert_eq!(svg.matches("<rect").count(), 4);
        // range extended down to zero
        assert!(svg.contains(">0.000<"));
    }
}
