//! Builder pattern for assembling dashboard snapshots

use crate::api::snapshot::{ChartData, DashboardSnapshot, DEFAULT_FOOTER, DEFAULT_SUBTITLE, DEFAULT_TITLE};
use crate::interpret::{interpret_with_style, InterpretError, NarrativeStyle};
use crate::models::{ForecastMetrics, ForecastSummary, PriceHistory};
use crate::utils::{Histogram, DEFAULT_BIN_COUNT};
use std::sync::Arc;

/// Builder for a [`DashboardSnapshot`]
///
/// # Example
/// ```rust
/// use forecast_insight::api::DashboardBuilder;
/// use forecast_insight::prelude::*;
///
/// let snapshot = DashboardBuilder::new()
///     .with_forecast(ForecastSummary::demo())
///     .build()
///     .unwrap();
/// assert_eq!(snapshot.metrics.median_return.value, "0.84%");
/// ```
pub struct DashboardBuilder {
    title: String,
    subtitle: String,
    forecast: ForecastSummary,
    history: Option<Arc<PriceHistory>>,
    bin_count: usize,
    style: NarrativeStyle,
    footer: String,
}

impl DashboardBuilder {
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            subtitle: DEFAULT_SUBTITLE.to_string(),
            forecast: ForecastSummary::demo(),
            history: None,
            bin_count: DEFAULT_BIN_COUNT,
            style: NarrativeStyle::Markdown,
            footer: DEFAULT_FOOTER.to_string(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    pub fn with_forecast(mut self, forecast: ForecastSummary) -> Self {
        self.forecast = forecast;
        self
    }

    /// Attach the price history used for the chart sections. Shared histories are not copied.
    pub fn with_history(mut self, history: impl Into<Arc<PriceHistory>>) -> Self {
        self.history = Some(history.into());
        self
    }

    pub fn with_optional_history(mut self, history: Option<Arc<PriceHistory>>) -> Self {
        self.history = history;
        self
    }

    /// Number of bins of the return distribution chart
    pub fn with_bins(mut self, bin_count: usize) -> Self {
        self.bin_count = bin_count.max(1);
        self
    }

    pub fn with_style(mut self, style: NarrativeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = footer.into();
        self
    }

    pub fn build(self) -> Result<DashboardSnapshot, InterpretError> {
        let interpretation = interpret_with_style(&self.forecast, self.style)?;
        let metrics = ForecastMetrics::from_summary(&self.forecast);

        let charts = match &self.history {
            Some(history) if !history.is_empty() => ChartData {
                price_series: history.close_series(),
                volatility_series: history.volatility_series(),
                return_histogram: Some(Histogram::from_values(&history.return_sample(), self.bin_count)),
            },
            _ => ChartData::default(),
        };

        Ok(DashboardSnapshot {
            title: self.title,
            subtitle: self.subtitle,
            forecast: self.forecast,
            interpretation,
            metrics,
            charts,
            footer: self.footer,
        })
    }
}

impl Default for DashboardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Bias, PricePoint, Uncertainty};
    use chrono::NaiveDate;

    fn history() -> PriceHistory {
        let points = (1..=30)
            .map(|d| {
                let date = NaiveDate::from_ymd_opt(2024, 4, d).unwrap().and_hms_opt(0, 0, 0).unwrap().and_utc();
                let vol = if d > 19 { Some(0.02) } else { None };
                let ret = if d <= 25 { Some((d as f64 - 12.0) / 500.0) } else { None };
                PricePoint::new(date, 170.0 + d as f64, vol, ret)
            })
            .collect();
        PriceHistory::from_points(points)
    }

    #[test]
    fn test_snapshot_without_history() {
        let snapshot = DashboardBuilder::new().build().unwrap();
        assert_eq!(snapshot.title, DEFAULT_TITLE);
        assert_eq!(snapshot.interpretation.bias, Bias::Neutral);
        assert_eq!(snapshot.interpretation.uncertainty, Uncertainty::Moderate);
        assert!(!snapshot.has_history());
        assert!(snapshot.charts.is_empty());
    }

    #[test]
    fn test_snapshot_with_history() {
        let snapshot = DashboardBuilder::new().with_history(history()).build().unwrap();

        assert_eq!(snapshot.charts.price_series.len(), 30);
        assert_eq!(snapshot.charts.volatility_series.len(), 30);
        assert_eq!(snapshot.charts.volatility_series.iter().filter(|p| p.value.is_some()).count(), 11);
        let hist = snapshot.charts.return_histogram.unwrap();
        assert_eq!(hist.bins.len(), DEFAULT_BIN_COUNT);
        assert_eq!(hist.total(), 25);
    }

    #[test]
    fn test_shared_history_is_not_copied() {
        let shared = Arc::new(history());
        let builder = DashboardBuilder::new().with_optional_history(Some(Arc::clone(&shared)));
        assert_eq!(Arc::strong_count(&shared), 2);

        let snapshot = builder.build().unwrap();
        assert_eq!(snapshot.charts.price_series.len(), shared.len());
        assert_eq!(Arc::strong_count(&shared), 1);
    }

    #[test]
    fn test_invalid_forecast_fails_build() {
        let result = DashboardBuilder::new()
            .with_forecast(ForecastSummary::new("X", "next week", 1.0, 0.0, 0.0))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_labels_and_bins() {
        let snapshot = DashboardBuilder::new()
            .with_title("MSFT Return Forecast")
            .with_forecast(ForecastSummary::new("Microsoft (MSFT)", "next 10 trading days", 2.5, 400.0, 440.0))
            .with_history(history())
            .with_bins(10)
            .with_style(NarrativeStyle::Plain)
            .build()
            .unwrap();

        assert_eq!(snapshot.title, "MSFT Return Forecast");
        assert!(snapshot.interpretation.narrative.contains("Microsoft (MSFT) is expected to show a positive bias"));
        assert_eq!(snapshot.charts.return_histogram.unwrap().bins.len(), 10);
    }
}
