use crate::models::{ForecastMetrics, ForecastSummary, InterpretationResult, SeriesPoint};
use crate::utils::Histogram;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "AMZN Return Forecast";
pub const DEFAULT_SUBTITLE: &str = "Probabilistic short-term return forecast using quantile regression.";
pub const DEFAULT_FOOTER: &str =
    "Forecasts are probabilistic and based on historical price behavior. This dashboard is for educational purposes only.";

/// Chart inputs derived from the loaded price history
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub price_series: Vec<SeriesPoint>,
    pub volatility_series: Vec<SeriesPoint>,
    pub return_histogram: Option<Histogram>,
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        self.price_series.is_empty() && self.volatility_series.is_empty() && self.return_histogram.is_none()
    }
}

/// Everything a presentation layer needs to draw one dashboard page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub title: String,
    pub subtitle: String,
    pub forecast: ForecastSummary,
    pub interpretation: InterpretationResult,
    pub metrics: ForecastMetrics,
    pub charts: ChartData,
    pub footer: String,
}

impl DashboardSnapshot {
    pub fn has_history(&self) -> bool {
        !self.charts.price_series.is_empty()
    }
}
