use serde::{Deserialize, Serialize};
use std::fmt;

/// Point forecast produced upstream of the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSummary {
    pub subject_label: String,
    pub horizon_label: String,
    pub median_return_pct: f64,
    pub lower_price: f64,
    pub upper_price: f64,
}

impl ForecastSummary {
    pub fn new(
        subject_label: impl Into<String>,
        horizon_label: impl Into<String>,
        median_return_pct: f64,
        lower_price: f64,
        upper_price: f64,
    ) -> Self {
        Self {
            subject_label: subject_label.into(),
            horizon_label: horizon_label.into(),
            median_return_pct,
            lower_price,
            upper_price,
        }
    }

    /// Static demo values shipped with the original AMZN dashboard
    pub fn demo() -> Self {
        Self::new("Amazon (AMZN)", "next 5 trading days", 0.84, 172.30, 181.90)
    }

    pub fn range_width(&self) -> f64 {
        self.upper_price - self.lower_price
    }

    pub fn midpoint(&self) -> f64 {
        self.lower_price / 2.0 + self.upper_price / 2.0
    }
}

impl Default for ForecastSummary {
    fn default() -> Self {
        Self::demo()
    }
}

/// Directional classification of the median return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bias {
    Positive,
    Negative,
    Neutral,
}

impl Bias {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bias::Positive => "positive",
            Bias::Negative => "negative",
            Bias::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Bias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Width of the forecast range relative to its midpoint price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Uncertainty {
    High,
    Moderate,
    Low,
}

impl Uncertainty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Uncertainty::High => "high",
            Uncertainty::Moderate => "moderate",
            Uncertainty::Low => "low",
        }
    }
}

impl fmt::Display for Uncertainty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterpretationResult {
    pub bias: Bias,
    pub uncertainty: Uncertainty,
    pub narrative: String,
}

/// Labelled display value for the metrics row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastMetrics {
    pub median_return: Metric,
    pub lower_bound: Metric,
    pub upper_bound: Metric,
}

impl ForecastMetrics {
    pub fn from_summary(summary: &ForecastSummary) -> Self {
        use crate::utils::format::{format_percentage, format_price};

        Self {
            median_return: Metric {
                label: "Median Return".to_string(),
                value: format_percentage(summary.median_return_pct),
            },
            lower_bound: Metric {
                label: "Lower Price Bound".to_string(),
                value: format_price(summary.lower_price),
            },
            upper_bound: Metric {
                label: "Upper Price Bound".to_string(),
                value: format_price(summary.upper_price),
            },
        }
    }

    /// Metrics in display order
    pub fn as_array(&self) -> [&Metric; 3] {
        [&self.median_return, &self.lower_bound, &self.upper_bound]
    }
}
