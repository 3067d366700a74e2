use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub time: String,    // Format: YYYY-MM-DD
    pub date: DateTime<Utc>,
    pub close: f64,
    pub vol_20d: Option<f64>,
    pub future_5d_return: Option<f64>,
}

impl PricePoint {
    pub fn new(
        date: DateTime<Utc>,
        close: f64,
        vol_20d: Option<f64>,
        future_5d_return: Option<f64>,
    ) -> Self {
        Self {
            time: crate::utils::format_market_date(date),
            date,
            close,
            // NaN cells from pandas exports behave like blanks
            vol_20d: vol_20d.filter(|v| v.is_finite()),
            future_5d_return: future_5d_return.filter(|v| v.is_finite()),
        }
    }
}

/// Raw CSV row format of the feature export
#[derive(Debug, Deserialize)]
pub struct RawPriceRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Close")]
    pub close: f64,
    pub vol_20d: Option<f64>,
    pub future_5d_return: Option<f64>,
}

impl RawPriceRow {
    pub fn to_price_point(&self) -> anyhow::Result<PricePoint> {
        let date = crate::utils::parse_market_date(&self.date)?;
        Ok(PricePoint::new(date, self.close, self.vol_20d, self.future_5d_return))
    }
}

/// One (date, value) pair of a chart series; `None` marks a gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: String,
    pub value: Option<f64>,
}

/// Price history sorted chronologically
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    points: Vec<PricePoint>,
}

impl PriceHistory {
    /// Build a history, sorting by date ascending. Equal dates keep file order.
    pub fn from_points(mut points: Vec<PricePoint>) -> Self {
        points.sort_by(|a, b| a.date.cmp(&b.date));
        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_date(&self) -> Option<&str> {
        self.points.first().map(|p| p.time.as_str())
    }

    pub fn last_date(&self) -> Option<&str> {
        self.points.last().map(|p| p.time.as_str())
    }

    /// One entry per row; non-finite closes become gaps
    pub fn close_series(&self) -> Vec<SeriesPoint> {
        self.points
            .iter()
            .map(|p| SeriesPoint {
                date: p.time.clone(),
                value: Some(p.close).filter(|v| v.is_finite()),
            })
            .collect()
    }

    /// One entry per row; rows without a 20-day volatility value become gaps
    pub fn volatility_series(&self) -> Vec<SeriesPoint> {
        self.points
            .iter()
            .map(|p| SeriesPoint { date: p.time.clone(), value: p.vol_20d })
            .collect()
    }

    pub fn return_sample(&self) -> Vec<f64> {
        self.points.iter().filter_map(|p| p.future_5d_return).collect()
    }
}
