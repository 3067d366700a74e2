//! # forecast-insight - Return Forecast Interpretation Library
//!
//! Turns a probabilistic short-term return forecast into dashboard content:
//! - Bias and uncertainty classification with a narrative summary
//! - Price history loading from feature export CSVs
//! - Chart data (price, volatility, return distribution)
//! - Dashboard snapshots for presentation layers
//!
//! ## Quick Start
//!
//! ```rust
//! use forecast_insight::prelude::*;
//!
//! let summary = ForecastSummary::new("Amazon (AMZN)", "next 5 trading days", 0.84, 172.30, 181.90);
//! let result = interpret(&summary).unwrap();
//! assert_eq!(result.bias, Bias::Neutral);
//! assert_eq!(result.uncertainty, Uncertainty::Moderate);
//! ```

pub mod api;
pub mod interpret;
pub mod models;
pub mod services;
pub mod utils;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! ```rust
    //! use forecast_insight::prelude::*;
    //! ```

    pub use crate::api::{DashboardBuilder, DashboardSnapshot};
    pub use crate::interpret::{generate_automated_response, interpret, InterpretError, NarrativeStyle};
    pub use crate::models::{Bias, ForecastMetrics, ForecastSummary, InterpretationResult, PriceHistory, Uncertainty};
    pub use crate::services::{CsvHistoryService, DataLoadError};
}

pub use utils::{init_logger, Logger, Timer};
