//! High-level API for building dashboard snapshots
//!
//! A snapshot bundles the interpreted forecast, the display metrics and the
//! chart data so that any presentation layer can render it.

pub mod builder;
pub mod snapshot;

pub use builder::DashboardBuilder;
pub use snapshot::{ChartData, DashboardSnapshot, DEFAULT_FOOTER, DEFAULT_SUBTITLE, DEFAULT_TITLE};
