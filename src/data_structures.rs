use chrono::{DateTime, Utc};
use forecast_insight::models::PriceHistory;
use std::sync::Arc;
use std::time::SystemTime;
use tokio::sync::Mutex;

// --- Price History State ---

#[derive(Clone, Debug, Default)]
pub struct HistoryState {
    pub history: Option<Arc<PriceHistory>>,
    pub loaded_at: Option<DateTime<Utc>>,
    pub source_modified: Option<SystemTime>,
    pub last_error: Option<String>,
}

impl HistoryState {
    pub fn row_count(&self) -> usize {
        self.history.as_ref().map_or(0, |h| h.len())
    }
}

pub type SharedHistory = Arc<Mutex<HistoryState>>;

pub fn new_shared_history() -> SharedHistory {
    Arc::new(Mutex::new(HistoryState::default()))
}
