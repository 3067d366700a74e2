use crate::config::SharedConfig;
use crate::data_structures::SharedHistory;
use forecast_insight::services::CsvHistoryService;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Outcome of one reload attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Reloaded,
    Unchanged,
    Failed,
}

#[instrument(skip(history, config), fields(path = %config.data_path.display()))]
pub async fn run(history: SharedHistory, config: SharedConfig) {
    info!(interval = ?config.reload_interval, "Starting history reload worker");

    let mut ticker = tokio::time::interval(config.reload_interval);
    loop {
        // First tick completes immediately
        ticker.tick().await;
        let outcome = refresh(&history, &config.data_path).await;
        debug!(?outcome, "Reload cycle finished");
    }
}

/// Reload the CSV when its modification time differs from the last load
pub async fn refresh(history: &SharedHistory, path: &Path) -> RefreshOutcome {
    let modified = match tokio::fs::metadata(path).await.and_then(|m| m.modified()) {
        Ok(modified) => modified,
        Err(e) => {
            let mut state = history.lock().await;
            if state.history.is_some() {
                warn!(error = %e, "Price history file unavailable, keeping previous data");
            } else {
                error!(error = %e, "Price history file unavailable");
            }
            state.last_error = Some(format!("{}: {}", path.display(), e));
            return RefreshOutcome::Failed;
        }
    };

    if history.lock().await.source_modified == Some(modified) {
        return RefreshOutcome::Unchanged;
    }

    let service = CsvHistoryService::new(path);
    let loaded = match tokio::task::spawn_blocking(move || service.load()).await {
        Ok(result) => result.map_err(|e| e.to_string()),
        Err(e) => Err(format!("loader task failed: {}", e)),
    };

    let mut state = history.lock().await;
    match loaded {
        Ok(new_history) => {
            info!(rows = new_history.len(), "Price history reloaded");
            state.history = Some(Arc::new(new_history));
            state.loaded_at = Some(chrono::Utc::now());
            state.source_modified = Some(modified);
            state.last_error = None;
            RefreshOutcome::Reloaded
        }
        Err(message) => {
            warn!(error = %message, has_previous = state.history.is_some(), "Failed to reload price history");
            // Remember the bad file version so it is not parsed again every tick
            state.source_modified = Some(modified);
            state.last_error = Some(message);
            RefreshOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_structures::new_shared_history;
    use std::io::Write;

    const VALID: &str = "Date,Close,vol_20d,future_5d_return\n2024-02-02,171.8,0.019,0.004\n2024-02-01,170.0,,0.011\n";

    #[tokio::test]
    async fn test_initial_load_then_unchanged() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(VALID.as_bytes()).unwrap();
        let history = new_shared_history();

        assert_eq!(refresh(&history, file.path()).await, RefreshOutcome::Reloaded);
        assert_eq!(history.lock().await.row_count(), 2);
        assert_eq!(refresh(&history, file.path()).await, RefreshOutcome::Unchanged);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_previous_history() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(VALID.as_bytes()).unwrap();
        let history = new_shared_history();
        refresh(&history, file.path()).await;

        std::fs::write(file.path(), "Date,Close,vol_20d\n2024-02-03,172.0,0.02\n").unwrap();
        history.lock().await.source_modified = None;

        assert_eq!(refresh(&history, file.path()).await, RefreshOutcome::Failed);
        let state = history.lock().await;
        assert_eq!(state.row_count(), 2);
        assert!(state.last_error.as_deref().unwrap().contains("future_5d_return"));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let history = new_shared_history();
        let outcome = refresh(&history, Path::new("/nonexistent/features.csv")).await;
        assert_eq!(outcome, RefreshOutcome::Failed);
        let state = history.lock().await;
        assert!(state.history.is_none());
        assert!(state.last_error.is_some());
    }
}
