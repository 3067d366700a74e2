use crate::config::SharedConfig;
use crate::data_structures::SharedHistory;
use crate::error::ApiError;
use crate::render::{Theme, render_dashboard};
use axum::{
    extract::{Json, State},
    response::Html,
};
use axum_extra::extract::Query;
use chrono::{DateTime, Utc};
use forecast_insight::api::{DashboardBuilder, DashboardSnapshot};
use forecast_insight::interpret::interpret;
use forecast_insight::models::{ForecastSummary, InterpretationResult, PricePoint};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    pub theme: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct HealthResponse {
    pub status: &'static str,
    pub rows: usize,
    pub loaded_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

async fn build_snapshot(history: &SharedHistory, config: &SharedConfig) -> Result<DashboardSnapshot, ApiError> {
    let loaded = history.lock().await.history.clone();

    let snapshot = DashboardBuilder::new()
        .with_title(config.page_title.clone())
        .with_forecast(config.forecast.clone())
        .with_optional_history(loaded)
        .build()?;

    Ok(snapshot)
}

#[instrument(skip(history, config))]
pub async fn dashboard_handler(
    State(history): State<SharedHistory>,
    State(config): State<SharedConfig>,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, ApiError> {
    let theme = match query.theme.as_deref() {
        Some(name) => name.parse::<Theme>().map_err(|e| {
            warn!(theme = name, "Rejected unknown theme");
            ApiError::BadRequest(e.to_string())
        })?,
        None => config.default_theme,
    };

    let snapshot = build_snapshot(&history, &config).await?;
    debug!(%theme, has_history = snapshot.has_history(), "Rendering dashboard");

    Ok(Html(render_dashboard(&snapshot, theme)))
}

#[instrument(skip(history, config))]
pub async fn dashboard_json_handler(
    State(history): State<SharedHistory>,
    State(config): State<SharedConfig>,
) -> Result<Json<DashboardSnapshot>, ApiError> {
    let snapshot = build_snapshot(&history, &config).await?;
    Ok(Json(snapshot))
}

#[instrument(skip(history))]
pub async fn history_handler(State(history): State<SharedHistory>) -> Result<Json<Vec<PricePoint>>, ApiError> {
    let state = history.lock().await;
    match &state.history {
        Some(loaded) => {
            debug!(rows = loaded.len(), "Returning price history");
            Ok(Json(loaded.points().to_vec()))
        }
        None => Err(ApiError::Unavailable(
            state
                .last_error
                .clone()
                .unwrap_or_else(|| "price history has not been loaded".to_string()),
        )),
    }
}

#[instrument(skip(payload), fields(subject = %payload.subject_label))]
pub async fn interpret_handler(Json(payload): Json<ForecastSummary>) -> Result<Json<InterpretationResult>, ApiError> {
    let result = interpret(&payload).map_err(|e| {
        warn!(error = %e, "Rejected forecast input");
        ApiError::from(e)
    })?;

    info!(bias = %result.bias, uncertainty = %result.uncertainty, "Interpreted forecast");
    Ok(Json(result))
}

#[instrument(skip(history))]
pub async fn health_handler(State(history): State<SharedHistory>) -> Json<HealthResponse> {
    let state = history.lock().await;
    Json(HealthResponse {
        status: if state.history.is_some() { "ok" } else { "degraded" },
        rows: state.row_count(),
        loaded_at: state.loaded_at,
        last_error: state.last_error.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::data_structures::new_shared_history;
    use axum::http::StatusCode;
    use forecast_insight::models::{Bias, Uncertainty};
    use forecast_insight::services::parse_csv_content;
    use std::sync::Arc;

    const CSV: &str = "Date,Close,vol_20d,future_5d_return\n\
2024-03-04,175.1,0.018,0.012\n\
2024-03-01,178.2,0.017,-0.006\n\
2024-03-05,176.4,0.019,\n";

    fn config() -> SharedConfig {
        Arc::new(AppConfig::from_lookup(|_| None).unwrap())
    }

    async fn loaded_history() -> SharedHistory {
        let history = new_shared_history();
        history.lock().await.history = Some(Arc::new(parse_csv_content(CSV).unwrap()));
        history
    }

    #[tokio::test]
    async fn test_interpret_handler_scenarios() {
        let Json(result) = interpret_handler(Json(ForecastSummary::new(
            "Amazon (AMZN)",
            "next 5 trading days",
            1.5,
            100.0,
            102.0,
        )))
        .await
        .unwrap();
        assert_eq!(result.bias, Bias::Positive);
        assert_eq!(result.uncertainty, Uncertainty::Low);

        let err = interpret_handler(Json(ForecastSummary::new("X", "next week", 0.0, 0.0, 0.0)))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_dashboard_renders_requested_theme() {
        let Html(html) = dashboard_handler(
            State(loaded_history().await),
            State(config()),
            Query(DashboardQuery { theme: Some("terminal".into()) }),
        )
        .await
        .unwrap();

        assert!(html.contains("theme-terminal"));
        assert!(html.contains("<strong>neutral bias</strong>"));
        assert_eq!(html.matches("<svg").count(), 3);
    }

    #[tokio::test]
    async fn test_dashboard_rejects_unknown_theme() {
        let err = dashboard_handler(
            State(new_shared_history()),
            State(config()),
            Query(DashboardQuery { theme: Some("neon".into()) }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_dashboard_without_history_uses_default_theme() {
        let Html(html) = dashboard_handler(State(new_shared_history()), State(config()), Query(DashboardQuery::default()))
            .await
            .unwrap();
        assert!(html.contains("theme-classic"));
        assert!(html.contains("Price history is not available yet."));
    }

    #[tokio::test]
    async fn test_dashboard_json_snapshot() {
        let Json(snapshot) = dashboard_json_handler(State(loaded_history().await), State(config()))
            .await
            .unwrap();
        let dates: Vec<&str> = snapshot.charts.price_series.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-03-01", "2024-03-04", "2024-03-05"]);
        assert_eq!(snapshot.charts.return_histogram.unwrap().total(), 2);
        assert_eq!(snapshot.metrics.upper_bound.value, "$181.90");
    }

    #[tokio::test]
    async fn test_history_handler() {
        let err = history_handler(State(new_shared_history())).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);

        let Json(points) = history_handler(State(loaded_history().await)).await.unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].time, "2024-03-01");
    }

    #[tokio::test]
    async fn test_health_handler() {
        let Json(health) = health_handler(State(new_shared_history())).await;
        assert_eq!(health.status, "degraded");
        assert_eq!(health.rows, 0);

        let Json(health) = health_handler(State(loaded_history().await)).await;
        assert_eq!(health.status, "ok");
        assert_eq!(health.rows, 3);
    }
}
