pub mod api;
pub mod config;
pub mod data_structures;
pub mod error;
pub mod render;
pub mod worker;

use crate::config::{AppConfig, SharedConfig};
use crate::data_structures::{SharedHistory, new_shared_history};
use anyhow::Context;
use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower::ServiceBuilder;
use tower_governor::{GovernorLayer, governor::GovernorConfigBuilder};
use tower_http::cors::{Any, CorsLayer};

#[derive(Clone)]
struct AppState {
    history: SharedHistory,
    config: SharedConfig,
}

impl FromRef<AppState> for SharedHistory {
    fn from_ref(app_state: &AppState) -> SharedHistory {
        app_state.history.clone()
    }
}

impl FromRef<AppState> for SharedConfig {
    fn from_ref(app_state: &AppState) -> SharedConfig {
        app_state.config.clone()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_config = AppConfig::load()?;

    forecast_insight::init_logger()?;

    let _span = tracing::info_span!("dashboard", environment = %app_config.environment).entered();

    tracing::info!("Starting forecast-dashboard");
    tracing::info!(
        port = app_config.port,
        data_path = %app_config.data_path.display(),
        theme = %app_config.default_theme,
        subject = %app_config.forecast.subject_label,
        "Loaded configuration"
    );

    let shared_config: SharedConfig = Arc::new(app_config);
    let shared_history = new_shared_history();

    // Load once before serving so the first page has charts
    let outcome = worker::refresh(&shared_history, &shared_config.data_path).await;
    tracing::info!(?outcome, "Initial price history load");

    tracing::info!("Spawning history reload worker");
    tokio::spawn(worker::run(shared_history.clone(), shared_config.clone()));

    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(shared_config.rate_limit.per_second)
            .burst_size(shared_config.rate_limit.burst_size)
            .finish()
            .context("Invalid rate limit configuration")?,
    );

    let app_state = AppState {
        history: shared_history,
        config: shared_config.clone(),
    };

    let app = Router::new()
        .route("/", get(api::dashboard_handler))
        .route("/api/dashboard", get(api::dashboard_json_handler))
        .route("/api/history", get(api::history_handler))
        .route(
            "/api/interpret",
            post(api::interpret_handler).layer(GovernorLayer::new(governor_conf)),
        )
        .route("/health", get(api::health_handler))
        .layer(ServiceBuilder::new().layer(CorsLayer::new().allow_origin(Any).allow_methods(Any)))
        .with_state(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], shared_config.port));
    tracing::info!(%addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
