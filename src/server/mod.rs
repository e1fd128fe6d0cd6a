//! HTTP API: axum server exposing the quality assessments as JSON.

pub mod handlers;
pub mod health;
pub mod response;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::db::store::Store;
use crate::service::QualityService;
use crate::server::health::HealthState;

/// Shared state accessible by all route handlers.
#[derive(Clone)]
pub struct AppState {
    service: Arc<QualityService<Store>>,
    health: HealthState,
}

impl AppState {
    pub fn new(service: QualityService<Store>) -> Self {
        Self {
            service: Arc::new(service),
            health: HealthState::new(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/food-items/{id}/quality", get(handlers::food_item_quality))
        .route("/api/food-items/quality/batch", post(handlers::batch_quality))
        .route("/api/quality/statistics", get(handlers::quality_statistics))
        .route("/api/quality/low-quality", get(handlers::low_quality_items))
        .route("/api/quality/assess", post(handlers::assess_record))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the API until Ctrl-C.
pub async fn serve(state: AppState, addr: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind API server to {addr}"))?;
    info!(addr, "API server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server error")?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
    }
}
