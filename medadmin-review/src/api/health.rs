//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

/// Health check response: status, module name, version and dataset sizes
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    pub experiments: usize,
    pub activity: usize,
    pub loaded_at: String,
}

/// GET /health
///
/// Health check endpoint for monitoring.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "medadmin-review".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        experiments: state.records.experiments.len(),
        activity: state.records.activity.len(),
        loaded_at: state.loaded_at.to_rfc3339(),
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
