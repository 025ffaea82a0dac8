//! medadmin-review library - read-only record review service
//!
//! Serves the experiment-design and activity-log datasets with the same
//! multi-criteria filtering the admin screens use.

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use medadmin_common::config::MAX_PAGE_SIZE;
use medadmin_common::records::RecordSet;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod pagination;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Loaded datasets (read-only)
    pub records: Arc<RecordSet>,
    /// Actor assumed when a request carries no identity header
    pub default_actor: Option<String>,
    /// Rows per page in list responses
    pub page_size: i64,
    /// When the datasets were loaded
    pub loaded_at: DateTime<Utc>,
}

impl AppState {
    /// Create new application state
    pub fn new(records: RecordSet, default_actor: Option<String>, page_size: i64) -> Self {
        Self {
            records: Arc::new(records),
            default_actor,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
            loaded_at: medadmin_common::time::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let api = Router::new()
        .route("/api/experiments", get(api::list_experiments))
        .route("/api/experiments/filters", get(api::summarize_experiment_filters))
        .route("/api/activity", get(api::list_activity))
        .route("/api/activity/filters", get(api::summarize_activity_filters));

    Router::new()
        .merge(api)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
