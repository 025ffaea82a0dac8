//! Filtered dataset listings
//!
//! Every request carries its complete filter state in the query string;
//! nothing is kept between requests. The current actor is taken from the
//! `x-medadmin-actor` header, falling back to the configured default.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use medadmin_common::filter::{count_active, describe_active, filter_records, state_from_pairs, ActiveFilter};
use medadmin_common::records::{ActivityLogEntry, ExperimentDesign};
use medadmin_common::{FilterContext, FilterState, Filterable};

use crate::{pagination::calculate_pagination, AppState};

/// Header identifying the current actor
pub const ACTOR_HEADER: &str = "x-medadmin-actor";

/// Raw query pairs; repeated keys are preserved
type QueryPairs = Vec<(String, String)>;

/// Filtered listing with pagination and the active filter chips
#[derive(Debug, Serialize)]
pub struct FilterResponse<R: Serialize> {
    pub dataset: String,
    pub total_results: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
    pub active_filters: usize,
    pub filters: Vec<ActiveFilter>,
    pub rows: Vec<R>,
}

/// Active filter summary without results
#[derive(Debug, Serialize)]
pub struct FilterSummaryResponse {
    pub dataset: String,
    pub active_filters: usize,
    pub filters: Vec<ActiveFilter>,
}

/// GET /api/experiments
///
/// Experiment designs matching the query's filter state.
pub async fn list_experiments(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<QueryPairs>,
) -> Result<Json<FilterResponse<ExperimentDesign>>, FilterError> {
    list_dataset("experiments", &state.records.experiments, &state, &headers, &params).map(Json)
}

/// GET /api/activity
///
/// Activity log entries matching the query's filter state.
pub async fn list_activity(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<QueryPairs>,
) -> Result<Json<FilterResponse<ActivityLogEntry>>, FilterError> {
    list_dataset("activity", &state.records.activity, &state, &headers, &params).map(Json)
}

/// GET /api/experiments/filters
pub async fn summarize_experiment_filters(
    Query(params): Query<QueryPairs>,
) -> Result<Json<FilterSummaryResponse>, FilterError> {
    summarize::<ExperimentDesign>("experiments", &params).map(Json)
}

/// GET /api/activity/filters
pub async fn summarize_activity_filters(
    Query(params): Query<QueryPairs>,
) -> Result<Json<FilterSummaryResponse>, FilterError> {
    summarize::<ActivityLogEntry>("activity", &params).map(Json)
}

fn list_dataset<R>(
    dataset: &str,
    records: &[R],
    state: &AppState,
    headers: &HeaderMap,
    params: &QueryPairs,
) -> Result<FilterResponse<R>, FilterError>
where
    R: Filterable + Clone + Serialize,
{
    let filter_state = parse_filter_state::<R>(params)?;
    let requested_page = parse_page(params)?;
    let ctx = request_context(headers, state);

    let matched = filter_records(records, &filter_state, &ctx);
    let total_results = matched.len() as i64;
    let p = calculate_pagination(total_results, requested_page, state.page_size);

    let rows: Vec<R> = matched[p.row_range(state.page_size, matched.len())]
        .iter()
        .map(|record| (*record).clone())
        .collect();

    debug!(
        dataset,
        total_results,
        page = p.page,
        actor = ctx.actor.as_deref().unwrap_or("-"),
        "Served filtered listing"
    );

    Ok(FilterResponse {
        dataset: dataset.to_string(),
        total_results,
        page: p.page,
        page_size: state.page_size,
        total_pages: p.total_pages,
        active_filters: count_active(&filter_state),
        filters: describe_active(&filter_state),
        rows,
    })
}

fn summarize<R: Filterable>(
    dataset: &str,
    params: &QueryPairs,
) -> Result<FilterSummaryResponse, FilterError> {
    let filter_state = parse_filter_state::<R>(params)?;
    Ok(FilterSummaryResponse {
        dataset: dataset.to_string(),
        active_filters: count_active(&filter_state),
        filters: describe_active(&filter_state),
    })
}

fn parse_filter_state<R: Filterable>(params: &QueryPairs) -> Result<FilterState<R>, FilterError> {
    state_from_pairs::<R, _>(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .map_err(FilterError::from)
}

/// Page number (1-indexed); defaults to the first page
fn parse_page(params: &QueryPairs) -> Result<i64, FilterError> {
    match params.iter().rev().find(|(k, _)| k == "page") {
        None => Ok(1),
        Some((_, raw)) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| FilterError::InvalidInput(format!("page must be an integer (got '{}')", raw))),
    }
}

fn request_context(headers: &HeaderMap, state: &AppState) -> FilterContext {
    let actor = headers
        .get(ACTOR_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| state.default_actor.clone());
    FilterContext { actor }
}

/// Filter errors
#[derive(Debug)]
pub enum FilterError {
    InvalidInput(String),
    Internal(String),
}

impl From<medadmin_common::Error> for FilterError {
    fn from(err: medadmin_common::Error) -> Self {
        match err {
            medadmin_common::Error::InvalidInput(msg) => FilterError::InvalidInput(msg),
            other => FilterError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for FilterError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            FilterError::InvalidInput(msg) => {
                (StatusCode::BAD_REQUEST, format!("Invalid filter: {}", msg))
            }
            FilterError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Internal error: {}", msg))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
