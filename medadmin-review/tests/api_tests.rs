//! Integration tests for medadmin-review API endpoints
//!
//! Tests cover:
//! - Health endpoint
//! - Filtered experiment and activity listings
//! - Active filter summaries
//! - Actor header handling for "created by me" filters
//! - Invalid filter input
//! - Pagination

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use medadmin_common::records::RecordSet;
use medadmin_review::{build_router, AppState};
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot` method

// Percent-encoded category values used in query strings
const CLINICAL_STUDY: &str = "%E4%B8%B4%E5%BA%8A%E7%A0%94%E7%A9%B6"; // 临床研究
const DIABETES: &str = "%E7%B3%96%E5%B0%BF%E7%97%85"; // 糖尿病
const FIBROSIS: &str = "%E8%82%9D%E7%BA%A4%E7%BB%B4%E5%8C%96"; // 肝纤维化

/// Test helper: small in-memory dataset
fn test_records() -> RecordSet {
    RecordSet::from_json(
        r#"{
        "experiments": [
            {"id": "E1", "title": "Metformin cohort", "owner": "dr.li",
             "research_type": "临床研究", "status": "已批准", "tags": ["糖尿病"],
             "created_on": "2024-03-01", "budget": 200000, "multicenter": true},
            {"id": "E2", "title": "Rat liver model", "owner": "dr.zhao",
             "research_type": "动物实验", "status": "进行中", "tags": ["肝纤维化"],
             "created_on": "2023-09-15", "budget": 45000},
            {"id": "E3", "title": "Fibrosis imaging", "owner": "dr.li",
             "research_type": "临床研究", "status": "进行中", "tags": ["肝纤维化", "影像"],
             "created_on": "2024-07-20", "budget": 610000}
        ],
        "activity": [
            {"id": "L1", "actor": "admin", "action": "Created user", "module": "users",
             "severity": "info", "occurred_at": "2024-06-01T09:00:00", "duration_ms": 120},
            {"id": "L2", "actor": "dr.li", "action": "Started training run", "module": "training",
             "severity": "warning", "occurred_at": "2024-06-02T14:30:00", "duration_ms": 5400,
             "success": false},
            {"id": "L3", "actor": "admin", "action": "Deployed model", "module": "deployment",
             "severity": "critical", "occurred_at": "2024-06-03T23:10:00", "duration_ms": 980}
        ]
    }"#,
    )
    .expect("test fixtures should parse")
}

/// Test helper: Create app with test state
fn setup_app(default_actor: Option<&str>, page_size: i64) -> axum::Router {
    let state = AppState::new(test_records(), default_actor.map(str::to_string), page_size);
    build_router(state)
}

fn test_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

fn row_ids(body: &Value) -> Vec<String> {
    body["rows"]
        .as_array()
        .expect("rows should be an array")
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Health Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app(None, 20);

    let response = app.oneshot(test_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "medadmin-review");
    assert!(body["version"].is_string());
    assert_eq!(body["experiments"], 3);
    assert_eq!(body["activity"], 3);
}

// =============================================================================
// Experiment Listing Tests
// =============================================================================

#[tokio::test]
async fn test_experiments_unfiltered() {
    let app = setup_app(None, 20);

    let response = app.oneshot(test_request("/api/experiments")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["dataset"], "experiments");
    assert_eq!(body["total_results"], 3);
    assert_eq!(body["active_filters"], 0);
    assert_eq!(row_ids(&body), vec!["E1", "E2", "E3"]);
}

#[tokio::test]
async fn test_experiments_by_research_type() {
    let app = setup_app(None, 20);

    let uri = format!("/api/experiments?research_type={}", CLINICAL_STUDY);
    let response = app.oneshot(test_request(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(row_ids(&body), vec!["E1", "E3"]);
    assert_eq!(body["active_filters"], 1);
    assert_eq!(body["filters"][0]["field"], "research_type");
    assert_eq!(body["filters"][0]["value"], "临床研究");
}

#[tokio::test]
async fn test_experiments_tags_or_within_and_across() {
    let app = setup_app(None, 20);

    // Either tag, but only clinical studies
    let uri = format!(
        "/api/experiments?tags={},{}&research_type={}",
        DIABETES, FIBROSIS, CLINICAL_STUDY
    );
    let response = app.oneshot(test_request(&uri)).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(row_ids(&body), vec!["E1", "E3"]);
    assert_eq!(body["active_filters"], 2);
}

#[tokio::test]
async fn test_experiments_search_and_budget() {
    let app = setup_app(None, 20);

    let response = app
        .oneshot(test_request("/api/experiments?search=FIBROSIS&max=700000&min=500000"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(row_ids(&body), vec!["E3"]);
    assert_eq!(body["active_filters"], 2);
}

#[tokio::test]
async fn test_experiments_full_budget_range_inactive() {
    let app = setup_app(None, 20);

    let response = app
        .oneshot(test_request("/api/experiments?min=0&max=1000000"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total_results"], 3);
    assert_eq!(body["active_filters"], 0);
}

#[tokio::test]
async fn test_experiments_date_range() {
    let app = setup_app(None, 20);

    let response = app
        .oneshot(test_request("/api/experiments?from=2024-01-01&to=2024-06-30"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(row_ids(&body), vec!["E1"]);
    assert_eq!(body["filters"][0]["value"], "2024-01-01 ~ 2024-06-30");
}

#[tokio::test]
async fn test_experiments_multicenter_flag() {
    let app = setup_app(None, 20);

    let response = app
        .oneshot(test_request("/api/experiments?multicenter=false"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(row_ids(&body), vec!["E2", "E3"]);
}

// =============================================================================
// Actor Tests
// =============================================================================

#[tokio::test]
async fn test_created_by_me_uses_header() {
    let app = setup_app(None, 20);

    let request = Request::builder()
        .method("GET")
        .uri("/api/experiments?created_by_me=true")
        .header("x-medadmin-actor", "dr.zhao")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(row_ids(&body), vec!["E2"]);
}

#[tokio::test]
async fn test_created_by_me_falls_back_to_default_actor() {
    let app = setup_app(Some("dr.li"), 20);

    let response = app
        .oneshot(test_request("/api/experiments?created_by_me=true"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(row_ids(&body), vec!["E1", "E3"]);
}

#[tokio::test]
async fn test_created_by_me_without_actor_matches_nothing() {
    let app = setup_app(None, 20);

    let response = app
        .oneshot(test_request("/api/experiments?created_by_me=true"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total_results"], 0);
    assert_eq!(body["active_filters"], 1);
}

// =============================================================================
// Activity Listing Tests
// =============================================================================

#[tokio::test]
async fn test_activity_severity_and_success() {
    let app = setup_app(None, 20);

    let response = app
        .oneshot(test_request("/api/activity?severity=warning,critical&success=true"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["dataset"], "activity");
    assert_eq!(row_ids(&body), vec!["L3"]);
}

#[tokio::test]
async fn test_activity_date_ignores_time_of_day() {
    let app = setup_app(None, 20);

    let response = app
        .oneshot(test_request("/api/activity?from=2024-06-03&to=2024-06-03"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(row_ids(&body), vec!["L3"]);
}

#[tokio::test]
async fn test_activity_mine() {
    let app = setup_app(Some("admin"), 20);

    let response = app.oneshot(test_request("/api/activity?mine=true")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(row_ids(&body), vec!["L1", "L3"]);
}

// =============================================================================
// Summary Tests
// =============================================================================

#[tokio::test]
async fn test_experiment_filter_summary() {
    let app = setup_app(None, 20);

    let uri = format!("/api/experiments/filters?tags={},{}&search=E", DIABETES, FIBROSIS);
    let response = app.oneshot(test_request(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    // Two tags count as one field
    assert_eq!(body["active_filters"], 2);
    assert_eq!(body["filters"].as_array().unwrap().len(), 3);
    assert_eq!(body["filters"][0]["field"], "search");
}

#[tokio::test]
async fn test_activity_filter_summary_empty() {
    let app = setup_app(None, 20);

    let response = app
        .oneshot(test_request("/api/activity/filters"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["active_filters"], 0);
    assert!(body["filters"].as_array().unwrap().is_empty());
}

// =============================================================================
// Invalid Input Tests
// =============================================================================

#[tokio::test]
async fn test_invalid_date_rejected() {
    let app = setup_app(None, 20);

    let response = app
        .oneshot(test_request("/api/experiments?from=2024-02-30"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert!(body["error"].as_str().unwrap().contains("Invalid filter"));
}

#[tokio::test]
async fn test_invalid_flag_rejected() {
    let app = setup_app(None, 20);

    let response = app
        .oneshot(test_request("/api/activity?success=sometimes"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_page_rejected() {
    let app = setup_app(None, 20);

    let response = app
        .oneshot(test_request("/api/experiments?page=two"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Pagination Tests
// =============================================================================

#[tokio::test]
async fn test_pagination_second_page() {
    let app = setup_app(None, 2);

    let response = app
        .oneshot(test_request("/api/experiments?page=2"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["page"], 2);
    assert_eq!(body["page_size"], 2);
    assert_eq!(body["total_pages"], 2);
    assert_eq!(row_ids(&body), vec!["E3"]);
}

#[tokio::test]
async fn test_pagination_clamps_high_page() {
    let app = setup_app(None, 2);

    let response = app
        .oneshot(test_request("/api/experiments?page=99"))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["page"], 2);
    assert_eq!(row_ids(&body), vec!["E3"]);
}

#[tokio::test]
async fn test_oversized_page_size_is_capped() {
    let app = setup_app(None, i64::MAX);

    let response = app.oneshot(test_request("/api/experiments")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["page_size"], 10_000);
    assert_eq!(body["total_pages"], 1);
    assert_eq!(row_ids(&body), vec!["E1", "E2", "E3"]);
}
