//! Integration tests for the report and analytics endpoints.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the router.
//! Every case here fails auth, scope, or parameter validation before any
//! query is issued, so no database is required.

mod common;

use axum::http::StatusCode;
use common::{bearer_token, body_json, build_test_app, get};

const REPORT_URI: &str = "/api/v1/reports/pest-analytics";
const POPULATION_URI: &str = "/api/v1/analytics/insect-population";

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[tokio::test]
async fn report_without_token_returns_401() {
    let app = build_test_app();
    let response = get(app, REPORT_URI, None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn report_with_garbage_token_returns_401() {
    let app = build_test_app();
    let response = get(app, REPORT_URI, Some("not-a-jwt")).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Invalid or expired token");
}

#[tokio::test]
async fn population_without_token_returns_401() {
    let app = build_test_app();
    let response = get(app, POPULATION_URI, None).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Tenant scope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_admin_without_company_id_is_forbidden() {
    let app = build_test_app();
    let token = bearer_token(3, "exterminator", None);
    let response = get(app, REPORT_URI, Some(&token)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn population_non_admin_without_company_id_is_forbidden() {
    let app = build_test_app();
    let token = bearer_token(3, "manager", None);
    let uri = format!("{POPULATION_URI}?start_date=2026-01-01&end_date=2026-01-31");
    let response = get(app, &uri, Some(&token)).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Parameter validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn report_with_half_date_range_returns_400() {
    let app = build_test_app();
    let token = bearer_token(3, "exterminator", Some(7));
    let uri = format!("{REPORT_URI}?start_date=2026-01-01");
    let response = get(app, &uri, Some(&token)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn population_missing_end_date_returns_400() {
    let app = build_test_app();
    let token = bearer_token(3, "exterminator", Some(7));
    let uri = format!("{POPULATION_URI}?start_date=2026-01-01");
    let response = get(app, &uri, Some(&token)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "start_date and end_date are required");
}

#[tokio::test]
async fn population_missing_both_dates_returns_400() {
    let app = build_test_app();
    let token = bearer_token(1, "admin", None);
    let response = get(app, POPULATION_URI, Some(&token)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn population_inverted_range_returns_400() {
    let app = build_test_app();
    let token = bearer_token(3, "exterminator", Some(7));
    let uri = format!("{POPULATION_URI}?start_date=2026-02-01&end_date=2026-01-01");
    let response = get(app, &uri, Some(&token)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}
