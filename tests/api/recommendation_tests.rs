//! Recommendation API Tests
//!
//! End-to-end tests for `POST /recommendation` over the real router with
//! an in-memory store.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use policy_advisor::domain::value_objects::RiskTolerance;

use crate::common::{response_json, test_settings, TestApp};

#[tokio::test]
async fn test_young_high_risk_with_dependents() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/recommendation",
            r#"{"age":25,"income":50000,"dependents":3,"riskTolerance":"High"}"#,
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(
        json["recommendation"],
        "Term Life – $500000 for 20 years (Increased coverage due to multiple dependents)"
    );
    assert_eq!(
        json["explanation"],
        "You're young with high risk tolerance, so a high-value, longer term life policy fits you."
    );
}

#[tokio::test]
async fn test_older_low_risk_gets_whole_life() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/recommendation",
            r#"{"age":50,"income":80000,"dependents":1,"riskTolerance":"Low"}"#,
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["recommendation"], "Whole Life – $400000");
}

#[tokio::test]
async fn test_successful_submission_is_persisted() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/recommendation",
            r#"{"age":25,"income":50000,"dependents":3,"riskTolerance":"High"}"#,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let rows = app.store.rows();
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row.age, 25);
    assert_eq!(row.income, 50_000);
    assert_eq!(row.dependents, 3);
    assert_eq!(row.risk_tolerance, RiskTolerance::High);
    assert_eq!(
        row.recommendation,
        "Term Life – $500000 for 20 years (Increased coverage due to multiple dependents)"
    );
    assert!(!row.explanation.is_empty());
}

#[tokio::test]
async fn test_unknown_risk_tolerance_is_rejected_without_persisting() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/recommendation",
            r#"{"age":30,"income":50000,"dependents":0,"riskTolerance":"Extreme"}"#,
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Invalid input");
    assert!(app.store.rows().is_empty());
}

#[tokio::test]
async fn test_string_age_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/recommendation",
            r#"{"age":"30","income":50000,"dependents":0,"riskTolerance":"Low"}"#,
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Invalid input");
    assert!(app.store.rows().is_empty());
}

#[tokio::test]
async fn test_missing_field_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/recommendation",
            r#"{"age":30,"income":50000,"riskTolerance":"Low"}"#,
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.store.rows().is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let app = TestApp::new().await;

    let response = app.post_json("/recommendation", "not json at all").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Invalid input");
}

#[tokio::test]
async fn test_storage_failure_maps_to_internal_server_error() {
    let app = TestApp::with_failing_store();

    let response = app
        .post_json(
            "/recommendation",
            r#"{"age":25,"income":50000,"dependents":0,"riskTolerance":"High"}"#,
        )
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = response_json(response).await;
    assert_eq!(json["error"], "Internal server error");
    // The computed advice is withheld when the insert fails.
    assert!(json.get("recommendation").is_none());
}

#[tokio::test]
async fn test_rate_limit_rejects_after_budget_is_spent() {
    let mut settings = test_settings();
    settings.rate_limit.requests_per_window = 2;
    let app = TestApp::with_settings(settings);

    let body = r#"{"age":40,"income":10000,"dependents":0,"riskTolerance":"Medium"}"#;

    for _ in 0..2 {
        let response = app.post_json("/recommendation", body).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.post_json("/recommendation", body).await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().get("Retry-After").is_some());

    // Only the allowed requests reached storage.
    assert_eq!(app.store.rows().len(), 2);
}

#[tokio::test]
async fn test_responses_carry_security_headers() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/recommendation",
            r#"{"age":25,"income":50000,"dependents":0,"riskTolerance":"Low"}"#,
        )
        .await;

    assert_eq!(
        response
            .headers()
            .get("x-content-type-options")
            .and_then(|v| v.to_str().ok()),
        Some("nosniff")
    );
}
