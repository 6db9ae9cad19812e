//! Health Check API Tests

use axum::http::StatusCode;

use crate::common::{response_json, TestApp};

/// Basic health check endpoint returns 200 OK with a status field
#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new().await;

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "healthy");
}

/// Liveness probe should always return 200 while the process runs
#[tokio::test]
async fn test_liveness_probe() {
    let app = TestApp::new().await;

    let response = app.get("/health/live").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "alive");
}

/// Readiness probe reports healthy storage
#[tokio::test]
async fn test_readiness_probe_with_healthy_storage() {
    let app = TestApp::new().await;

    let response = app.get("/health/ready").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "healthy");
}

/// Readiness probe returns 503 when storage is unreachable
#[tokio::test]
async fn test_readiness_probe_with_unreachable_storage() {
    let app = TestApp::with_failing_store();

    let response = app.get("/health/ready").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = response_json(response).await;
    assert_eq!(json["status"], "unhealthy");
}

/// Metrics endpoint exposes Prometheus text format
#[tokio::test]
async fn test_metrics_endpoint() {
    let app = TestApp::new().await;

    let response = app.get("/metrics").await;

    assert_eq!(response.status(), StatusCode::OK);
}
