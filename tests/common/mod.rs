//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure. Tests drive the real
//! router; only the storage backend is replaced with in-memory fakes.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use chrono::Utc;
use parking_lot::Mutex;
use tower::ServiceExt;

use policy_advisor::config::{
    CorsSettings, DatabaseSettings, RateLimitSettings, ServerSettings, Settings,
};
use policy_advisor::domain::entities::{NewSubmission, Submission, SubmissionRepository};
use policy_advisor::presentation::http::routes::create_router;
use policy_advisor::presentation::middleware::RateLimiter;
use policy_advisor::shared::error::AppError;
use policy_advisor::startup::AppState;

/// In-memory stand-in for the PostgreSQL submission store.
#[derive(Default)]
pub struct InMemorySubmissionRepository {
    rows: Mutex<Vec<Submission>>,
}

impl InMemorySubmissionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored row.
    pub fn rows(&self) -> Vec<Submission> {
        self.rows.lock().clone()
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn insert(&self, submission: &NewSubmission) -> Result<Submission, AppError> {
        let mut rows = self.rows.lock();
        let stored = Submission {
            id: rows.len() as i64 + 1,
            age: submission.age,
            income: submission.income,
            dependents: submission.dependents,
            risk_tolerance: submission.risk_tolerance,
            recommendation: submission.recommendation.clone(),
            explanation: submission.explanation.clone(),
            created_at: Utc::now(),
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Store whose insert always fails, for exercising the 500 path.
pub struct FailingSubmissionRepository;

#[async_trait]
impl SubmissionRepository for FailingSubmissionRepository {
    async fn insert(&self, _submission: &NewSubmission) -> Result<Submission, AppError> {
        Err(AppError::Internal("storage unavailable".into()))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(AppError::Internal("storage unavailable".into()))
    }
}

/// Settings fixture; the database URL is never dialed by these tests.
pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseSettings {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: 1,
        },
        rate_limit: RateLimitSettings {
            requests_per_window: 100,
            window_seconds: 60,
            burst_allowance: 0,
        },
        cors: CorsSettings {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        environment: "test".to_string(),
    }
}

/// Test application builder
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemorySubmissionRepository>,
}

impl TestApp {
    /// Create a test application backed by an in-memory store.
    pub async fn new() -> Self {
        Self::with_settings(test_settings())
    }

    /// Create a test application with custom settings (e.g. a tight rate limit).
    pub fn with_settings(settings: Settings) -> Self {
        let store = Arc::new(InMemorySubmissionRepository::new());
        let state = AppState {
            store: store.clone(),
            limiter: Arc::new(RateLimiter::from_settings(&settings.rate_limit)),
            settings: Arc::new(settings),
        };

        Self {
            router: create_router(state),
            store,
        }
    }

    /// Create a test application whose storage rejects every insert.
    pub fn with_failing_store() -> Self {
        let settings = test_settings();
        let state = AppState {
            store: Arc::new(FailingSubmissionRepository),
            limiter: Arc::new(RateLimiter::from_settings(&settings.rate_limit)),
            settings: Arc::new(settings),
        };

        Self {
            router: create_router(state),
            // Unused; the failing store keeps no rows.
            store: Arc::new(InMemorySubmissionRepository::new()),
        }
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, uri: &str, body: &str) -> axum::response::Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }
}

/// Read a response body as JSON.
pub async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
