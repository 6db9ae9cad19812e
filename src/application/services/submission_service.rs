//! Submission Service
//!
//! Runs the recommendation engine for a validated applicant profile and
//! persists the resulting submission.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::{NewSubmission, SubmissionRepository};
use crate::domain::services::{ApplicantProfile, PolicyAdvice, RecommendationEngine};

/// Submission service trait for dependency injection
#[async_trait]
pub trait SubmissionService: Send + Sync {
    /// Compute advice for the profile and store the submission.
    ///
    /// Exactly one row is inserted per successful call. If the insert
    /// fails, the error is logged and the call fails as a whole; the
    /// computed advice is not returned.
    async fn submit(&self, profile: ApplicantProfile) -> Result<PolicyAdvice, SubmissionError>;
}

/// Submission errors
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Failed to persist submission: {0}")]
    Storage(String),
}

/// SubmissionService implementation
pub struct SubmissionServiceImpl {
    store: Arc<dyn SubmissionRepository>,
}

impl SubmissionServiceImpl {
    /// Create a new SubmissionServiceImpl
    pub fn new(store: Arc<dyn SubmissionRepository>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SubmissionService for SubmissionServiceImpl {
    async fn submit(&self, profile: ApplicantProfile) -> Result<PolicyAdvice, SubmissionError> {
        // The engine is total; only the insert can fail.
        let advice = RecommendationEngine::recommend(&profile);

        let record = NewSubmission::from_parts(&profile, &advice);
        self.store.insert(&record).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to persist submission");
            SubmissionError::Storage(e.to_string())
        })?;

        tracing::debug!(
            age = profile.age,
            risk_tolerance = %profile.risk_tolerance,
            "Submission stored"
        );

        Ok(advice)
    }
}
