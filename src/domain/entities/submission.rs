//! Submission entity and repository trait.
//!
//! Maps to the `user_submissions` table. A submission captures the four
//! applicant inputs together with the advice computed for them; rows exist
//! only for requests that passed validation and produced a recommendation,
//! so `recommendation` and `explanation` are never empty.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::services::{ApplicantProfile, PolicyAdvice};
use crate::domain::value_objects::RiskTolerance;
use crate::shared::error::AppError;

/// A persisted submission row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// BIGSERIAL primary key
    pub id: i64,

    pub age: i32,
    pub income: i64,
    pub dependents: i32,
    pub risk_tolerance: RiskTolerance,

    /// Advice returned to the caller at submission time
    pub recommendation: String,
    pub explanation: String,

    /// Timestamp assigned by the database on insert
    pub created_at: DateTime<Utc>,
}

/// Input for inserting a new submission row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    pub age: i32,
    pub income: i64,
    pub dependents: i32,
    pub risk_tolerance: RiskTolerance,
    pub recommendation: String,
    pub explanation: String,
}

impl NewSubmission {
    /// Combine an applicant profile with the advice computed for it.
    pub fn from_parts(profile: &ApplicantProfile, advice: &PolicyAdvice) -> Self {
        Self {
            age: profile.age,
            income: profile.income,
            dependents: profile.dependents,
            risk_tolerance: profile.risk_tolerance,
            recommendation: advice.recommendation.clone(),
            explanation: advice.explanation.clone(),
        }
    }
}

/// Repository trait for submission persistence.
///
/// Submissions are insert-only; no update or delete operations exist.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Insert a single submission row and return it with its id and
    /// server-assigned timestamp.
    async fn insert(&self, submission: &NewSubmission) -> Result<Submission, AppError>;

    /// Check that the backing store is reachable (readiness probe).
    async fn ping(&self) -> Result<(), AppError>;
}
