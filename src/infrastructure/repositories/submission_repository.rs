//! Submission Repository Implementation
//!
//! PostgreSQL implementation of submission persistence. The table is
//! insert-only; `id` and `created_at` are assigned by the database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::time::Instant;

use crate::domain::entities::{NewSubmission, Submission, SubmissionRepository};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// PostgreSQL implementation of the SubmissionRepository.
pub struct PgSubmissionRepository {
    pool: PgPool,
}

impl PgSubmissionRepository {
    /// Creates a new PgSubmissionRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionRepository for PgSubmissionRepository {
    /// Insert a single submission row.
    ///
    /// Returns the stored entity with its database-assigned id and
    /// timestamp.
    async fn insert(&self, submission: &NewSubmission) -> Result<Submission, AppError> {
        let start = Instant::now();

        let (id, created_at): (i64, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO user_submissions (age, income, dependents, risk_tolerance, recommendation, explanation)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, created_at
            "#,
        )
        .bind(submission.age)
        .bind(submission.income)
        .bind(submission.dependents)
        .bind(submission.risk_tolerance.as_str())
        .bind(&submission.recommendation)
        .bind(&submission.explanation)
        .fetch_one(&self.pool)
        .await?;

        metrics::record_db_query("insert", "user_submissions", start.elapsed().as_secs_f64());

        Ok(Submission {
            id,
            age: submission.age,
            income: submission.income,
            dependents: submission.dependents,
            risk_tolerance: submission.risk_tolerance,
            recommendation: submission.recommendation.clone(),
            explanation: submission.explanation.clone(),
            created_at,
        })
    }

    /// Check database connectivity.
    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
