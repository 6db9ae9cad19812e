//! Recommendation Handler
//!
//! `POST /recommendation`: validates the request body, computes policy
//! advice, persists the submission, and returns the advice.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::application::dto::{RecommendationRequest, RecommendationResponse};
use crate::application::services::{SubmissionError, SubmissionService, SubmissionServiceImpl};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Compute and store a policy recommendation.
///
/// The typed `Json` extractor is the validation boundary: a missing field,
/// a non-numeric value, or an unrecognized risk tolerance surfaces as a
/// rejection here and is reported as invalid input before any side effect.
pub async fn create_recommendation(
    State(state): State<AppState>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let Json(body) = payload.map_err(|rejection| {
        tracing::debug!(reason = %rejection.body_text(), "Rejected submission payload");
        AppError::InvalidInput
    })?;

    let profile = body.into_profile();
    let risk_tolerance = profile.risk_tolerance;

    let service = SubmissionServiceImpl::new(state.store.clone());
    let advice = service.submit(profile).await.map_err(|e| match e {
        SubmissionError::Storage(msg) => AppError::Internal(msg),
    })?;

    metrics::record_submission(risk_tolerance.as_str());

    Ok(Json(RecommendationResponse::from(advice)))
}
