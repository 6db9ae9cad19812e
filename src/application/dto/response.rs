//! Response DTOs
//!
//! Data structures for API response bodies.

use serde::Serialize;

use crate::domain::services::PolicyAdvice;

/// Successful recommendation response.
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub recommendation: String,
    pub explanation: String,
}

impl From<PolicyAdvice> for RecommendationResponse {
    fn from(advice: PolicyAdvice) -> Self {
        Self {
            recommendation: advice.recommendation,
            explanation: advice.explanation,
        }
    }
}
