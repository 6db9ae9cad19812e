//! Request DTOs
//!
//! Data structures for API request bodies.

use serde::Deserialize;

use crate::domain::services::ApplicantProfile;
use crate::domain::value_objects::RiskTolerance;

/// Recommendation request body.
///
/// Deserialization is the validation boundary: every field is required,
/// the numeric fields must be JSON numbers (integers), and `riskTolerance`
/// must match one of the enum values case-sensitively. A body that fails
/// any of these rules never reaches the service layer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub age: i32,
    pub income: i64,
    pub dependents: i32,
    pub risk_tolerance: RiskTolerance,
}

impl RecommendationRequest {
    /// Convert the validated body into a domain profile.
    pub fn into_profile(self) -> ApplicantProfile {
        ApplicantProfile {
            age: self.age,
            income: self.income,
            dependents: self.dependents,
            risk_tolerance: self.risk_tolerance,
        }
    }
}
