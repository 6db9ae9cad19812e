//! Policy recommendation domain service.
//!
//! Maps an applicant profile to a policy recommendation through an ordered
//! set of guard rules. The function is pure and total: out-of-range ages and
//! negative incomes flow through the arithmetic unchanged, and identical
//! input always produces identical output.

use crate::domain::value_objects::RiskTolerance;

/// Validated applicant attributes fed into the rule engine.
///
/// Advertised ranges (age 1-120, dependents 0-10, non-negative income) are
/// UI hints only and are not enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplicantProfile {
    pub age: i32,
    pub income: i64,
    pub dependents: i32,
    pub risk_tolerance: RiskTolerance,
}

/// A policy recommendation paired with the rationale of the matched rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyAdvice {
    /// Policy type, coverage amount, and term length where applicable.
    pub recommendation: String,
    /// Fixed rationale string for the matched branch.
    pub explanation: String,
}

/// Domain service selecting a policy for an applicant profile.
pub struct RecommendationEngine;

impl RecommendationEngine {
    /// Produce a recommendation and explanation for the given profile.
    ///
    /// Rules are evaluated in order and the first match wins. The young +
    /// high-risk rule must be checked before the general under-40 rule
    /// since the guards overlap.
    pub fn recommend(profile: &ApplicantProfile) -> PolicyAdvice {
        let (mut recommendation, explanation) = if profile.age < 40
            && profile.risk_tolerance == RiskTolerance::High
        {
            (
                format!("Term Life – ${} for 20 years", profile.income * 10),
                "You're young with high risk tolerance, so a high-value, longer term life policy fits you.",
            )
        } else if profile.age < 40 {
            (
                format!("Term Life – ${} for 20 years", profile.income * 7),
                "You're young; a standard term life plan provides affordable protection for your family.",
            )
        } else if profile.risk_tolerance == RiskTolerance::Low {
            (
                format!("Whole Life – ${}", profile.income * 5),
                "You prefer lower risk and steady protection, so whole life insurance fits your needs.",
            )
        } else {
            (
                format!("Term Life – ${} for 10 years", profile.income * 5),
                "A shorter term life plan fits your profile for flexibility and protection.",
            )
        };

        if profile.dependents > 2 {
            recommendation.push_str(" (Increased coverage due to multiple dependents)");
        }

        PolicyAdvice {
            recommendation,
            explanation: explanation.to_string(),
        }
    }
}
