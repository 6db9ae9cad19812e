//! Risk tolerance value object.
//!
//! Caller-declared appetite for financial risk. Used only as a
//! rule-selection key by the recommendation engine and stored verbatim
//! in the `risk_tolerance` column.

use serde::{Deserialize, Serialize};

/// Declared risk appetite. Wire values are case-sensitive: exactly
/// `"Low"`, `"Medium"`, or `"High"`; anything else is rejected at the
/// request boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

impl RiskTolerance {
    /// Database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl std::fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
