//! Value Objects
//!
//! Immutable value types used across the domain.

pub mod risk_tolerance;

pub use risk_tolerance::RiskTolerance;
