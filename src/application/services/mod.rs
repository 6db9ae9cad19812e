//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **SubmissionService**: Computes policy advice and persists submissions

pub mod submission_service;

// Re-export submission service types
pub use submission_service::{SubmissionError, SubmissionService, SubmissionServiceImpl};
