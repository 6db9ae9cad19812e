//! Domain Entities
//!
//! Core entities and their repository traits.

pub mod submission;

pub use submission::{NewSubmission, Submission, SubmissionRepository};

#[cfg(test)]
pub use submission::MockSubmissionRepository;
