//! Repository Implementations
//!
//! PostgreSQL-backed implementations of the domain repository traits.

pub mod submission_repository;

pub use submission_repository::PgSubmissionRepository;
