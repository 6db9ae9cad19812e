//! Configuration Management
//!
//! Layered application settings: defaults, optional config files, then
//! environment variables.

pub mod settings;

pub use settings::{
    CorsSettings, DatabaseSettings, RateLimitSettings, ServerSettings, Settings,
};
