//! Rate Limiting Middleware
//!
//! In-process per-client rate limiting using a sliding window. The window
//! state lives in a concurrent map keyed by client identifier, so limits
//! apply per server instance. Volume control across instances is delegated
//! to whatever sits in front of the service.

use std::net::IpAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use dashmap::DashMap;
use serde::Serialize;

use crate::config::RateLimitSettings;
use crate::shared::error::ErrorResponse;
use crate::startup::AppState;

/// Configuration for rate limiting behavior.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Requests allowed per window for each client
    pub requests_per_window: u32,
    /// Window duration in seconds
    pub window_seconds: u64,
    /// Optional burst allowance above the base limit
    pub burst_allowance: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_window: 20,
            window_seconds: 60,
            burst_allowance: 0,
        }
    }
}

/// Information about rate limit status returned to clients.
#[derive(Debug, Serialize)]
pub struct RateLimitInfo {
    /// Maximum requests allowed in the current window
    pub limit: u32,
    /// Remaining requests in the current window
    pub remaining: u32,
    /// Unix timestamp when the rate limit resets
    pub reset_at: i64,
    /// Seconds until the rate limit resets
    pub retry_after: u64,
}

/// Sliding-window rate limiter over an in-memory window table.
///
/// Each entry holds the millisecond timestamps of requests inside the
/// current window. Entries older than the window are pruned on every
/// check, so an empty window never persists.
pub struct RateLimiter {
    windows: DashMap<String, Vec<i64>>,
    config: RateLimitConfig,
}

impl RateLimiter {
    /// Create a rate limiter with the given configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            windows: DashMap::new(),
            config,
        }
    }

    /// Create from application settings.
    pub fn from_settings(settings: &RateLimitSettings) -> Self {
        Self::new(RateLimitConfig {
            requests_per_window: settings.requests_per_window,
            window_seconds: settings.window_seconds,
            burst_allowance: settings.burst_allowance,
        })
    }

    /// Check if a request should be allowed.
    ///
    /// Returns `Ok(RateLimitInfo)` if allowed, `Err(RateLimitInfo)` if rate limited.
    pub fn check(&self, identifier: &str) -> Result<RateLimitInfo, RateLimitInfo> {
        let now_ms = chrono::Utc::now().timestamp_millis();
        let window_ms = (self.config.window_seconds * 1000) as i64;
        let window_start = now_ms - window_ms;
        let max_requests = self.config.requests_per_window + self.config.burst_allowance;

        let mut entry = self.windows.entry(identifier.to_string()).or_default();
        entry.retain(|&ts| ts > window_start);

        let current_count = entry.len() as u32;
        let reset_at = (now_ms / 1000) + self.config.window_seconds as i64;

        if current_count < max_requests {
            entry.push(now_ms);
            Ok(RateLimitInfo {
                limit: max_requests,
                remaining: max_requests - (current_count + 1),
                reset_at,
                retry_after: 0,
            })
        } else {
            // Oldest entry determines when a slot frees up
            let retry_ms = entry
                .first()
                .map(|&oldest| oldest + window_ms - now_ms)
                .unwrap_or(0)
                .max(0);

            Err(RateLimitInfo {
                limit: max_requests,
                remaining: 0,
                reset_at,
                retry_after: ((retry_ms as f64) / 1000.0).ceil() as u64,
            })
        }
    }
}

/// Extract the rate limit identifier from a request.
///
/// Priority:
/// 1. X-Forwarded-For header (for reverse proxy setups)
/// 2. X-Real-IP header (common with nginx)
/// 3. Client IP address (fallback)
fn extract_identifier(request: &Request, client_ip: Option<IpAddr>) -> String {
    // First IP in the X-Forwarded-For chain is the original client.
    // The header can be spoofed if not behind a trusted proxy.
    if let Some(forwarded_for) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
    {
        if let Some(first_ip) = forwarded_for.split(',').next() {
            let ip = first_ip.trim();
            if ip.parse::<IpAddr>().is_ok() {
                return format!("ip:{}", ip);
            }
        }
    }

    if let Some(real_ip) = request
        .headers()
        .get("x-real-ip")
        .and_then(|h| h.to_str().ok())
    {
        if real_ip.parse::<IpAddr>().is_ok() {
            return format!("ip:{}", real_ip);
        }
    }

    match client_ip {
        Some(ip) => format!("ip:{}", ip),
        None => {
            tracing::warn!("Could not determine client identifier for rate limiting");
            "ip:unknown".to_string()
        }
    }
}

/// Rate limiting middleware for the submission endpoint.
pub async fn rate_limit_submissions(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    // ConnectInfo is read from request extensions (where
    // `into_make_service_with_connect_info` inserts it); absent in tests
    // that drive the router directly, yielding `None` as before.
    let client_ip = request
        .extensions()
        .get::<ConnectInfo<std::net::SocketAddr>>()
        .map(|ci| ci.0.ip());
    let identifier = extract_identifier(&request, client_ip);

    match state.limiter.check(&identifier) {
        Ok(info) => {
            let mut response = next.run(request).await;
            add_rate_limit_headers(response.headers_mut(), &info);
            response
        }
        Err(info) => {
            tracing::warn!(identifier = %identifier, "Rate limit exceeded");
            create_rate_limit_response(info)
        }
    }
}

/// Add rate limit headers to a response.
fn add_rate_limit_headers(headers: &mut header::HeaderMap, info: &RateLimitInfo) {
    if let Ok(v) = header::HeaderValue::from_str(&info.limit.to_string()) {
        headers.insert("X-RateLimit-Limit", v);
    }
    if let Ok(v) = header::HeaderValue::from_str(&info.remaining.to_string()) {
        headers.insert("X-RateLimit-Remaining", v);
    }
    if let Ok(v) = header::HeaderValue::from_str(&info.reset_at.to_string()) {
        headers.insert("X-RateLimit-Reset", v);
    }
}

/// Create a 429 Too Many Requests response.
fn create_rate_limit_response(info: RateLimitInfo) -> Response {
    let body = ErrorResponse {
        error: "Too many requests from this IP, please try again after a minute.".to_string(),
    };

    let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();

    if let Ok(v) = header::HeaderValue::from_str(&info.retry_after.to_string()) {
        response.headers_mut().insert(header::RETRY_AFTER, v);
    }
    add_rate_limit_headers(response.headers_mut(), &info);

    response
}
