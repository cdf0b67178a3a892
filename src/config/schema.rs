//! Configuration schema definitions.
//!
//! The relay is configured entirely through environment variables (see
//! [`loader`](crate::config::loader) for names and defaults). This module
//! defines the validated, immutable shape those variables are parsed into.

use std::net::SocketAddr;
use std::time::Duration;

/// Root configuration for the relay.
///
/// Constructed once at startup via [`RelayConfig::from_env`], validated, then
/// shared read-only for the process lifetime.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Listener bind address (e.g. "0.0.0.0:80").
    pub bind_address: SocketAddr,

    /// Upstream base URL, trailing slashes stripped (e.g.
    /// "https://origin.example.com/api").
    pub upstream_base: String,

    /// Connection establishment timeout for the outbound client.
    pub connect_timeout: Duration,

    /// Overall per-attempt timeout for an outbound request.
    pub request_timeout: Duration,

    /// Maximum outbound attempts per inbound request (>= 1).
    pub max_retries: u32,

    /// Shared credential expected in the relay path. Empty means the relay
    /// denies every request (fail closed).
    pub shared_key: String,

    /// Base unit for linear retry backoff (delay = unit * attempt).
    pub backoff_unit: Duration,

    /// Rate limiter settings.
    pub rate_limit: RateLimitConfig,

    /// Optional Prometheus exporter bind address; `None` disables metrics
    /// exposition.
    pub metrics_address: Option<SocketAddr>,
}

/// Fixed-window rate limiting configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Admissions allowed per identity per window.
    pub points: u32,

    /// Window length.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            points: 60,
            window: Duration::from_secs(60),
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_address: ([0, 0, 0, 0], 80).into(),
            upstream_base: "https://irrocloud.example.com".to_string(),
            connect_timeout: Duration::from_millis(5000),
            request_timeout: Duration::from_millis(10_000),
            max_retries: 3,
            shared_key: String::new(),
            backoff_unit: Duration::from_millis(250),
            rate_limit: RateLimitConfig::default(),
            metrics_address: None,
        }
    }
}
