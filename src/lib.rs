//! HTTP→HTTPS forward relay library.
//!
//! Accepts plaintext inbound requests on `/relay/{key}/{tail...}`, validates
//! the shared-key credential embedded in the path, rebuilds the upstream
//! HTTPS URL from the remaining path plus the raw query, and mirrors the
//! upstream's status and body back to the caller.
//!
//! ```text
//! inbound GET ──▶ rate limit ──▶ authorize ──▶ forward (retry+backoff) ──▶ response
//!                  429 │           401 │            504 on exhaustion
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod relay;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod security;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
