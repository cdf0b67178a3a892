//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming relay request:
//!     → rate_limit.rs (fixed-window per-IP admission)
//!     → relay pipeline (credential check happens in relay::target)
//! ```
//!
//! # Design Decisions
//! - Fail closed: an empty shared key denies every relay request
//! - The limiter guards only the relay pipeline; /health and unmatched
//!   paths consume no quota

pub mod rate_limit;

pub use rate_limit::{rate_limit_middleware, RateLimiter};
