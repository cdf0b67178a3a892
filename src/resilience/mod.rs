//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream:
//!     → relay::forward (per-attempt deadline on the outbound call)
//!     → On transport failure: backoff.rs delay, then next attempt
//!     → Out of attempts: request surfaces as 504
//! ```
//!
//! # Design Decisions
//! - Every outbound attempt has a deadline; there is no unbounded wait
//! - Only transport failures retry; a received HTTP status is terminal
//! - Backoff is deterministic linear, so total retry latency is predictable

pub mod backoff;
