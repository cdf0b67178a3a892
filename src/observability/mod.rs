//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured tracing events, request-id correlated)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout log aggregation
//!     → Prometheus scrape endpoint (optional, METRICS_ADDRESS)
//! ```
//!
//! # Design Decisions
//! - Logging is fire-and-forget; the relay never blocks on the sink
//! - Error responses carry fixed bodies; detail goes to the log only
//! - Metric updates are cheap atomic operations

pub mod logging;
pub mod metrics;
