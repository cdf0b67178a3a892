//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment
//!     → loader.rs (read variables, apply defaults, parse)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; there is no reload path
//! - Every variable has a documented default so an empty environment boots
//! - Validation separates parse failures (per-variable) from semantic checks,
//!   and reports all semantic errors at once

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::ConfigError;
pub use schema::{RateLimitConfig, RelayConfig};
