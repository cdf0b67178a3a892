//! Relay pipeline subsystem.
//!
//! # Data Flow
//! ```text
//! GET /relay/{key}/{tail...}?query
//!     → target.rs (credential check, upstream URL construction)
//!     → forward.rs (outbound attempt loop with linear backoff)
//!     → http::server (status/body mirrored to the caller)
//! ```

pub mod forward;
pub mod target;

pub use forward::{Forwarder, RelayResult};
pub use target::{authorize, target_url};
