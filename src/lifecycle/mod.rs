//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init logging/metrics → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     SIGINT received → broadcast signal → server drains and exits
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
