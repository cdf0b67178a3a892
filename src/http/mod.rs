//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, routing: /health, /relay/{key}/{tail...})
//!     → request.rs (request ID generation/propagation)
//!     → [rate limit gate] → [relay pipeline] (relay::*)
//!     → response mirrored to client
//! ```

pub mod request;
pub mod server;

pub use request::{MakeRelayRequestId, X_REQUEST_ID};
pub use server::HttpServer;
