//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID assigned and propagated)
//!     → signing layer (X-Signature attached)
//!     → server.rs proxy handler (forward to upstream)
//!     → Send upstream response to client
//! ```

pub mod request;
pub mod server;

pub use request::{request_id, X_REQUEST_ID};
pub use server::{GatewayServer, ServerError};
