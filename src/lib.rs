//! Request-signing gateway library.
//!
//! Every request passing through the gateway gets an `X-Signature` header
//! derived from its raw query string, a configured list of header values and
//! a shared secret, then is forwarded upstream.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod signing;

pub use config::{GatewayConfig, SignerConfig};
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
pub use signing::{Signature, SignatureLayer, Signer};
