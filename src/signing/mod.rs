//! Request signing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request
//!     → signer.rs (SignatureService: read query + configured headers)
//!     → signature.rs (build payload, SHA-256, lowercase hex)
//!     → X-Signature header set on the request
//!     → next service in the chain (upstream forwarder)
//! ```

pub mod signature;
pub mod signer;

pub use signature::{signing_payload, Signature, SIGNATURE_HEADER};
pub use signer::{SignatureLayer, SignatureService, Signer};
