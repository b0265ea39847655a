//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → SignerConfig moved into the signing layer at router assembly
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Defaults are plain values built per assembly, never shared globals

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    GatewayConfig, ListenerConfig, LogFormat, ObservabilityConfig, SignerConfig, TimeoutConfig,
    UpstreamConfig,
};
