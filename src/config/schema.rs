//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Secret used when none is configured. Real deployments must override it.
pub const DEFAULT_SECRET_KEY: &str = "test";

/// Root configuration for the signing gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Where signed requests are forwarded.
    pub upstream: UpstreamConfig,

    /// Request signing settings.
    pub signer: SignerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the service that verifies signatures (e.g., "http://127.0.0.1:3000").
    pub url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:3000".to_string(),
        }
    }
}

/// Request signing configuration.
///
/// Field aliases accept the camelCase keys used by existing plugin configs.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SignerConfig {
    /// Instance name used in logs.
    pub name: String,

    /// Shared secret appended to every signing payload.
    #[serde(alias = "secretKey")]
    pub secret_key: String,

    /// Header names whose values are signed, in this order.
    pub headers: Vec<String>,
}

impl SignerConfig {
    /// True when the secret was left at its default or cleared.
    pub fn has_weak_secret(&self) -> bool {
        self.secret_key.is_empty() || self.secret_key == DEFAULT_SECRET_KEY
    }

    /// Copy of this config safe to print or serialize.
    pub fn redacted(&self) -> Self {
        Self {
            secret_key: "<redacted>".to_string(),
            ..self.clone()
        }
    }
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            name: "signature".to_string(),
            // WARNING: This is a placeholder! Change this in production.
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            headers: vec![
                "X-Date".to_string(),
                "Authorization".to_string(),
                "APP-ID".to_string(),
            ],
        }
    }
}

impl fmt::Debug for SignerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignerConfig")
            .field("name", &self.name)
            .field("secret_key", &"<redacted>")
            .field("headers", &self.headers)
            .finish()
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_plugin_defaults() {
        let config = SignerConfig::default();
        assert_eq!(config.secret_key, "test");
        assert_eq!(config.headers, vec!["X-Date", "Authorization", "APP-ID"]);
        assert!(config.has_weak_secret());
    }

    #[test]
    fn defaults_are_independent_values() {
        let mut first = GatewayConfig::default();
        first.signer.headers.clear();
        first.signer.secret_key = "changed".into();

        let second = GatewayConfig::default();
        assert_eq!(second.signer.headers.len(), 3);
        assert_eq!(second.signer.secret_key, DEFAULT_SECRET_KEY);
    }

    #[test]
    fn debug_never_prints_secret() {
        let config = SignerConfig {
            secret_key: "hunter2".into(),
            ..SignerConfig::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
        assert!(!format!("{:?}", config.redacted()).contains("hunter2"));
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config: GatewayConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.signer.headers.len(), 3);
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
    }

    #[test]
    fn camel_case_secret_key_is_accepted() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [signer]
            secretKey = "s3cret"
            headers = []
            "#,
        )
        .unwrap();
        assert_eq!(config.signer.secret_key, "s3cret");
        assert!(config.signer.headers.is_empty());
        assert_eq!(config.signer.name, "signature");
    }
}
