//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, upstream URL and value ranges
//! - Report signer settings that weaken signatures without rejecting them
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - The signer block is never rejected; a weak secret is a warning

use std::net::SocketAddr;

use axum::http::HeaderName;
use thiserror::Error;
use url::Url;

use crate::config::schema::{GatewayConfig, SignerConfig};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid listener bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("invalid upstream url '{url}': {reason}")]
    InvalidUpstream { url: String, reason: String },

    #[error("request timeout must be greater than zero")]
    ZeroRequestTimeout,

    #[error("invalid metrics address '{0}'")]
    InvalidMetricsAddress(String),
}

/// Check a configuration, collecting every error found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if let Err(reason) = check_upstream(&config.upstream.url) {
        errors.push(ValidationError::InvalidUpstream {
            url: config.upstream.url.clone(),
            reason,
        });
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_upstream(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if url.scheme() != "http" {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    Ok(())
}

/// Configured header names that can never match a request header.
pub fn unusable_header_names(config: &SignerConfig) -> Vec<&str> {
    config
        .headers
        .iter()
        .map(String::as_str)
        .filter(|name| HeaderName::from_bytes(name.as_bytes()).is_err())
        .collect()
}

/// Log warnings for signer settings that make signatures weak.
pub fn warn_weak_signer(config: &SignerConfig) {
    if config.secret_key.is_empty() {
        tracing::warn!(signer = %config.name, "Signer secret is empty; signatures carry no secret");
    } else if config.has_weak_secret() {
        tracing::warn!(signer = %config.name, "Signer is using the default secret; override it in production");
    }

    if config.headers.is_empty() {
        tracing::info!(signer = %config.name, "No headers configured; signing query string only");
    }

    for name in unusable_header_names(config) {
        tracing::warn!(signer = %config.name, header = %name, "Configured header name is not a valid HTTP header and will never be signed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&GatewayConfig::default()), Ok(()));
    }

    #[test]
    fn collects_all_errors() {
        let mut config = GatewayConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.upstream.url = "ftp://example.com".into();
        config.timeouts.request_secs = 0;
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "nowhere".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroRequestTimeout));
        assert!(errors.contains(&ValidationError::InvalidBindAddress("not-an-address".into())));
    }

    #[test]
    fn metrics_address_ignored_when_disabled() {
        let mut config = GatewayConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn upstream_must_be_absolute_http() {
        let mut config = GatewayConfig::default();
        config.upstream.url = "127.0.0.1:3000".into();
        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(errors[0], ValidationError::InvalidUpstream { .. }));
    }

    #[test]
    fn weak_signer_is_not_an_error() {
        let mut config = GatewayConfig::default();
        config.signer.secret_key.clear();
        config.signer.headers.clear();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn detects_unusable_header_names() {
        let config = SignerConfig {
            headers: vec!["X-Date".into(), "bad header".into(), "".into()],
            ..SignerConfig::default()
        };
        assert_eq!(unusable_header_names(&config), vec!["bad header", ""]);
    }
}
