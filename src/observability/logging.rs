//! Structured logging.
//!
//! `RUST_LOG` takes precedence over the configured level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

/// Build the filter for a configured level, e.g. `info` becomes
/// `signing_gateway=info,tower_http=info`.
pub fn env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "signing_gateway={level},tower_http={level}",
            level = config.log_level
        )
        .into()
    })
}

/// Install the global subscriber. Calling it twice is a no-op.
pub fn init(config: &ObservabilityConfig) {
    let registry = tracing_subscriber::registry().with(env_filter(config));

    let result = match config.log_format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
