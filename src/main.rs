//! Request-signing gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────────┐
//!                    │                  SIGNING GATEWAY                      │
//!  Client Request    │  ┌──────────┐   ┌──────────┐   ┌──────────────────┐  │
//!  ──────────────────┼─▶│ trace +  │──▶│ timeout  │──▶│     signer       │  │
//!                    │  │request id│   │          │   │ (X-Signature)    │  │
//!                    │  └──────────┘   └──────────┘   └────────┬─────────┘  │
//!                    │                                          ▼            │
//!  Client Response   │                                 ┌──────────────────┐  │
//!  ◀─────────────────┼─────────────────────────────────│  proxy handler   │──┼──▶ Upstream
//!                    │                                 └──────────────────┘  │
//!                    └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use signing_gateway::config::{load_config, GatewayConfig};
use signing_gateway::config::validation::validate_config;
use signing_gateway::lifecycle::startup;
use signing_gateway::observability::logging;

#[derive(Parser)]
#[command(name = "signing-gateway")]
#[command(about = "HTTP gateway that signs requests before forwarding them", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(long)]
    bind: Option<String>,

    /// Override the upstream URL.
    #[arg(long)]
    upstream: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }
    if let Some(upstream) = args.upstream {
        config.upstream.url = upstream;
    }
    validate_config(&config).map_err(signing_gateway::config::ConfigError::Validation)?;

    logging::init(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_file = ?args.config,
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        "signing-gateway starting"
    );

    startup::run(config).await?;
    Ok(())
}
