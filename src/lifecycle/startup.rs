//! Startup orchestration.
//!
//! # Responsibilities
//! - Report weak signer settings
//! - Start the metrics exporter when enabled
//! - Bind the listener and serve until a shutdown signal arrives
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::io;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::validation::warn_weak_signer;
use crate::config::GatewayConfig;
use crate::http::server::ServerError;
use crate::http::GatewayServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::metrics;

/// Errors that stop the gateway from starting or running.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("server I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Run the gateway until SIGINT/SIGTERM.
pub async fn run(config: GatewayConfig) -> Result<(), GatewayError> {
    warn_weak_signer(&config.signer);

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| GatewayError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    tracing::info!(
        address = %listener.local_addr()?,
        upstream = %config.upstream.url,
        signer = %config.signer.name,
        signed_headers = ?config.signer.headers,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let server = GatewayServer::new(config)?;
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let signal = signals::wait_for_signal();
    tokio::pin!(signal);
    let finished = tokio::select! {
        _ = &mut signal => None,
        result = &mut server_task => Some(result),
    };
    let result = match finished {
        Some(result) => result,
        None => {
            shutdown.trigger();
            server_task.await
        }
    };

    match result {
        Ok(result) => result?,
        Err(e) => tracing::error!(error = %e, "Server task failed"),
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
