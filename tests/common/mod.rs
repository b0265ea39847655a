//! Shared utilities for integration tests.

use std::net::SocketAddr;

use axum::{
    http::{HeaderMap, Uri},
    routing::any,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use signing_gateway::config::GatewayConfig;
use signing_gateway::http::GatewayServer;
use signing_gateway::lifecycle::Shutdown;

/// Start an upstream that echoes what it received as JSON:
/// `{ "path", "query", "signature", "headers": { name: value } }`.
pub async fn start_echo_upstream() -> SocketAddr {
    async fn echo(uri: Uri, headers: HeaderMap) -> Json<Value> {
        let all: serde_json::Map<String, Value> = headers
            .iter()
            .map(|(k, v)| {
                (
                    k.as_str().to_string(),
                    Value::String(v.to_str().unwrap_or_default().to_string()),
                )
            })
            .collect();

        Json(json!({
            "path": uri.path(),
            "query": uri.query().unwrap_or(""),
            "signature": headers
                .get("x-signature")
                .and_then(|v| v.to_str().ok()),
            "signature_count": headers.get_all("x-signature").iter().count(),
            "headers": all,
        }))
    }

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new()
        .route("/", any(echo))
        .route("/{*path}", any(echo));

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Start the gateway on an ephemeral port in front of `upstream`.
pub async fn start_gateway(mut config: GatewayConfig, upstream: SocketAddr) -> (SocketAddr, Shutdown) {
    config.upstream.url = format!("http://{upstream}");
    config.listener.bind_address = "127.0.0.1:0".to_string();

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = GatewayServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
