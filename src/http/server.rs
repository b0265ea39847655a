//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the forwarding handler
//! - Wire up middleware (tracing, request ID, timeout, signing)
//! - Forward signed requests to the upstream service
//! - Bind server to listener and shut down gracefully

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use url::Url;

use crate::config::GatewayConfig;
use crate::http::request::{propagate_request_id_layer, request_id, set_request_id_layer};
use crate::lifecycle::shutdown;
use crate::observability::metrics;
use crate::signing::SignatureLayer;

/// Errors raised while building or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid upstream url '{url}': {reason}")]
    InvalidUpstream { url: String, reason: String },

    #[error("server I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Where forwarded requests go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstream {
    scheme: String,
    authority: String,
    base_path: String,
}

impl Upstream {
    pub fn parse(raw: &str) -> Result<Self, ServerError> {
        let invalid = |reason: String| ServerError::InvalidUpstream {
            url: raw.to_string(),
            reason,
        };

        let url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
        let host = url
            .host_str()
            .ok_or_else(|| invalid("missing host".to_string()))?;
        let authority = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        Ok(Self {
            scheme: url.scheme().to_string(),
            authority,
            base_path: url.path().trim_end_matches('/').to_string(),
        })
    }

    /// Rewrite an incoming URI onto the upstream, keeping the raw query.
    pub fn uri_for(&self, incoming: &Uri) -> Result<Uri, axum::http::Error> {
        let tail = incoming
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");

        Uri::builder()
            .scheme(self.scheme.as_str())
            .authority(self.authority.as_str())
            .path_and_query(format!("{}{}", self.base_path, tail))
            .build()
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: Arc<Upstream>,
    pub client: Client<HttpConnector, Body>,
}

/// HTTP server for the signing gateway.
pub struct GatewayServer {
    router: Router,
    config: GatewayConfig,
}

impl GatewayServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// The signer config is moved into the signing layer here; each server
    /// owns its own copy.
    pub fn new(config: GatewayConfig) -> Result<Self, ServerError> {
        let upstream = Arc::new(Upstream::parse(&config.upstream.url)?);
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = AppState { upstream, client };
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The signing layer is innermost so nothing after it can alter the
    /// signed headers before forwarding.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(SignatureLayer::new(config.signer.clone()))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The assembled router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Forward a signed request to the upstream and relay its response.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start = Instant::now();
    let request_id = request_id(&request).to_string();
    let method = request.method().to_string();

    let (mut parts, body) = request.into_parts();
    parts.uri = match state.upstream.uri_for(&parts.uri) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Failed to build upstream URI");
            metrics::record_request(&method, 502, start);
            return (StatusCode::BAD_GATEWAY, "Invalid upstream URI").into_response();
        }
    };

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        uri = %parts.uri,
        "Forwarding request"
    );

    match state.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            metrics::record_request(&method, response.status().as_u16(), start);
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Upstream error");
            metrics::record_request(&method, 502, start);
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}
