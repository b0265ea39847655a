//! The signing stage of the handler chain.
//!
//! # Responsibilities
//! - Derive the request signature from query string, configured headers and secret
//! - Write it to `X-Signature`, replacing any value the client sent
//! - Forward the request to the next stage, always exactly once
//!
//! # Design Decisions
//! - `Signer` is immutable after construction and shared via `Arc`
//! - The chain link is a tower `Layer`/`Service` pair wrapping the next service
//! - There is no rejection path; responses and errors come from the inner service

use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::Request;
use tower::{Layer, Service};

use crate::config::SignerConfig;
use crate::observability::metrics;
use crate::signing::signature::{signing_payload, Signature, SIGNATURE_HEADER};

/// Computes and attaches request signatures.
#[derive(Debug, Clone)]
pub struct Signer {
    config: Arc<SignerConfig>,
}

impl Signer {
    /// Create a signer owning its configuration.
    ///
    /// The configuration is accepted as-is. An empty secret or an empty header
    /// list only weakens the signature.
    pub fn new(config: SignerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    /// Compute the signature for a request without modifying it.
    pub fn signature_for<B>(&self, request: &Request<B>) -> Signature {
        let query = request.uri().query().unwrap_or("");
        let payload = signing_payload(
            query,
            request.headers(),
            &self.config.headers,
            &self.config.secret_key,
        );
        Signature::compute(&payload)
    }

    /// Sign a request in place, overwriting any existing `X-Signature`.
    pub fn sign<B>(&self, request: &mut Request<B>) -> Signature {
        let signature = self.signature_for(request);
        if let Some(value) = signature.to_header_value() {
            request.headers_mut().insert(SIGNATURE_HEADER, value);
        }

        tracing::debug!(
            signer = %self.config.name,
            path = %request.uri().path(),
            signature = %signature,
            "Request signed"
        );
        signature
    }
}

/// Layer that inserts a [`Signer`] in front of the wrapped service.
#[derive(Debug, Clone)]
pub struct SignatureLayer {
    signer: Signer,
}

impl SignatureLayer {
    pub fn new(config: SignerConfig) -> Self {
        Self {
            signer: Signer::new(config),
        }
    }

    pub fn from_signer(signer: Signer) -> Self {
        Self { signer }
    }
}

impl<S> Layer<S> for SignatureLayer {
    type Service = SignatureService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SignatureService {
            signer: self.signer.clone(),
            inner,
        }
    }
}

/// Service that signs each request and hands it to `inner`.
#[derive(Debug, Clone)]
pub struct SignatureService<S> {
    signer: Signer,
    inner: S,
}

impl<S> SignatureService<S> {
    pub fn new(signer: Signer, inner: S) -> Self {
        Self { signer, inner }
    }

    pub fn signer(&self) -> &Signer {
        &self.signer
    }
}

impl<S, B> Service<Request<B>> for SignatureService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<B>) -> Self::Future {
        self.signer.sign(&mut request);
        metrics::record_signed();
        self.inner.call(request)
    }
}
