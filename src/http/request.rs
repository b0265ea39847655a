//! Request identification.
//!
//! # Responsibilities
//! - Assign a UUID v4 `x-request-id` to requests that lack one
//! - Echo the ID back on the response
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - A client-supplied ID is kept, not replaced

use axum::http::Request;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

pub const X_REQUEST_ID: &str = "x-request-id";

/// Layer that generates missing request IDs.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::x_request_id(MakeRequestUuid)
}

/// Layer that copies the request ID onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::x_request_id()
}

/// Request ID for logging, or `"unknown"`.
pub fn request_id<B>(request: &Request<B>) -> &str {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}
