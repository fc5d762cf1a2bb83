//! Request identification and tracing.
//!
//! # Responsibilities
//! - Generate a UUID request ID unless the caller sent one
//! - Open one span per request carrying method, URI and request ID
//!
//! # Design Decisions
//! - Request ID added as early as possible (outermost layer) for tracing
//! - The same ID is echoed back on the response

use axum::{body::Body, http::Request};
use tracing::Span;

/// Header carrying the request ID in both directions.
pub const X_REQUEST_ID: &str = "x-request-id";

/// The request ID assigned to `request`, if any.
pub fn request_id<B>(request: &Request<B>) -> Option<&str> {
    request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
}

/// Span for one HTTP request.
pub fn make_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id(request).unwrap_or("-"),
    )
}
