//! Request identification.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for every request
//! - Read it back in handlers for log correlation
//!
//! # Design Decisions
//! - Request ID added as early as possible (outermost layer) for tracing
//! - An ID supplied by the client in `x-request-id` is kept as-is

use axum::http::{HeaderMap, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates `x-request-id` values.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// The request ID carried in `headers`, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}
