//! Response handling and error mapping.
//!
//! # Responsibilities
//! - Define the request-level error taxonomy
//! - Map each error to a status code and a short fixed body
//!
//! # Design Decisions
//! - Errors are handled where they are detected; none escapes the request
//! - The body never carries paths or error details, only the status text;
//!   details go to the log

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};

/// Request-level failures.
///
/// The payload is for logging only and never reaches the client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServeError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("method {0} not allowed")]
    MethodNotAllowed(Method),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServeError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServeError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServeError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ServeError::NotFound(_) => StatusCode::NOT_FOUND,
            ServeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body text shown to the client.
    pub fn public_message(&self) -> &'static str {
        match self {
            ServeError::BadRequest(_) => "Bad request",
            ServeError::MethodNotAllowed(_) => "Method not allowed",
            ServeError::NotFound(_) => "Not found",
            ServeError::Internal(_) => "Internal server error",
        }
    }
}

impl IntoResponse for ServeError {
    fn into_response(self) -> Response {
        let mut response = (self.status(), self.public_message()).into_response();
        if let ServeError::MethodNotAllowed(_) = self {
            response
                .headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static("GET"));
        }
        response
    }
}

/// Wrap a rendered page.
pub fn html(body: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"))],
        body,
    )
        .into_response()
}
