//! API error type and GateError → HTTP status mapping.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use promptgate_core::GateError;

use super::response;

/// API error with HTTP status code and error code.
#[derive(Debug)]
pub struct ApiError {
    /// Error code (e.g., "E201").
    pub code: &'static str,
    /// Human-readable error message.
    pub message: String,
    /// HTTP status code.
    pub status: StatusCode,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: &'static str, message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            code,
            message: message.into(),
            status,
        }
    }

    /// Create a 404 Not Found error.
    pub fn not_found(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(code, message, StatusCode::NOT_FOUND)
    }

    /// Create a 500 Internal Server Error.
    pub fn internal(code: &'static str, message: impl Into<String>) -> Self {
        Self::new(code, message, StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Convert to HTTP response.
    ///
    /// Body: `{"status": "error", "message": ..., "code": ...}`.
    pub fn into_response(self) -> Response<Full<Bytes>> {
        let body = serde_json::json!({
            "status": "error",
            "message": self.message,
            "code": self.code,
        });

        response::json_response(self.status, &body)
    }
}

impl From<GateError> for ApiError {
    fn from(err: GateError) -> Self {
        let code = err.code();
        let message = err.to_string();

        let status = match &err {
            GateError::SessionNotFound { .. } => StatusCode::NOT_FOUND,
            // Malformed payloads are reported as processing errors.
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        Self {
            code,
            message,
            status,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
