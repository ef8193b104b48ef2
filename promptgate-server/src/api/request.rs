//! Request body and query helpers.

use http_body_util::{BodyExt, Limited};
use hyper::body::Incoming;
use hyper::Request;
use promptgate_core::GateError;
use serde::de::DeserializeOwned;

/// Largest accepted request body.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Read the whole request body and parse it as JSON.
///
/// # Errors
///
/// Returns `MalformedRequest` if the body is too large, cannot be read, or
/// does not match `T` (including missing required fields).
pub async fn read_body_json<T: DeserializeOwned>(req: Request<Incoming>) -> Result<T, GateError> {
    let body = Limited::new(req.into_body(), MAX_BODY_BYTES)
        .collect()
        .await
        .map_err(|e| GateError::MalformedRequest {
            cause: format!("failed to read body: {}", e),
        })?
        .to_bytes();

    parse_json(&body)
}

/// Parse a JSON payload, mapping failures to `MalformedRequest`.
pub fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, GateError> {
    if body.is_empty() {
        return Err(GateError::MalformedRequest {
            cause: "empty request body".to_string(),
        });
    }

    serde_json::from_slice(body).map_err(|e| GateError::MalformedRequest {
        cause: e.to_string(),
    })
}

/// Find a query parameter value by key.
pub fn query_param<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}
