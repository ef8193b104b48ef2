//! JSON response builders for the API.

use bytes::Bytes;
use http_body_util::Full;
use hyper::http::header::{self, HeaderValue};
use hyper::{Response, StatusCode};
use serde::Serialize;

fn build(
    status: StatusCode,
    content_type: Option<&'static str>,
    body: Bytes,
) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    if let Some(content_type) = content_type {
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    }
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

/// Build a JSON response with status code.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    match serde_json::to_string(body) {
        Ok(json) => build(status, Some("application/json"), Bytes::from(json)),
        Err(e) => {
            let fallback = serde_json::json!({
                "status": "error",
                "message": format!("Serialization error: {}", e),
                "code": "E207",
            });
            build(
                StatusCode::INTERNAL_SERVER_ERROR,
                Some("application/json"),
                Bytes::from(fallback.to_string()),
            )
        }
    }
}

/// Build a 200 OK JSON response.
pub fn ok<T: Serialize>(body: &T) -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, body)
}

/// Build the `{"status": "success"}` acknowledgement.
pub fn success() -> Response<Full<Bytes>> {
    ok(&serde_json::json!({ "status": "success" }))
}

/// Build a 204 No Content response.
pub fn no_content() -> Response<Full<Bytes>> {
    build(StatusCode::NO_CONTENT, None, Bytes::new())
}

/// Build a 404 Not Found response for unknown routes.
pub fn not_found() -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "status": "error",
        "message": "Not found",
        "code": "E000",
    });
    json_response(StatusCode::NOT_FOUND, &body)
}

/// Build a 405 Method Not Allowed response.
pub fn method_not_allowed(allowed: &[&str]) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "status": "error",
        "message": format!("Method not allowed. Allowed: {}", allowed.join(", ")),
        "code": "E000",
    });

    let mut response = json_response(StatusCode::METHOD_NOT_ALLOWED, &body);
    if let Ok(value) = HeaderValue::from_str(&allowed.join(", ")) {
        response.headers_mut().insert(header::ALLOW, value);
    }
    response
}
