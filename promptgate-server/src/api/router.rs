//! Request routing for the API.
//!
//! Routes requests to handlers based on method and path.

use super::handlers;
use super::response;
use super::state::AppState;
use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Route prefix for all endpoints.
pub const API_PREFIX: &str = "/prompt_edit";

/// Route an incoming request to the appropriate handler.
pub async fn route(
    req: Request<Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let path = req.uri().path().to_string();
    let method = req.method().clone();

    tracing::debug!(method = %method, path = %path, "Routing request");

    let Some(path) = path.strip_prefix(API_PREFIX) else {
        return Ok(response::not_found());
    };

    let response = match (method, path) {
        (Method::POST, "/update") => handlers::sessions::update(req, state).await,
        (Method::POST, "/confirm") => handlers::sessions::confirm(req, state).await,
        (Method::POST, "/cancel") => handlers::sessions::cancel(req, state).await,
        (_, "/update" | "/confirm" | "/cancel") => response::method_not_allowed(&["POST"]),

        (Method::GET, "/pending") => handlers::sessions::pending(state).await,
        (Method::GET, "/events") => handlers::events::next(req, state).await,
        (Method::GET, "/health") => handlers::health::get_health(state).await,
        (_, "/pending" | "/events" | "/health") => response::method_not_allowed(&["GET"]),

        (Method::GET, p) if p.starts_with("/sessions/") => {
            let session_id = p.strip_prefix("/sessions/").unwrap_or("");
            if session_id.is_empty() || session_id.contains('/') {
                response::not_found()
            } else {
                handlers::sessions::get(state, session_id).await
            }
        }
        (_, p) if p.starts_with("/sessions/") => response::method_not_allowed(&["GET"]),

        _ => response::not_found(),
    };

    Ok(response)
}
