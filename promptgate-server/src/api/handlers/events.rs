//! Long-poll endpoint delivering session events to clients.

use crate::api::request;
use crate::api::response;
use crate::api::state::AppState;
use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::{Request, Response};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;

/// Default time a long-poll request is held open.
const DEFAULT_WAIT_MS: u64 = 25_000;

/// Longest a client may ask to be held.
const MAX_WAIT_MS: u64 = 60_000;

fn wait_duration(query: &str) -> Duration {
    let ms = request::query_param(query, "timeout_ms")
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_WAIT_MS)
        .min(MAX_WAIT_MS);
    Duration::from_millis(ms)
}

/// GET /prompt_edit/events?timeout_ms=N
///
/// Returns the next session event as `{"type": "prompt_edit_session", "data": {...}}`,
/// or 204 if none arrives in time. Events sent while no request is waiting
/// are not replayed; clients recover them from `/prompt_edit/pending`.
pub async fn next(req: Request<Incoming>, state: Arc<AppState>) -> Response<Full<Bytes>> {
    let wait = wait_duration(req.uri().query().unwrap_or(""));
    let mut rx = state.events.subscribe();

    let received = tokio::time::timeout(wait, async {
        loop {
            match rx.recv().await {
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Event listener lagged");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    })
    .await;

    match received {
        Ok(Some(event)) => response::ok(&event.to_message()),
        Ok(None) | Err(_) => response::no_content(),
    }
}
