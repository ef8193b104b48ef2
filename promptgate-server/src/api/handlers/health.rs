//! Health endpoint handler.

use crate::api::response;
use crate::api::state::AppState;
use bytes::Bytes;
use http_body_util::Full;
use hyper::Response;
use std::sync::Arc;

/// GET /prompt_edit/health
///
/// Returns 200 with the number of sessions currently held.
pub async fn get_health(state: Arc<AppState>) -> Response<Full<Bytes>> {
    let body = serde_json::json!({
        "status": "healthy",
        "service": "promptgate",
        "sessions": state.store.count(),
        "listeners": state.events.subscriber_count(),
        "uptime_secs": state.uptime_secs(),
    });

    response::ok(&body)
}
