//! Session endpoints: update, confirm, cancel, and read-only lookups.
//!
//! These handlers mutate sessions but never delete them; removal belongs to
//! the waiting gate.

use crate::api::error::ApiError;
use crate::api::request;
use crate::api::response;
use crate::api::state::AppState;
use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::{Request, Response};
use promptgate_core::{GateError, Session, SessionId, SessionStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Body of `POST /prompt_edit/update` and `POST /prompt_edit/confirm`.
#[derive(Debug, Deserialize)]
pub(crate) struct EditRequest {
    /// Session to modify.
    session_id: String,
    /// New working text.
    edited_text: String,
}

/// Body of `POST /prompt_edit/cancel`.
#[derive(Debug, Deserialize)]
pub(crate) struct CancelRequest {
    /// Session whose dialog was dismissed.
    session_id: String,
}

/// Public view of a session.
#[derive(Debug, Serialize)]
struct SessionView {
    session_id: String,
    node_id: Option<String>,
    text: String,
    edited_text: String,
    state: &'static str,
    created_at: String,
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.session_id.to_string(),
            node_id: session.node_ref.as_deref().map(str::to_string),
            text: session.original_text.clone(),
            edited_text: session.edited_text.clone(),
            state: session.state().as_str(),
            created_at: session.created_at.to_rfc3339(),
        }
    }
}

/// A session ID that does not parse cannot name a live session.
fn parse_session_id(raw: &str) -> Result<SessionId, GateError> {
    SessionId::parse(raw).ok_or_else(|| GateError::not_found(raw))
}

pub(crate) fn apply_update(store: &SessionStore, body: EditRequest) -> Result<(), GateError> {
    let session_id = parse_session_id(&body.session_id)?;
    store.update_text(&session_id, body.edited_text)
}

pub(crate) fn apply_confirm(store: &SessionStore, body: EditRequest) -> Result<(), GateError> {
    let session_id = parse_session_id(&body.session_id)?;
    store.confirm(&session_id, body.edited_text)
}

/// Cancel only dismisses the client dialog; the gate keeps waiting.
pub(crate) fn apply_cancel(store: &SessionStore, body: CancelRequest) -> Result<(), GateError> {
    let session_id = parse_session_id(&body.session_id)?;
    if store.contains(&session_id) {
        Ok(())
    } else {
        Err(GateError::not_found(session_id))
    }
}

fn respond(operation: &'static str, result: Result<(), GateError>) -> Response<Full<Bytes>> {
    match result {
        Ok(()) => response::success(),
        Err(e) => {
            if e.is_not_found() {
                tracing::debug!(operation, error = %e, "Session not found");
            } else {
                tracing::warn!(operation, error = %e, "Session request failed");
            }
            ApiError::from(e).into_response()
        }
    }
}

/// POST /prompt_edit/update
///
/// Overwrite the working text of a pending session.
pub async fn update(req: Request<Incoming>, state: Arc<AppState>) -> Response<Full<Bytes>> {
    let result = match request::read_body_json::<EditRequest>(req).await {
        Ok(body) => apply_update(&state.store, body),
        Err(e) => Err(e),
    };
    respond("update", result)
}

/// POST /prompt_edit/confirm
///
/// Set the final text and release the waiting gate.
pub async fn confirm(req: Request<Incoming>, state: Arc<AppState>) -> Response<Full<Bytes>> {
    let result = match request::read_body_json::<EditRequest>(req).await {
        Ok(body) => apply_confirm(&state.store, body),
        Err(e) => Err(e),
    };
    respond("confirm", result)
}

/// POST /prompt_edit/cancel
///
/// Acknowledge a dismissed dialog without touching the session.
pub async fn cancel(req: Request<Incoming>, state: Arc<AppState>) -> Response<Full<Bytes>> {
    let result = match request::read_body_json::<CancelRequest>(req).await {
        Ok(body) => apply_cancel(&state.store, body),
        Err(e) => Err(e),
    };
    respond("cancel", result)
}

/// GET /prompt_edit/pending
///
/// List sessions still waiting for confirmation, oldest first.
pub async fn pending(state: Arc<AppState>) -> Response<Full<Bytes>> {
    let sessions: Vec<SessionView> = state
        .store
        .list_pending()
        .iter()
        .map(SessionView::from)
        .collect();

    let body = serde_json::json!({
        "sessions": sessions,
        "count": sessions.len(),
    });
    response::ok(&body)
}

/// GET /prompt_edit/sessions/{id}
pub async fn get(state: Arc<AppState>, session_id: &str) -> Response<Full<Bytes>> {
    let result = parse_session_id(session_id).and_then(|id| state.store.get(&id));
    match result {
        Ok(session) => response::ok(&SessionView::from(&session)),
        Err(e) => ApiError::from(e).into_response(),
    }
}
