//! Wire types returned by the server.

use serde::{Deserialize, Serialize};

/// A session as reported by `/pending` and `/sessions/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSession {
    /// Session ID to use in update/confirm/cancel.
    pub session_id: String,
    /// The node that opened the gate, if known.
    pub node_id: Option<String>,
    /// Original text supplied to the gate.
    pub text: String,
    /// Current working text.
    pub edited_text: String,
    /// "pending" or "confirmed".
    pub state: String,
    /// RFC 3339 creation time.
    pub created_at: String,
}

/// Payload of a `prompt_edit_session` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEvent {
    /// Session ID to use in update/confirm/cancel.
    pub session_id: String,
    /// The node that opened the gate, if known.
    pub node_id: Option<String>,
    /// Text to present for editing.
    pub text: String,
}

/// Envelope around pushed events.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EventMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: SessionEvent,
}

/// Server health report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// "healthy" when the server is up.
    pub status: String,
    /// Sessions currently held (pending or awaiting pickup).
    pub sessions: usize,
    /// Clients currently long-polling for events.
    pub listeners: usize,
    /// Seconds since the server started.
    pub uptime_secs: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PendingList {
    pub sessions: Vec<PendingSession>,
}

#[derive(Debug, Serialize)]
pub(crate) struct EditBody<'a> {
    pub session_id: &'a str,
    pub edited_text: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CancelBody<'a> {
    pub session_id: &'a str,
}
