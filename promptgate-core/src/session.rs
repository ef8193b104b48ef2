//! The session record for one pending pause.

use crate::types::{NodeRef, SessionId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a session while it is present in the store.
///
/// A deleted session is simply absent; there is no `Deleted` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// Created and waiting for the client to confirm.
    Pending,
    /// Confirmed by the client; waiting to be read by the gate.
    Confirmed,
}

impl SessionState {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
        }
    }
}

/// State of one in-flight pause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique key for this session.
    pub session_id: SessionId,
    /// Text supplied to the gate at creation. Never modified.
    pub original_text: String,
    /// Working value, overwritten by update and confirm calls.
    pub edited_text: String,
    /// The graph node that opened the gate.
    pub node_ref: NodeRef,
    /// Set once by a confirm call.
    pub confirmed: bool,
    /// When the session was created.
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a pending session.
    ///
    /// `edited_text` starts as the seed when one is given, otherwise as the
    /// original text.
    pub fn new(
        original_text: impl Into<String>,
        node_ref: NodeRef,
        seed_edited_text: Option<String>,
    ) -> Self {
        let original_text = original_text.into();
        let edited_text = seed_edited_text.unwrap_or_else(|| original_text.clone());

        Self {
            session_id: SessionId::new(),
            original_text,
            edited_text,
            node_ref,
            confirmed: false,
            created_at: Utc::now(),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        if self.confirmed {
            SessionState::Confirmed
        } else {
            SessionState::Pending
        }
    }
}
