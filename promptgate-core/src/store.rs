//! Process-wide mapping from session ID to session record.
//!
//! The store is the only state shared between the blocked execution thread
//! and the request handlers. Every operation takes one lock; mutations
//! signal a condition variable so a waiting gate re-checks immediately
//! instead of sleeping out its poll interval.

use crate::error::{GateError, Result};
use crate::session::Session;
use crate::types::{NodeRef, SessionId};
use parking_lot::{Condvar, Mutex};
use std::collections::HashMap;
use std::time::Duration;

/// Outcome of a single check of a session by the wait gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Poll {
    /// Still pending.
    Pending,
    /// Confirmed; the session has been removed and this is its final text.
    Confirmed(String),
    /// The session is not in the store.
    Missing,
}

/// Thread-safe in-memory session store.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionId, Session>>,
    changed: Condvar,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pending session and return its ID.
    pub fn create(
        &self,
        original_text: impl Into<String>,
        node_ref: NodeRef,
        seed_edited_text: Option<String>,
    ) -> SessionId {
        let session = Session::new(original_text, node_ref, seed_edited_text);
        let session_id = session.session_id;

        let mut sessions = self.sessions.lock();
        // v4 collisions are not expected; regenerate rather than overwrite.
        let session = if sessions.contains_key(&session_id) {
            Session {
                session_id: SessionId::new(),
                ..session
            }
        } else {
            session
        };
        let session_id = session.session_id;
        let node_ref = session.node_ref.clone();
        sessions.insert(session_id, session);
        drop(sessions);

        tracing::info!(session_id = %session_id, node = %node_ref, "Prompt edit session created");
        session_id
    }

    /// Get a copy of a session.
    pub fn get(&self, session_id: &SessionId) -> Result<Session> {
        self.sessions
            .lock()
            .get(session_id)
            .cloned()
            .ok_or_else(|| GateError::not_found(session_id))
    }

    /// Check whether a session is present.
    pub fn contains(&self, session_id: &SessionId) -> bool {
        self.sessions.lock().contains_key(session_id)
    }

    /// Overwrite the working text of a session. Last write before
    /// confirmation wins.
    ///
    /// A confirmed session keeps its final text; the call succeeds without
    /// changing it.
    pub fn update_text(&self, session_id: &SessionId, text: impl Into<String>) -> Result<()> {
        {
            let mut sessions = self.sessions.lock();
            let session = sessions
                .get_mut(session_id)
                .ok_or_else(|| GateError::not_found(session_id))?;
            if session.confirmed {
                tracing::debug!(session_id = %session_id, "Update after confirmation ignored");
                return Ok(());
            }
            session.edited_text = text.into();
        }
        self.changed.notify_all();

        tracing::debug!(session_id = %session_id, "Prompt edit text updated");
        Ok(())
    }

    /// Set the final text and mark the session confirmed.
    ///
    /// Both fields are written under the same lock, so a waiting gate never
    /// sees the flag without the text that came with it. Confirmation is
    /// final: repeating it before the gate resumes succeeds and keeps the
    /// first text.
    pub fn confirm(&self, session_id: &SessionId, text: impl Into<String>) -> Result<()> {
        {
            let mut sessions = self.sessions.lock();
            let session = sessions
                .get_mut(session_id)
                .ok_or_else(|| GateError::not_found(session_id))?;
            if session.confirmed {
                tracing::debug!(session_id = %session_id, "Repeated confirmation ignored");
                return Ok(());
            }
            session.edited_text = text.into();
            session.confirmed = true;
        }
        self.changed.notify_all();

        tracing::info!(session_id = %session_id, "Prompt edit session confirmed");
        Ok(())
    }

    /// Remove a session, returning it if it was present.
    ///
    /// Only the wait gate calls this; endpoints never delete.
    pub fn delete(&self, session_id: &SessionId) -> Option<Session> {
        let removed = self.sessions.lock().remove(session_id);
        if removed.is_some() {
            self.changed.notify_all();
            tracing::debug!(session_id = %session_id, "Prompt edit session removed");
        }
        removed
    }

    /// All sessions that have not been confirmed yet, oldest first.
    pub fn list_pending(&self) -> Vec<Session> {
        let mut pending: Vec<Session> = self
            .sessions
            .lock()
            .values()
            .filter(|s| !s.confirmed)
            .cloned()
            .collect();
        pending.sort_by_key(|s| s.created_at);
        pending
    }

    /// Number of sessions in the store.
    pub fn count(&self) -> usize {
        self.sessions.lock().len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }

    /// Check a session, waiting up to `max_wait` for a mutation if it is
    /// still pending.
    ///
    /// A confirmed session is removed and its text returned in the same
    /// critical section, so the read and the delete cannot be separated.
    pub(crate) fn poll(&self, session_id: &SessionId, max_wait: Duration) -> Poll {
        let mut sessions = self.sessions.lock();

        match Self::take_confirmed(&mut sessions, session_id) {
            Poll::Pending => {}
            resolved => return resolved,
        }
        if max_wait.is_zero() {
            return Poll::Pending;
        }

        self.changed.wait_for(&mut sessions, max_wait);
        Self::take_confirmed(&mut sessions, session_id)
    }

    fn take_confirmed(sessions: &mut HashMap<SessionId, Session>, session_id: &SessionId) -> Poll {
        match sessions.get(session_id) {
            None => Poll::Missing,
            Some(session) if session.confirmed => {
                let text = session.edited_text.clone();
                sessions.remove(session_id);
                Poll::Confirmed(text)
            }
            Some(_) => Poll::Pending,
        }
    }
}
