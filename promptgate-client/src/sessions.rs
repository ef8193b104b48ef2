//! Session operations.

use crate::client::Client;
use crate::error::{ClientError, Result};
use crate::types::{
    CancelBody, EditBody, EventMessage, HealthStatus, PendingList, PendingSession, SessionEvent,
};
use reqwest::StatusCode;
use std::time::Duration;

/// Event type carried by session notifications.
const SESSION_EVENT: &str = "prompt_edit_session";

impl Client {
    /// Overwrite the working text of a pending session.
    ///
    /// # Errors
    ///
    /// `ClientError::Api { status: 404, .. }` if the session no longer exists.
    pub async fn update(&self, session_id: &str, edited_text: &str) -> Result<()> {
        let body = EditBody {
            session_id,
            edited_text,
        };
        let response = self.post("update", &body).await?;
        self.handle_ack(response).await
    }

    /// Confirm the final text and release the waiting gate.
    pub async fn confirm(&self, session_id: &str, edited_text: &str) -> Result<()> {
        let body = EditBody {
            session_id,
            edited_text,
        };
        let response = self.post("confirm", &body).await?;
        self.handle_ack(response).await
    }

    /// Report that the edit dialog was dismissed.
    ///
    /// The gate keeps waiting; the session can still be confirmed later.
    pub async fn cancel(&self, session_id: &str) -> Result<()> {
        let response = self.post("cancel", &CancelBody { session_id }).await?;
        self.handle_ack(response).await
    }

    /// List sessions still waiting for confirmation.
    pub async fn pending(&self) -> Result<Vec<PendingSession>> {
        let response = self.get("pending").await?;
        let list: PendingList = self.handle_response(response).await?;
        Ok(list.sessions)
    }

    /// Get one session.
    pub async fn session(&self, session_id: &str) -> Result<PendingSession> {
        let response = self.get(&format!("sessions/{}", session_id)).await?;
        self.handle_response(response).await
    }

    /// Wait up to `wait` for the next session event.
    ///
    /// Returns `Ok(None)` if nothing arrived in time.
    pub async fn next_event(&self, wait: Duration) -> Result<Option<SessionEvent>> {
        let path = format!("events?timeout_ms={}", wait.as_millis());
        let response = self
            .get_with_timeout(&path, wait + Duration::from_secs(5))
            .await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let message: EventMessage = self.handle_response(response).await?;
        if message.kind != SESSION_EVENT {
            return Err(ClientError::Api {
                status: 200,
                message: format!("unexpected event type '{}'", message.kind),
            });
        }
        Ok(Some(message.data))
    }

    /// Check server health.
    pub async fn health(&self) -> Result<HealthStatus> {
        let response = self.get("health").await?;
        self.handle_response(response).await
    }
}
