//! Best-effort notification of connected clients.
//!
//! This module provides:
//! - `SessionEvent` - The message pushed when a gate opens
//! - `ClientTransport` - Trait for anything that can deliver a message to clients
//! - `BroadcastTransport` - In-process fan-out to subscribed listeners
//! - `WebhookTransport` - HTTP POST to a configured URL
//! - `Notifier` - Fire-and-forget dispatch onto a configured runtime
//!
//! Delivery is at most once. A failed send is logged and dropped; it never
//! affects the pause itself.

mod broadcast;
mod webhook;

pub use broadcast::BroadcastTransport;
pub use webhook::WebhookTransport;

use crate::error::Result;
use crate::types::{NodeRef, SessionId};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::runtime::Handle;

/// Event name clients listen for.
pub const SESSION_EVENT: &str = "prompt_edit_session";

/// Payload describing a newly opened gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionEvent {
    /// Session the client must echo back on update/confirm/cancel.
    pub session_id: SessionId,
    /// The graph node that opened the gate.
    pub node_id: NodeRef,
    /// Text to present for editing.
    pub text: String,
}

impl SessionEvent {
    /// Create an event.
    pub fn new(session_id: SessionId, node_id: NodeRef, text: impl Into<String>) -> Self {
        Self {
            session_id,
            node_id,
            text: text.into(),
        }
    }

    /// Wire form: `{"type": "prompt_edit_session", "data": {...}}`.
    pub fn to_message(&self) -> serde_json::Value {
        serde_json::json!({
            "type": SESSION_EVENT,
            "data": self,
        })
    }
}

/// Future returned by transport sends.
pub type TransportFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

/// Something that can push a session event to connected clients.
pub trait ClientTransport: Send + Sync {
    /// Short name used in logs and errors.
    fn name(&self) -> &'static str;

    /// Deliver one event. Errors are reported, not retried.
    fn send<'a>(&'a self, event: &'a SessionEvent) -> TransportFuture<'a>;
}

/// Dispatches session events without blocking the caller.
///
/// The runtime handle is chosen once, at startup. `Handle::spawn` accepts
/// work from runtime threads and from plain worker threads alike, so the
/// caller never needs to know which kind of thread it is on.
#[derive(Clone)]
pub struct Notifier {
    handle: Handle,
    transports: Vec<Arc<dyn ClientTransport>>,
}

impl Notifier {
    /// Create a notifier that spawns onto `handle`.
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            transports: Vec::new(),
        }
    }

    /// Create a notifier bound to the runtime of the current thread.
    ///
    /// Returns `None` outside a Tokio runtime.
    pub fn from_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }

    /// Add a transport. Every event is sent over every transport.
    pub fn with_transport(mut self, transport: Arc<dyn ClientTransport>) -> Self {
        self.transports.push(transport);
        self
    }

    /// Number of configured transports.
    pub fn transport_count(&self) -> usize {
        self.transports.len()
    }

    /// Send `event` in the background and return immediately.
    pub fn notify(&self, event: SessionEvent) {
        if self.transports.is_empty() {
            tracing::warn!(
                session_id = %event.session_id,
                "No client transport configured; session must be discovered by polling"
            );
            return;
        }

        for transport in &self.transports {
            let transport = Arc::clone(transport);
            let event = event.clone();

            self.handle.spawn(async move {
                match transport.send(&event).await {
                    Ok(()) => tracing::debug!(
                        session_id = %event.session_id,
                        transport = transport.name(),
                        "Client notified"
                    ),
                    Err(e) => tracing::warn!(
                        session_id = %event.session_id,
                        transport = transport.name(),
                        error = %e,
                        "Client notification failed"
                    ),
                }
            });
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field(
                "transports",
                &self.transports.iter().map(|t| t.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
