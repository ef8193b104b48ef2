//! In-process fan-out transport.

use super::{ClientTransport, SessionEvent, TransportFuture};
use crate::error::GateError;
use tokio::sync::broadcast;

/// Pushes events to every currently subscribed receiver.
///
/// Listeners that subscribe after an event was sent do not see it. With no
/// subscriber at all the send fails with "no connected client".
#[derive(Debug, Clone)]
pub struct BroadcastTransport {
    tx: broadcast::Sender<SessionEvent>,
}

impl BroadcastTransport {
    /// Create a transport buffering up to `capacity` undelivered events per receiver.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Subscribe to future events.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.tx.subscribe()
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for BroadcastTransport {
    fn default() -> Self {
        Self::new(64)
    }
}

impl ClientTransport for BroadcastTransport {
    fn name(&self) -> &'static str {
        "broadcast"
    }

    fn send<'a>(&'a self, event: &'a SessionEvent) -> TransportFuture<'a> {
        Box::pin(async move {
            self.tx
                .send(event.clone())
                .map(|_| ())
                .map_err(|_| GateError::TransportFailure {
                    transport: "broadcast",
                    cause: "no connected client".to_string(),
                })
        })
    }
}
