//! Shared application state for API handlers.

use promptgate_core::{BroadcastTransport, SessionStore};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state passed to all handlers.
pub struct AppState {
    /// Pending prompt edit sessions.
    pub store: Arc<SessionStore>,
    /// Session events for long-polling clients.
    pub events: Arc<BroadcastTransport>,
    /// Server start time.
    pub start_time: Instant,
}

impl AppState {
    /// Create application state over an existing store and event transport.
    ///
    /// The same store must be shared with the gate nodes, and the same
    /// transport registered on their notifier, for clients to see sessions.
    pub fn new(store: Arc<SessionStore>, events: Arc<BroadcastTransport>) -> Self {
        Self {
            store,
            events,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(
            Arc::new(SessionStore::new()),
            Arc::new(BroadcastTransport::default()),
        )
    }
}
