//! Blocking wait used by the execution thread while a gate is paused.

use crate::config::GateConfig;
use crate::error::{GateError, Result};
use crate::store::{Poll, SessionStore};
use crate::types::SessionId;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Blocks the calling thread until a session is confirmed or times out.
///
/// The gate owns deletion: whichever path ends the wait (confirmation or
/// timeout) removes the session, and nothing else does. Each check waits on
/// the store's condition variable for at most the poll interval, so a
/// confirmation is observed as soon as it lands.
#[derive(Debug, Clone)]
pub struct WaitGate {
    store: Arc<SessionStore>,
    config: GateConfig,
}

impl WaitGate {
    /// Create a gate over the given store.
    pub fn new(store: Arc<SessionStore>, config: GateConfig) -> Self {
        Self { store, config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Wait with the configured deadline.
    pub fn await_default(&self, session_id: &SessionId) -> Result<String> {
        self.await_confirmation(session_id, self.config.timeout())
    }

    /// Wait until the session is confirmed and return its final text.
    ///
    /// This blocks the current thread. Never call it from an async task;
    /// use `spawn_blocking` or a dedicated worker thread.
    ///
    /// # Errors
    ///
    /// - `Timeout` if no confirmation arrives within `timeout`; the session
    ///   is removed before returning.
    /// - `SessionNotFound` if the session is not in the store.
    pub fn await_confirmation(&self, session_id: &SessionId, timeout: Duration) -> Result<String> {
        let started = Instant::now();
        tracing::debug!(
            session_id = %session_id,
            timeout_secs = timeout.as_secs_f64(),
            "Waiting for prompt edit confirmation"
        );

        loop {
            let elapsed = started.elapsed();

            if elapsed >= timeout {
                // A confirmation that raced the deadline still wins.
                if let Poll::Confirmed(text) = self.store.poll(session_id, Duration::ZERO) {
                    return Ok(self.resolved(session_id, text, started));
                }

                self.store.delete(session_id);
                tracing::warn!(
                    session_id = %session_id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Prompt edit timed out"
                );
                return Err(GateError::Timeout {
                    session_id: *session_id,
                    elapsed,
                });
            }

            let max_wait = self.config.poll_interval().min(timeout - elapsed);
            match self.store.poll(session_id, max_wait) {
                Poll::Pending => continue,
                Poll::Confirmed(text) => return Ok(self.resolved(session_id, text, started)),
                Poll::Missing => {
                    tracing::error!(session_id = %session_id, "Session vanished while waiting");
                    return Err(GateError::not_found(session_id));
                }
            }
        }
    }

    fn resolved(&self, session_id: &SessionId, text: String, started: Instant) -> String {
        tracing::info!(
            session_id = %session_id,
            waited_ms = started.elapsed().as_millis() as u64,
            "Prompt edit confirmed, resuming"
        );
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NodeRef;
    use std::thread;

    fn gate() -> (Arc<SessionStore>, WaitGate) {
        let store = Arc::new(SessionStore::new());
        let gate = WaitGate::new(Arc::clone(&store), GateConfig::default());
        (store, gate)
    }

    #[test]
    fn confirm_then_wait_returns_text_once() {
        let (store, gate) = gate();
        let id = store.create("draft", NodeRef::none(), None);

        store.confirm(&id, "final").unwrap();

        let text = gate.await_confirmation(&id, Duration::from_secs(1)).unwrap();
        assert_eq!(text, "final");
        assert!(store.get(&id).unwrap_err().is_not_found());
        assert!(store.confirm(&id, "again").unwrap_err().is_not_found());
    }

    #[test]
    fn last_write_wins_through_confirm() {
        let (store, gate) = gate();
        let id = store.create("start", NodeRef::none(), None);

        let client = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                store.update_text(&id, "A").unwrap();
                store.update_text(&id, "B").unwrap();
                thread::sleep(Duration::from_millis(30));
                store.confirm(&id, "C").unwrap();
            })
        };

        let text = gate.await_confirmation(&id, Duration::from_secs(5)).unwrap();
        client.join().unwrap();
        assert_eq!(text, "C");
    }

    #[test]
    fn late_writes_after_confirm_do_not_change_result() {
        let (store, gate) = gate();
        let id = store.create("orig", NodeRef::none(), None);

        store.confirm(&id, "C").unwrap();
        store.update_text(&id, "LATE").unwrap();
        store.confirm(&id, "LATER").unwrap();

        let text = gate.await_confirmation(&id, Duration::from_secs(1)).unwrap();
        assert_eq!(text, "C");
    }

    #[test]
    fn updates_alone_never_unblock() {
        let (store, gate) = gate();
        let id = store.create("start", NodeRef::none(), None);

        for i in 0..20 {
            store.update_text(&id, format!("edit {i}")).unwrap();
        }

        let err = gate
            .await_confirmation(&id, Duration::from_millis(300))
            .unwrap_err();
        assert!(matches!(err, GateError::Timeout { .. }));
        assert!(!store.contains(&id));
    }

    #[test]
    fn timeout_fires_on_deadline_and_removes_session() {
        let (store, gate) = gate();
        let id = store.create("text", NodeRef::none(), Some("seeded".to_string()));

        let started = Instant::now();
        let err = gate.await_confirmation(&id, Duration::from_secs(1)).unwrap_err();
        let elapsed = started.elapsed();

        match err {
            GateError::Timeout {
                session_id,
                elapsed: reported,
            } => {
                assert_eq!(session_id, id);
                assert!(reported >= Duration::from_secs(1));
            }
            other => panic!("expected timeout, got {other:?}"),
        }
        assert!(elapsed >= Duration::from_secs(1));
        assert!(elapsed < Duration::from_millis(1200));
        assert!(store.is_empty());
    }

    #[test]
    fn confirmation_at_zero_timeout_still_wins() {
        let (store, gate) = gate();
        let id = store.create("text", NodeRef::none(), None);
        store.confirm(&id, "quick").unwrap();

        let text = gate.await_confirmation(&id, Duration::ZERO).unwrap();
        assert_eq!(text, "quick");
    }

    #[test]
    fn missing_session_fails_fast() {
        let (_store, gate) = gate();
        let err = gate
            .await_confirmation(&SessionId::new(), Duration::from_secs(5))
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
