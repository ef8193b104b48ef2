//! Shared helpers for server integration tests.

#![allow(dead_code)]

use promptgate_client::Client;
use promptgate_core::{BroadcastTransport, GateConfig, Notifier, PromptEdit, SessionStore};
use promptgate_server::api::{ApiServer, AppState, ServerConfig};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

/// A server bound to an ephemeral port, sharing its store with the test.
pub struct TestServer {
    pub base_url: String,
    pub client: Client,
    pub store: Arc<SessionStore>,
    pub events: Arc<BroadcastTransport>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub async fn start() -> Self {
        let store = Arc::new(SessionStore::new());
        let events = Arc::new(BroadcastTransport::default());
        let state = Arc::new(AppState::new(Arc::clone(&store), Arc::clone(&events)));

        let server = ApiServer::bind(&ServerConfig::new("127.0.0.1", 0), state)
            .await
            .expect("bind test server");
        let base_url = format!("http://{}", server.local_addr());

        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let _ = server
                .run_until(async {
                    let _ = rx.await;
                })
                .await;
        });

        Self {
            client: Client::new(base_url.clone()).expect("client"),
            base_url,
            store,
            events,
            shutdown: Some(tx),
        }
    }

    /// A gate node wired to this server's store and event stream.
    pub fn node(&self, timeout: Duration) -> PromptEdit {
        let notifier = Notifier::from_current()
            .expect("inside a tokio runtime")
            .with_transport(self.events.clone());
        PromptEdit::new(
            Arc::clone(&self.store),
            GateConfig::new()
                .with_timeout(timeout)
                .with_poll_interval(Duration::from_millis(10)),
        )
        .with_notifier(notifier)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/prompt_edit{}", self.base_url, path)
    }

    /// Wait until `count` sessions are pending.
    pub async fn wait_for_pending(&self, count: usize) {
        for _ in 0..200 {
            if self.store.list_pending().len() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("sessions never became pending");
    }

    /// Wait until a client is long-polling for events.
    pub async fn wait_for_listener(&self) {
        for _ in 0..200 {
            if self.events.subscriber_count() > 0 {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("no listener subscribed");
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}
