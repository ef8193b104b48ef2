//! Prompt edit gate node.
//!
//! Pauses the calling graph execution until a client confirms an edited
//! version of the incoming text.

use crate::config::GateConfig;
use crate::error::Result;
use crate::gate::WaitGate;
use crate::notify::{Notifier, SessionEvent};
use crate::store::SessionStore;
use crate::types::NodeRef;
use serde::Serialize;
use std::sync::Arc;

/// Registration metadata the host uses to list the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GateInfo {
    /// Node type key.
    pub type_name: &'static str,
    /// Human-readable name.
    pub display_name: &'static str,
    /// Menu category.
    pub category: &'static str,
    /// Names of the node's outputs.
    pub outputs: &'static [&'static str],
}

/// Metadata for [`PromptEdit`].
pub const PROMPT_EDIT_INFO: GateInfo = GateInfo {
    type_name: "Prompt_Edit",
    display_name: "Prompt Edit ✏️",
    category: "Ken-Chen",
    outputs: &["edited_text"],
};

/// Value handed back to the host when the gate resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateOutput {
    /// The confirmed text, for the node's `edited_text` output.
    pub text: String,
    /// Text to show in the node's own widget after resuming.
    pub ui_text: Vec<String>,
}

impl GateOutput {
    fn new(text: String) -> Self {
        Self {
            ui_text: vec![text.clone()],
            text,
        }
    }
}

/// Human-in-the-loop text edit gate.
///
/// # Ports
/// - Input: `text` - text to present for editing
/// - Input: `edited_text_widget` - optional pre-filled edit; used when non-blank
/// - Output: `edited_text` - the confirmed text
#[derive(Debug, Clone)]
pub struct PromptEdit {
    store: Arc<SessionStore>,
    gate: WaitGate,
    notifier: Option<Notifier>,
}

impl PromptEdit {
    /// Create a gate node over the shared store.
    pub fn new(store: Arc<SessionStore>, config: GateConfig) -> Self {
        let gate = WaitGate::new(Arc::clone(&store), config);
        Self {
            store,
            gate,
            notifier: None,
        }
    }

    /// Set the notifier used to tell clients a session opened.
    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Registration metadata.
    pub fn info(&self) -> GateInfo {
        PROMPT_EDIT_INFO
    }

    /// Wait settings for this node.
    pub fn config(&self) -> &GateConfig {
        self.gate.config()
    }

    /// The shared session store.
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Pause until a client confirms, then return the confirmed text.
    ///
    /// Blocks the calling worker thread for the whole pause.
    ///
    /// # Errors
    ///
    /// Returns `Timeout` when no confirmation arrives within the configured
    /// deadline. Notification failures are logged and do not fail the call.
    pub fn edit_prompt(
        &self,
        text: &str,
        seed_edited_text: Option<&str>,
        node_ref: NodeRef,
    ) -> Result<GateOutput> {
        let seed = seed_edited_text
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string);

        let session_id = self.store.create(text, node_ref.clone(), seed);

        match &self.notifier {
            Some(notifier) => notifier.notify(SessionEvent::new(session_id, node_ref, text)),
            None => tracing::warn!(
                session_id = %session_id,
                "No notifier configured; client must poll for pending sessions"
            ),
        }

        let edited = self.gate.await_default(&session_id)?;
        Ok(GateOutput::new(edited))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GateError;
    use std::thread;
    use std::time::Duration;

    fn node(timeout: Duration) -> PromptEdit {
        PromptEdit::new(
            Arc::new(SessionStore::new()),
            GateConfig::new().with_timeout(timeout),
        )
    }

    fn wait_for_pending(store: &SessionStore) -> crate::session::Session {
        for _ in 0..200 {
            if let Some(session) = store.list_pending().into_iter().next() {
                return session;
            }
            thread::sleep(Duration::from_millis(5));
        }
        panic!("no pending session appeared");
    }

    #[test]
    fn blank_seed_falls_back_to_text() {
        let gate = node(Duration::from_secs(5));
        let store = Arc::clone(gate.store());

        let worker =
            thread::spawn(move || gate.edit_prompt("incoming", Some("   "), NodeRef::new("2")));

        let session = wait_for_pending(&store);
        assert_eq!(session.edited_text, "incoming");
        assert_eq!(session.node_ref, NodeRef::new("2"));
        store.confirm(&session.session_id, "edited").unwrap();

        let output = worker.join().unwrap().unwrap();
        assert_eq!(output.text, "edited");
        assert_eq!(output.ui_text, vec!["edited".to_string()]);
        assert!(store.is_empty());
    }

    #[test]
    fn non_blank_seed_prefills_edited_text() {
        let gate = node(Duration::from_secs(5));
        let store = Arc::clone(gate.store());

        let worker =
            thread::spawn(move || gate.edit_prompt("incoming", Some("seeded"), NodeRef::none()));

        let session = wait_for_pending(&store);
        assert_eq!(session.original_text, "incoming");
        assert_eq!(session.edited_text, "seeded");
        store.confirm(&session.session_id, "confirmed").unwrap();

        assert_eq!(worker.join().unwrap().unwrap().text, "confirmed");
    }

    #[test]
    fn seeded_gate_still_times_out_and_cleans_up() {
        let gate = node(Duration::from_millis(200));
        let store = Arc::clone(gate.store());

        let err = gate
            .edit_prompt("incoming", Some("seeded"), NodeRef::none())
            .unwrap_err();

        assert!(matches!(err, GateError::Timeout { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn info_metadata() {
        let gate = node(Duration::from_secs(1));
        assert_eq!(gate.info().type_name, "Prompt_Edit");
        assert_eq!(gate.info().outputs, &["edited_text"]);
        assert_eq!(gate.info().display_name, "Prompt Edit ✏️");
        assert_eq!(gate.info().category, "Ken-Chen");
    }
}
