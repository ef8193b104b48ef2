//! Prompt edit gate core.
//!
//! A gate pauses a graph execution on one node, tells a connected client
//! about it, and blocks the worker thread until the client confirms an
//! edited version of the text.
//!
//! # Key Components
//!
//! - **SessionStore**: thread-safe map of pending sessions
//! - **WaitGate**: blocking wait with a hard deadline
//! - **Notifier**: fire-and-forget client notification over pluggable transports
//! - **PromptEdit**: the gate node the host graph engine calls
//!
//! # Example
//!
//! ```ignore
//! use promptgate_core::prelude::*;
//! use std::sync::Arc;
//!
//! let store = Arc::new(SessionStore::new());
//! let notifier = Notifier::new(runtime.handle().clone())
//!     .with_transport(Arc::new(BroadcastTransport::default()));
//! let node = PromptEdit::new(Arc::clone(&store), GateConfig::from_env())
//!     .with_notifier(notifier);
//!
//! // On a worker thread:
//! let output = node.edit_prompt("a photo of a cat", None, NodeRef::new("12"))?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod gate;
pub mod node;
pub mod notify;
pub mod session;
pub mod store;
pub mod types;

pub use config::GateConfig;
pub use error::{GateError, Result};
pub use gate::WaitGate;
pub use node::{GateInfo, GateOutput, PROMPT_EDIT_INFO, PromptEdit};
pub use notify::{BroadcastTransport, ClientTransport, Notifier, SessionEvent, WebhookTransport};
pub use session::{Session, SessionState};
pub use store::SessionStore;
pub use types::{NodeRef, SessionId};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::GateConfig;
    pub use crate::error::{GateError, Result};
    pub use crate::gate::WaitGate;
    pub use crate::node::{GateOutput, PromptEdit};
    pub use crate::notify::{
        BroadcastTransport, ClientTransport, Notifier, SessionEvent, WebhookTransport,
    };
    pub use crate::session::{Session, SessionState};
    pub use crate::store::SessionStore;
    pub use crate::types::{NodeRef, SessionId};
}
