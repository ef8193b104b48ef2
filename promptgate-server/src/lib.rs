//! Prompt edit gate server.
//!
//! Exposes the client-facing session endpoints over HTTP and wires the
//! shared session store to the gate nodes:
//! - REST endpoints for update, confirm, cancel
//! - Pending-session listing and long-poll session events
//! - Logging setup

#![warn(missing_docs)]

pub mod api;
pub mod observability;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::api::{ApiError, ApiServer, AppState, ServerConfig};
    pub use crate::observability::{LogFormat, TracingConfig, init_tracing};
}
