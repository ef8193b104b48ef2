//! HTTP API for resolving pending prompt edit sessions.
//!
//! This module provides:
//! - `POST /prompt_edit/update` - overwrite the working text
//! - `POST /prompt_edit/confirm` - set final text and release the gate
//! - `POST /prompt_edit/cancel` - acknowledge a dismissed dialog (no-op)
//! - `GET /prompt_edit/pending` - list sessions still waiting
//! - `GET /prompt_edit/sessions/{id}` - inspect one session
//! - `GET /prompt_edit/events` - long-poll for the next session event
//! - `GET /prompt_edit/health` - liveness
//!
//! # Architecture
//!
//! The API uses pure Hyper 1.x for HTTP handling.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                  ApiServer                    │
//! │  ┌──────────┐  ┌──────────┐  ┌───────────┐   │
//! │  │  router  │──│ handlers │──│   state   │   │
//! │  └──────────┘  └──────────┘  └───────────┘   │
//! │                                   │           │
//! │                                   ▼           │
//! │              SessionStore  ◀──── WaitGate     │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use promptgate_server::api::{ApiServer, AppState, ServerConfig};
//! use std::sync::Arc;
//!
//! let state = Arc::new(AppState::new(store, events));
//! let server = ApiServer::bind(&ServerConfig::new("127.0.0.1", 8188), state).await?;
//! server.run().await?;
//! ```

mod error;
pub mod handlers;
mod request;
mod response;
mod router;
mod server;
mod state;

pub use error::ApiError;
pub use router::API_PREFIX;
pub use server::{ApiServer, ServerConfig};
pub use state::AppState;
