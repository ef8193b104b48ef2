//! Typed client for the prompt edit session endpoints.
//!
//! This is the client side of the gate contract: receive a session event,
//! optionally send `update`s while the user edits, then send exactly one
//! `confirm` to release the gate.
//!
//! # Example
//!
//! ```no_run
//! use promptgate_client::Client;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new("http://localhost:8188")?;
//!
//! if let Some(event) = client.next_event(Duration::from_secs(25)).await? {
//!     client.update(&event.session_id, "work in progress").await?;
//!     client.confirm(&event.session_id, "final text").await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! ```no_run
//! # use promptgate_client::{Client, ClientError};
//! # async fn example() -> Result<(), ClientError> {
//! # let client = Client::new("http://localhost:8188")?;
//! match client.confirm("stale-id", "text").await {
//!     Ok(()) => println!("Resumed"),
//!     Err(e) if e.is_not_found() => println!("Session already resolved"),
//!     Err(e) => println!("Error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod error;
mod sessions;
mod types;

pub use client::Client;
pub use error::{ClientError, Result};
pub use types::{HealthStatus, PendingSession, SessionEvent};
