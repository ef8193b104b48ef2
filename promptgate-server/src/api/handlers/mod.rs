//! API request handlers.

pub mod events;
pub mod health;
pub mod sessions;
