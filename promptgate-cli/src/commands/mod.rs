//! CLI command implementations.

pub mod gate;
pub mod serve;
pub mod session;
pub mod version;
