//! Error types for the prompt edit gate.
//!
//! Every variant carries the identifiers needed to correlate it with log
//! output (session ID, elapsed time, transport name).

use crate::types::SessionId;
use std::time::Duration;
use thiserror::Error;

/// The main error type for gate operations.
#[derive(Error, Debug)]
pub enum GateError {
    /// The referenced session does not exist (never created, resolved, or expired).
    #[error("E201: Session '{session_id}' not found")]
    SessionNotFound {
        /// The session identifier as supplied by the caller.
        session_id: String,
    },

    /// No confirmation arrived before the deadline.
    #[error("E202: Prompt edit timed out after {:.1}s for session {session_id}", elapsed.as_secs_f64())]
    Timeout {
        /// The session that was waiting.
        session_id: SessionId,
        /// How long the gate waited before giving up.
        elapsed: Duration,
    },

    /// A notification could not be delivered to the client.
    #[error("E203: Failed to notify client via {transport}: {cause}")]
    TransportFailure {
        /// Name of the transport that failed.
        transport: &'static str,
        /// Reason for the failure.
        cause: String,
    },

    /// A request payload was missing required fields or was not valid JSON.
    #[error("E204: Malformed request: {cause}")]
    MalformedRequest {
        /// Description of what was wrong with the payload.
        cause: String,
    },

    /// I/O failure (socket bind, file access).
    #[error("E205: I/O error on {target}: {cause}")]
    Io {
        /// What was being accessed.
        target: String,
        /// Reason for the failure.
        cause: String,
    },

    /// Network failure while serving or sending.
    #[error("E206: Network error: {cause}")]
    Network {
        /// Reason for the failure.
        cause: String,
    },

    /// Serialization failure.
    #[error("E207: Serialization error: {cause}")]
    Serialization {
        /// Reason for the failure.
        cause: String,
    },
}

impl GateError {
    /// Get the stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SessionNotFound { .. } => "E201",
            Self::Timeout { .. } => "E202",
            Self::TransportFailure { .. } => "E203",
            Self::MalformedRequest { .. } => "E204",
            Self::Io { .. } => "E205",
            Self::Network { .. } => "E206",
            Self::Serialization { .. } => "E207",
        }
    }

    /// Shorthand for a not-found error.
    pub fn not_found(session_id: impl ToString) -> Self {
        Self::SessionNotFound {
            session_id: session_id.to_string(),
        }
    }

    /// Check whether this error means the session is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::SessionNotFound { .. })
    }
}

impl From<serde_json::Error> for GateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            cause: err.to_string(),
        }
    }
}

/// Result type alias for gate operations.
pub type Result<T> = std::result::Result<T, GateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(GateError::not_found("abc").code(), "E201");
        assert_eq!(
            GateError::MalformedRequest {
                cause: "missing session_id".to_string()
            }
            .code(),
            "E204"
        );
    }

    #[test]
    fn timeout_message_includes_elapsed() {
        let err = GateError::Timeout {
            session_id: SessionId::new(),
            elapsed: Duration::from_millis(1500),
        };
        let message = err.to_string();

        assert!(message.starts_with("E202"));
        assert!(message.contains("1.5s"));
    }

    #[test]
    fn not_found_detection() {
        assert!(GateError::not_found("x").is_not_found());
        assert!(
            !GateError::Network {
                cause: "reset".to_string()
            }
            .is_not_found()
        );
    }

    #[test]
    fn json_error_converts_to_serialization() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = GateError::from(json_err);

        assert_eq!(err.code(), "E207");
        assert!(err.to_string().starts_with("E207: Serialization error"));
    }
}
