//! Strongly-typed identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a pending prompt edit session.
///
/// Backed by a random (v4) UUID, so concurrently pending sessions from
/// independent graph executions never alias each other. Serialized as the
/// bare hyphenated UUID string, which is what clients echo back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a new random session ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a session ID from its string form.
    ///
    /// Returns `None` if the string is not a valid UUID.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s.trim()).ok().map(Self)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// Opaque reference to the graph node that opened a gate.
///
/// Informational only; it is passed through to the client so the UI can
/// attach the edit dialog to the right node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct NodeRef(Option<String>);

impl NodeRef {
    /// Create a node reference.
    pub fn new(id: impl Into<String>) -> Self {
        Self(Some(id.into()))
    }

    /// A gate invoked without a known node.
    pub fn none() -> Self {
        Self(None)
    }

    /// Get the node ID, if any.
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl From<&str> for NodeRef {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeRef {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<Option<String>> for NodeRef {
    fn from(id: Option<String>) -> Self {
        Self(id)
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(id) => write!(f, "{}", id),
            None => write!(f, "-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_display_parse() {
        let id = SessionId::new();
        let parsed = SessionId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn session_id_rejects_garbage() {
        assert!(SessionId::parse("not-a-session").is_none());
        assert!("".parse::<SessionId>().is_err());
    }

    #[test]
    fn session_id_serializes_as_plain_string() {
        let id = SessionId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }

    #[test]
    fn node_ref_serializes_as_nullable_string() {
        assert_eq!(serde_json::to_string(&NodeRef::new("7")).unwrap(), "\"7\"");
        assert_eq!(serde_json::to_string(&NodeRef::none()).unwrap(), "null");
    }
}
