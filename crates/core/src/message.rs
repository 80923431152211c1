//! Message domain types.
//!
//! A conversation history is an ordered `Vec<Message>` owned by the
//! caller; the engine receives it per call and never retains it.
//! Messages are append-only — created once, never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The role of a message sender on the wire.
///
/// The scammer speaks as `user`, the honeypot agent as `assistant`.
/// Any other role string round-trips uninterpreted and contributes
/// nothing to engagement counting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The remote party being engaged (assumed adversarial)
    User,
    /// The honeypot agent
    Assistant,
    /// Unrecognized role — passed through as-is
    #[serde(untagged)]
    Other(String),
}

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Who sent this message
    pub role: Role,

    /// The text content
    pub content: String,

    /// Timestamp, attached by collaborators when they care about it.
    /// The decision engine only uses insertion order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Message {
    /// Create a new scammer message (wire role `user`).
    pub fn scammer(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: None,
        }
    }

    /// Create a new agent message (wire role `assistant`).
    pub fn agent(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: None,
        }
    }

    /// Attach a timestamp.
    pub fn with_timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.timestamp = Some(ts);
        self
    }
}
