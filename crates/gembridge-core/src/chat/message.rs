//! Conversation message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageOrigin {
    /// Typed by the user.
    User,
    /// Produced by the generative backend.
    Assistant,
}

/// A single message in a conversation history.
///
/// Messages are immutable once created; the fields are private and only
/// readable through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    id: String,
    content: String,
    origin: MessageOrigin,
    timestamp: DateTime<Utc>,
}

impl ConversationMessage {
    /// Creates a user-authored message stamped with the current time.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, MessageOrigin::User)
    }

    /// Creates an assistant-authored message stamped with the current time.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(content, MessageOrigin::Assistant)
    }

    fn new(content: impl Into<String>, origin: MessageOrigin) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            origin,
            timestamp: Utc::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn origin(&self) -> MessageOrigin {
        self.origin
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn is_from_user(&self) -> bool {
        self.origin == MessageOrigin::User
    }
}
