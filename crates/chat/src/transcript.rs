//! Conversation transcript.
//!
//! An ordered, append-only log of (role, content) turns, scoped to one
//! session. Created empty, cleared only by explicit user action, never
//! otherwise pruned. The store does not enforce user/assistant alternation;
//! a partially failed turn may leave a lone user entry and that is fine.

use serde::{Deserialize, Serialize};

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Display label for rendering.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One side of an exchange; immutable once stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

/// Chronological, append-only sequence of conversation turns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<ConversationTurn>,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a user turn.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.turns.push(ConversationTurn {
            role: Role::User,
            content: content.into(),
        });
    }

    /// Append an assistant turn.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.turns.push(ConversationTurn {
            role: Role::Assistant,
            content: content.into(),
        });
    }

    /// Drop all recorded turns. The only mutation path besides appends.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Iterate turns in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter()
    }
}
