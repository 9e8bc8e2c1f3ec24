//! Append-only conversation history.
//!
//! DESIGN
//! ======
//! Messages are pushed onto a `Vec` behind a mutex and never edited,
//! removed, or reordered in place. `ordered_view` clones the history and
//! stable-sorts the copy by `created_at`, so messages with equal timestamps
//! keep their append order. The store is `Clone` (shared `Arc`) so a
//! scheduled reply task can append to the same history the widget reads.

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

// =============================================================================
// MESSAGE
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Assistant,
    User,
}

/// One immutable chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub role: Role,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl Message {
    /// New message stamped with the current wall clock.
    #[must_use]
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self::at(role, text, OffsetDateTime::now_utc())
    }

    /// New message with an explicit timestamp.
    #[must_use]
    pub fn at(role: Role, text: impl Into<String>, created_at: OffsetDateTime) -> Self {
        Self { id: Uuid::new_v4(), role, text: text.into(), created_at }
    }

    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text)
    }

    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }
}

// =============================================================================
// STORE
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    history: Arc<Mutex<Vec<Message>>>,
}

impl ConversationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message. Never rejects.
    pub fn append(&self, message: Message) {
        self.lock().push(message);
    }

    /// All messages sorted ascending by `created_at`, ties in append order.
    /// Recomputed on every call.
    #[must_use]
    pub fn ordered_view(&self) -> Vec<Message> {
        let mut view = self.lock().clone();
        view.sort_by_key(|m| m.created_at);
        view
    }

    /// Messages exactly as appended.
    #[must_use]
    pub fn history(&self) -> Vec<Message> {
        self.lock().clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Message>> {
        self.history.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;
