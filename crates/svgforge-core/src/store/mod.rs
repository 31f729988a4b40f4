mod kv;

pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};

use crate::constants::storage::CONVERSATIONS_KEY;
use crate::conversation::Conversation;
use crate::error::ForgeError;

/// Serializes the full conversation list under one fixed key.
pub struct ConversationStore<S: KeyValueStore> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> ConversationStore<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            key: CONVERSATIONS_KEY.to_string(),
        }
    }

    /// Persisted list, or `None` when there is nothing usable. A malformed
    /// or unreadable snapshot is logged and treated as absent.
    pub fn load(&self) -> Option<Vec<Conversation>> {
        let raw = match self.backend.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %self.key, "failed to read conversations: {e}");
                return None;
            }
        };

        match serde_json::from_str::<Vec<Conversation>>(&raw) {
            Ok(conversations) => Some(conversations),
            Err(e) => {
                tracing::warn!(key = %self.key, "failed to parse conversations: {e}");
                None
            }
        }
    }

    /// Write the full list. An empty list is never written, so a transient
    /// empty state cannot clobber earlier data.
    pub fn save(&mut self, conversations: &[Conversation]) -> Result<(), ForgeError> {
        if conversations.is_empty() {
            tracing::debug!("skipping save of empty conversation list");
            return Ok(());
        }
        let json = serde_json::to_string(conversations)?;
        self.backend.set(&self.key, &json)
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Drop the persisted snapshot entirely.
    pub fn clear(&mut self) -> Result<(), ForgeError> {
        self.backend.remove(&self.key)
    }
}
