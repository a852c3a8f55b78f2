//! Per-conversation topic selection.
//!
//! Entries are overwritten on every selection and never evicted; the map grows with the number
//! of distinct conversations for the lifetime of the process.

use dashmap::DashMap;
use persona_core::ConversationId;

use crate::registry::TopicKey;

/// Active topic per conversation. Safe for concurrent use across conversations.
#[derive(Debug, Default)]
pub struct ConversationStateStore {
    active: DashMap<ConversationId, TopicKey>,
}

impl ConversationStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `topic_key` as the conversation's topic, replacing any previous one.
    pub fn set_active_topic(&self, conversation_id: ConversationId, topic_key: impl Into<TopicKey>) {
        self.active.insert(conversation_id, topic_key.into());
    }

    /// `None` until the conversation's first selection.
    pub fn get_active_topic(&self, conversation_id: ConversationId) -> Option<TopicKey> {
        self.active.get(&conversation_id).map(|entry| entry.value().clone())
    }

    /// Number of conversations that have selected a topic.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
