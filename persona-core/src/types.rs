//! Core types: conversation id, inbound events, outbound replies, and keyboard layout.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a conversation (a Telegram chat id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub i64);

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ConversationId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Event delivered by the transport to the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// The user pressed an inline button carrying `callback_id`.
    Selection {
        conversation_id: ConversationId,
        callback_id: String,
    },
    /// The user sent a text message.
    Text {
        conversation_id: ConversationId,
        text: String,
    },
}

impl InboundEvent {
    pub fn selection(conversation_id: impl Into<ConversationId>, callback_id: impl Into<String>) -> Self {
        Self::Selection {
            conversation_id: conversation_id.into(),
            callback_id: callback_id.into(),
        }
    }

    pub fn text(conversation_id: impl Into<ConversationId>, text: impl Into<String>) -> Self {
        Self::Text {
            conversation_id: conversation_id.into(),
            text: text.into(),
        }
    }

    pub fn conversation_id(&self) -> ConversationId {
        match self {
            Self::Selection { conversation_id, .. } | Self::Text { conversation_id, .. } => {
                *conversation_id
            }
        }
    }
}

/// How the transport should interpret the reply text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextFormat {
    #[default]
    Plain,
    /// Inline HTML markup (bold, italic, links); block-level tags must already be stripped.
    Html,
}

/// One inline button: visible label plus the opaque callback identifier it sends back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardButton {
    pub label: String,
    pub callback_id: String,
}

impl KeyboardButton {
    pub fn new(label: impl Into<String>, callback_id: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            callback_id: callback_id.into(),
        }
    }
}

/// Grid of inline buttons, row by row. Rebuilt on every use; no identity of its own.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct KeyboardLayout {
    pub rows: Vec<Vec<KeyboardButton>>,
}

impl KeyboardLayout {
    pub fn new(rows: Vec<Vec<KeyboardButton>>) -> Self {
        Self { rows }
    }

    /// Buttons in reading order (row by row, left to right).
    pub fn buttons(&self) -> impl Iterator<Item = &KeyboardButton> {
        self.rows.iter().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }
}

/// Outbound message for a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub conversation_id: ConversationId,
    pub text: String,
    pub keyboard: Option<KeyboardLayout>,
    pub format: TextFormat,
}

impl Reply {
    /// Plain-text reply without keyboard.
    pub fn text(conversation_id: ConversationId, text: impl Into<String>) -> Self {
        Self {
            conversation_id,
            text: text.into(),
            keyboard: None,
            format: TextFormat::Plain,
        }
    }

    pub fn with_keyboard(mut self, keyboard: KeyboardLayout) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    pub fn with_format(mut self, format: TextFormat) -> Self {
        self.format = format;
        self
    }
}
