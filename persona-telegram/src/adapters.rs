//! Adapters from Telegram (teloxide) updates to router events.
//! Depends only on teloxide and persona_core type definitions.

use persona_core::{ConversationId, InboundEvent};
use teloxide::types::{CallbackQuery, Message};

/// Text message → [`InboundEvent::Text`]. Photos, stickers and other non-text messages yield `None`.
pub fn message_to_event(msg: &Message) -> Option<InboundEvent> {
    msg.text()
        .map(|text| InboundEvent::text(msg.chat.id.0, text))
}

/// Button press → [`InboundEvent::Selection`]. Queries without callback data (game buttons)
/// yield `None`.
pub fn callback_to_event(query: &CallbackQuery) -> Option<InboundEvent> {
    let data = query.data.as_deref()?;
    Some(InboundEvent::selection(callback_conversation_id(query), data))
}

/// Chat the pressed button belongs to; falls back to the user's private chat, whose id equals
/// the user id, when Telegram omits the originating message.
pub fn callback_conversation_id(query: &CallbackQuery) -> ConversationId {
    query
        .message
        .as_ref()
        .map(|m| ConversationId(m.chat().id.0))
        .unwrap_or(ConversationId(query.from.id.0 as i64))
}
