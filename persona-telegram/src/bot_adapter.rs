//! Wraps teloxide::Bot and implements [`persona_core::Transport`]. Production code sends replies
//! via Telegram; tests substitute a recording transport.

use async_trait::async_trait;
use persona_core::{BotError, KeyboardLayout, Reply, Result, TextFormat, Transport};
use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup, ParseMode};
use tracing::debug;

/// Thin wrapper around teloxide::Bot that implements the core Transport trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Underlying teloxide::Bot, for API calls outside the Transport trait.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

/// One callback button per keyboard button, rows preserved.
pub fn to_inline_keyboard(layout: &KeyboardLayout) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(layout.rows.iter().map(|row| {
        row.iter()
            .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.callback_id.clone()))
            .collect::<Vec<_>>()
    }))
}

fn to_parse_mode(format: TextFormat) -> Option<ParseMode> {
    match format {
        TextFormat::Plain => None,
        TextFormat::Html => Some(ParseMode::Html),
    }
}

#[async_trait]
impl Transport for TelegramBotAdapter {
    async fn send_reply(&self, reply: &Reply) -> Result<()> {
        let mut request = self
            .bot
            .send_message(ChatId(reply.conversation_id.0), reply.text.clone());
        if let Some(mode) = to_parse_mode(reply.format) {
            request = request.parse_mode(mode);
        }
        if let Some(layout) = &reply.keyboard {
            request = request.reply_markup(to_inline_keyboard(layout));
        }
        let sent = request
            .await
            .map_err(|e| BotError::Transport(e.to_string()))?;
        debug!(
            chat_id = reply.conversation_id.0,
            message_id = %sent.id,
            "Reply sent"
        );
        Ok(())
    }
}
