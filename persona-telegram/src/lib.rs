//! # persona-telegram
//!
//! Telegram layer: update adapters, [`persona_core::Transport`] implementation with inline
//! keyboards and HTML replies, minimal config, dispatcher runner.
//! Handles only Telegram connectivity; topics, state and generation live in `persona-router`.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{callback_conversation_id, callback_to_event, message_to_event};
pub use bot_adapter::{to_inline_keyboard, TelegramBotAdapter};
pub use config::TelegramConfig;
pub use runner::run_dispatcher;
