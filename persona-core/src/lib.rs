//! # persona-core
//!
//! Core types and traits for the persona bot: inbound [`InboundEvent`]s, outbound [`Reply`]s with an
//! optional [`KeyboardLayout`], the [`Transport`] trait, errors, and tracing initialization.
//! Transport-agnostic; used by persona-router and persona-telegram.

pub mod error;
pub mod logger;
pub mod transport;
pub mod types;

pub use error::{BotError, Result};
pub use logger::init_tracing;
pub use transport::Transport;
pub use types::{
    ConversationId, InboundEvent, KeyboardButton, KeyboardLayout, Reply, TextFormat,
};
