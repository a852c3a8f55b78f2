//! Transport abstraction for delivering replies.
//!
//! [`Transport`] is chat-platform agnostic; persona-telegram implements it via teloxide and tests
//! substitute a recording implementation.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Reply;

/// Outbound side of the chat platform: delivers a [`Reply`] (text, format, optional keyboard).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the reply to its conversation. Fails with [`crate::BotError::Transport`] when the
    /// platform rejects or cannot deliver it.
    async fn send_reply(&self, reply: &Reply) -> Result<()>;
}
