//! Dispatcher runner: converts teloxide updates to router events and hands them to the router.
//!
//! teloxide's dispatcher processes updates of one chat sequentially and different chats
//! concurrently, which is the ordering the router relies on. Handlers never spawn: spawning
//! per message would let a later update of the same chat overtake an earlier one.

use std::sync::Arc;

use anyhow::Result;
use persona_core::InboundEvent;
use persona_router::ConversationRouter;
use teloxide::dispatching::{Dispatcher, UpdateFilterExt};
use teloxide::dptree;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, Message, Update};
use tracing::{debug, error, info, instrument, warn};

use super::adapters::{callback_to_event, message_to_event};

/// Starts long polling and blocks until Ctrl-C. Calls get_me() first so the bot identity
/// shows up in the logs.
#[instrument(skip(bot, router))]
pub async fn run_dispatcher(bot: teloxide::Bot, router: Arc<ConversationRouter>) -> Result<()> {
    match bot.get_me().await {
        Ok(me) => info!(
            username = %me.user.username.as_deref().unwrap_or("<none>"),
            "Bot identity resolved"
        ),
        Err(e) => warn!(error = %e, "get_me failed, continuing"),
    }

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(message_handler))
        .branch(Update::filter_callback_query().endpoint(callback_handler));

    info!("Starting dispatcher with long polling");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![router])
        .default_handler(|upd| async move {
            debug!(update_id = ?upd.id, "Unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error in update handler",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Dispatcher stopped");
    Ok(())
}

async fn message_handler(msg: Message, router: Arc<ConversationRouter>) -> ResponseResult<()> {
    let Some(event) = message_to_event(&msg) else {
        info!(chat_id = msg.chat.id.0, "Received non-text message, ignored");
        return Ok(());
    };
    info!(
        user_id = msg.from.as_ref().map(|u| u.id.0).unwrap_or(0),
        chat_id = msg.chat.id.0,
        "Received message"
    );
    route(&router, event).await;
    Ok(())
}

async fn callback_handler(
    bot: Bot,
    query: CallbackQuery,
    router: Arc<ConversationRouter>,
) -> ResponseResult<()> {
    match callback_to_event(&query) {
        Some(event) => {
            info!(
                user_id = query.from.id.0,
                chat_id = event.conversation_id().0,
                "Received button press"
            );
            route(&router, event).await;
        }
        None => debug!(query_id = ?query.id, "Callback query without data, ignored"),
    }

    // Stops the client's progress indicator.
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, query_id = ?query.id, "Failed to answer callback query");
    }
    Ok(())
}

async fn route(router: &ConversationRouter, event: InboundEvent) {
    let conversation_id = event.conversation_id();
    match router.handle(event).await {
        Ok(outcome) => debug!(conversation_id = %conversation_id, ?outcome, "Event routed"),
        Err(e) => error!(error = %e, conversation_id = %conversation_id, "Routing failed"),
    }
}
