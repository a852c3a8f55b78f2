//! Conversation router: turns inbound events into topic selections and generated answers.
//!
//! Per conversation the state is either "no topic selected" or "topic active"; a selection always
//! overwrites. Text events are routed as follows:
//!
//! - `/start` → welcome text with the menu keyboard
//! - any other `/command` → "use the buttons" guidance
//! - plain text, no topic → dropped silently
//! - plain text, topic active → wait phrase, then generator (topic prompt + text), then the
//!   sanitized answer with the menu keyboard, or the canned error text with the keyboard
//!
//! Per-event failures become replies; only transport errors on canned replies propagate.

use std::sync::Arc;
use std::time::Duration;

use llm_client::Generator;
use persona_core::{
    BotError, ConversationId, InboundEvent, KeyboardLayout, Reply, Result, TextFormat, Transport,
};
use rand::seq::IndexedRandom;
use tracing::{error, info, instrument, warn};

use crate::keyboard::build_keyboard;
use crate::registry::{TopicKey, TopicRegistry};
use crate::sanitize::ResponseSanitizer;
use crate::settings::{CannedTexts, DEFAULT_ROW_SIZE};
use crate::state::ConversationStateStore;

/// Reserved marker for commands.
pub const COMMAND_PREFIX: char = '/';

const START_COMMAND: &str = "start";

/// What the router did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Topic recorded for the conversation.
    TopicSelected(TopicKey),
    /// Button callback did not match any topic; error text sent.
    UnknownCallback,
    /// `/start`: welcome text and menu sent.
    Welcome,
    /// Other command: guidance sent.
    CommandRejected,
    /// Plain text with no topic selected; nothing sent.
    Dropped,
    /// Generated answer delivered.
    Answered,
    /// Generator failed or timed out; error text sent.
    GeneratorFailed,
    /// Answer was generated but the transport rejected it; error text sent.
    DeliveryFailed,
}

/// Routes events for all conversations. Shared behind `Arc`; holds no per-conversation locks.
pub struct ConversationRouter {
    registry: Arc<TopicRegistry>,
    state: Arc<ConversationStateStore>,
    generator: Arc<dyn Generator>,
    transport: Arc<dyn Transport>,
    texts: CannedTexts,
    sanitizer: ResponseSanitizer,
    row_size: usize,
    generator_timeout: Option<Duration>,
}

/// True for `/start`, `/start@botname` and `/start payload`.
fn is_start_command(text: &str) -> bool {
    text.strip_prefix(COMMAND_PREFIX)
        .and_then(|rest| rest.split_whitespace().next())
        .and_then(|word| word.split('@').next())
        .is_some_and(|command| command == START_COMMAND)
}

impl ConversationRouter {
    pub fn new(
        registry: Arc<TopicRegistry>,
        state: Arc<ConversationStateStore>,
        generator: Arc<dyn Generator>,
        transport: Arc<dyn Transport>,
        texts: CannedTexts,
    ) -> Self {
        Self {
            registry,
            state,
            generator,
            transport,
            texts,
            sanitizer: ResponseSanitizer::default(),
            row_size: DEFAULT_ROW_SIZE,
            generator_timeout: None,
        }
    }

    pub fn with_row_size(mut self, row_size: usize) -> Self {
        self.row_size = row_size;
        self
    }

    /// `None` lets a slow generator run to completion.
    pub fn with_generator_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.generator_timeout = timeout;
        self
    }

    pub fn with_sanitizer(mut self, sanitizer: ResponseSanitizer) -> Self {
        self.sanitizer = sanitizer;
        self
    }

    /// Menu keyboard, rebuilt from the registry on each use.
    pub fn menu(&self) -> KeyboardLayout {
        build_keyboard(self.registry.all_topics_in_order(), self.row_size)
    }

    /// Handles one inbound event. Events of one conversation must be delivered in order.
    #[instrument(skip(self, event), fields(conversation_id = %event.conversation_id()))]
    pub async fn handle(&self, event: InboundEvent) -> Result<RouteOutcome> {
        match event {
            InboundEvent::Selection {
                conversation_id,
                callback_id,
            } => self.on_selection(conversation_id, &callback_id).await,
            InboundEvent::Text {
                conversation_id,
                text,
            } => self.on_text(conversation_id, &text).await,
        }
    }

    async fn on_selection(
        &self,
        conversation_id: ConversationId,
        callback_id: &str,
    ) -> Result<RouteOutcome> {
        let topic = match self.registry.resolve_by_callback(callback_id) {
            Ok(topic) => topic,
            Err(e) => {
                warn!(error = %e, callback_id = %callback_id, "step: selection with unknown callback");
                self.send(Reply::text(conversation_id, self.texts.error()).with_keyboard(self.menu()))
                    .await?;
                return Ok(RouteOutcome::UnknownCallback);
            }
        };

        self.state.set_active_topic(conversation_id, topic.key.clone());
        info!(topic = %topic.key, callback_id = %callback_id, "step: topic selected");

        if let Some(answer) = &topic.answer {
            self.send(Reply::text(conversation_id, answer.clone())).await?;
        }
        Ok(RouteOutcome::TopicSelected(topic.key.clone()))
    }

    async fn on_text(&self, conversation_id: ConversationId, text: &str) -> Result<RouteOutcome> {
        if text.starts_with(COMMAND_PREFIX) {
            if is_start_command(text) {
                info!("step: start command, sending welcome");
                self.send(Reply::text(conversation_id, self.texts.welcome()).with_keyboard(self.menu()))
                    .await?;
                return Ok(RouteOutcome::Welcome);
            }
            info!("step: command text, sending button guidance");
            self.send(Reply::text(conversation_id, self.texts.use_buttons()))
                .await?;
            return Ok(RouteOutcome::CommandRejected);
        }

        let Some(topic_key) = self.state.get_active_topic(conversation_id) else {
            info!("step: text without active topic, dropped");
            return Ok(RouteOutcome::Dropped);
        };
        let Some(topic) = self.registry.get(&topic_key) else {
            warn!(topic = %topic_key, "step: active topic not in registry, dropped");
            return Ok(RouteOutcome::Dropped);
        };

        // Acknowledge before the (possibly slow) generator call.
        self.send(Reply::text(conversation_id, self.pick_wait_phrase()))
            .await?;

        info!(topic = %topic.key, text_len = text.len(), "step: calling generator");
        let answer = match self.generate(&topic.system_prompt, text).await {
            Ok(answer) => answer,
            Err(e) => {
                error!(error = %e, topic = %topic.key, "Generator failed");
                self.send_error_with_menu(conversation_id).await?;
                return Ok(RouteOutcome::GeneratorFailed);
            }
        };

        let reply = Reply::text(conversation_id, answer)
            .with_format(TextFormat::Html)
            .with_keyboard(self.menu());
        if let Err(e) = self.transport.send_reply(&reply).await {
            error!(error = %e, "Failed to deliver generated answer");
            self.send_error_with_menu(conversation_id).await?;
            return Ok(RouteOutcome::DeliveryFailed);
        }
        info!(topic = %topic.key, answer_len = reply.text.len(), "step: answer sent");
        Ok(RouteOutcome::Answered)
    }

    /// Calls the generator under the optional timeout and sanitizes the result. An answer that
    /// is empty after sanitizing counts as a failure.
    async fn generate(&self, system_prompt: &str, text: &str) -> Result<String> {
        let call = self.generator.generate(system_prompt, text);
        let raw = match self.generator_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| BotError::GeneratorTimeout(limit))?,
            None => call.await,
        }
        .map_err(|e| BotError::Generator(format!("{:#}", e)))?;

        let clean = self.sanitizer.sanitize(&raw);
        if clean.trim().is_empty() {
            return Err(BotError::Generator(
                "answer is empty after sanitizing".to_string(),
            ));
        }
        Ok(clean)
    }

    fn pick_wait_phrase(&self) -> String {
        self.texts
            .wait_phrases()
            .choose(&mut rand::rng())
            .cloned()
            .unwrap_or_default()
    }

    async fn send_error_with_menu(&self, conversation_id: ConversationId) -> Result<()> {
        self.send(Reply::text(conversation_id, self.texts.error()).with_keyboard(self.menu()))
            .await
    }

    async fn send(&self, reply: Reply) -> Result<()> {
        self.transport.send_reply(&reply).await
    }
}
