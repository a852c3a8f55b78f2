//! OpenAI implementation of [`Generator`]: wraps openai-client, sends `[system, user]`.

use anyhow::Result;
use async_trait::async_trait;
use openai_client::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs,
};
use tracing::instrument;

use super::{EnvLlmConfig, Generator, DEFAULT_MODEL, DEFAULT_TEMPERATURE};

/// [`Generator`] backed by the OpenAI chat completion API.
#[derive(Clone)]
pub struct OpenAIGenerator {
    client: openai_client::OpenAIClient,
    model: String,
    temperature: f32,
}

impl OpenAIGenerator {
    pub fn new(api_key: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::new(api_key),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: openai_client::OpenAIClient::with_base_url(api_key, base_url),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Builds a generator from env config (key, base URL, model, temperature).
    pub fn from_config(cfg: &EnvLlmConfig) -> Self {
        Self::with_base_url(cfg.api_key.clone(), cfg.base_url.clone())
            .with_model(cfg.model.clone())
            .with_temperature(cfg.temperature)
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// The entire context sent per request: the topic's system prompt and the single user message.
fn build_messages(system_prompt: &str, user_text: &str) -> Result<Vec<ChatCompletionRequestMessage>> {
    Ok(vec![
        ChatCompletionRequestSystemMessageArgs::default()
            .content(system_prompt.to_string())
            .build()?
            .into(),
        ChatCompletionRequestUserMessageArgs::default()
            .content(user_text.to_string())
            .build()?
            .into(),
    ])
}

#[async_trait]
impl Generator for OpenAIGenerator {
    #[instrument(skip(self, system_prompt, user_text), fields(model = %self.model))]
    async fn generate(&self, system_prompt: &str, user_text: &str) -> Result<String> {
        let messages = build_messages(system_prompt, user_text)?;
        self.client
            .chat_completion(&self.model, self.temperature, messages)
            .await
    }
}
