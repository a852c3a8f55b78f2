//! # LLM client abstraction
//!
//! Defines the [`Generator`] trait (single-shot: one system prompt plus one user message, no
//! conversation memory) and an OpenAI implementation. Transport-agnostic; used by persona-router.

use anyhow::Result;
use async_trait::async_trait;

mod config;
mod openai_llm;

pub use config::{EnvLlmConfig, DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS};
pub use openai_llm::OpenAIGenerator;

/// Text generation backend. Object safe so the router can hold `Arc<dyn Generator>`.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Returns the generated answer for `user_text` under `system_prompt`. Any error, including
    /// an empty or malformed completion, is reported as `Err`.
    async fn generate(&self, system_prompt: &str, user_text: &str) -> Result<String>;
}
