//! LLM configuration loaded from environment variables.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Generator settings for OpenAI-compatible APIs.
#[derive(Debug, Clone)]
pub struct EnvLlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    /// 0 disables the timeout.
    pub timeout_secs: u64,
}

impl EnvLlmConfig {
    /// Loads `OPENAI_API_KEY` (or `API_KEY`), `OPENAI_BASE_URL`, `MODEL`, `TEMPERATURE`, `LLM_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .context("OPENAI_API_KEY not set")?;
        let base_url = env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = env::var("MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let temperature = match env::var("TEMPERATURE") {
            Ok(s) => s
                .trim()
                .parse::<f32>()
                .with_context(|| format!("TEMPERATURE is not a number: {}", s))?,
            Err(_) => DEFAULT_TEMPERATURE,
        };
        let timeout_secs = match env::var("LLM_TIMEOUT_SECS") {
            Ok(s) => s
                .trim()
                .parse::<u64>()
                .with_context(|| format!("LLM_TIMEOUT_SECS is not a whole number: {}", s))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };
        Ok(Self {
            api_key,
            base_url,
            model,
            temperature,
            timeout_secs,
        })
    }

    /// The generator timeout, or `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}
