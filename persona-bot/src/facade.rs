//! Public entry points used by the binary: run the bot, or check a content file.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use llm_client::{EnvLlmConfig, Generator, OpenAIGenerator};
use persona_core::{init_tracing, Transport};
use persona_telegram::{run_dispatcher, TelegramBotAdapter, TelegramConfig};
use tracing::info;

use crate::assembly::{build_router, describe, load_topics};

/// Loads env and content config, builds the router and runs the Telegram dispatcher until
/// Ctrl-C. `token` overrides BOT_TOKEN.
pub async fn run_bot(token: Option<String>, config_path: &Path) -> Result<()> {
    let tg_config = TelegramConfig::load(token)?;
    init_tracing(tg_config.log_file.as_deref())?;
    tg_config.validate()?;

    let (settings, registry) = load_topics(config_path)?;

    let llm_config = EnvLlmConfig::from_env().context("Failed to load LLM config")?;
    let generator: Arc<dyn Generator> = Arc::new(OpenAIGenerator::from_config(&llm_config));
    info!(
        model = %llm_config.model,
        temperature = llm_config.temperature,
        timeout_secs = llm_config.timeout_secs,
        "Generator configured"
    );

    let bot = tg_config.build_bot()?;
    let transport: Arc<dyn Transport> = Arc::new(TelegramBotAdapter::new(bot.clone()));
    let router = build_router(
        &settings,
        registry,
        generator,
        transport,
        llm_config.timeout(),
    );

    run_dispatcher(bot, Arc::new(router)).await
}

/// Validates a content file; returns the description printed by `persona-bot check`.
pub fn check_config(config_path: &Path) -> Result<String> {
    let (settings, registry) = load_topics(config_path)?;
    Ok(describe(&settings, &registry))
}
