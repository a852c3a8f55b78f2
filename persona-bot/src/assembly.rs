//! Assembly: loads the content file and wires the router. Used by the [facade](crate::facade).

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use llm_client::Generator;
use persona_core::Transport;
use persona_router::{ConversationRouter, ConversationStateStore, TopicRegistry, TopicSettings};
use tracing::info;

/// Loads the content file and validates it into a registry. Any inconsistency fails here,
/// before a single update is accepted.
pub fn load_topics(path: &Path) -> Result<(TopicSettings, Arc<TopicRegistry>)> {
    let settings = TopicSettings::load(path)
        .with_context(|| format!("Failed to load topics from {}", path.display()))?;
    let registry = settings
        .build_registry()
        .with_context(|| format!("Inconsistent topic configuration in {}", path.display()))?;
    info!(
        path = %path.display(),
        topics = registry.len(),
        row_size = settings.row_size,
        "Topic configuration loaded"
    );
    Ok((settings, Arc::new(registry)))
}

/// Router over a fresh state store. `generator_timeout` of `None` disables the timeout.
pub fn build_router(
    settings: &TopicSettings,
    registry: Arc<TopicRegistry>,
    generator: Arc<dyn Generator>,
    transport: Arc<dyn Transport>,
    generator_timeout: Option<Duration>,
) -> ConversationRouter {
    ConversationRouter::new(
        registry,
        Arc::new(ConversationStateStore::new()),
        generator,
        transport,
        settings.texts.clone(),
    )
    .with_row_size(settings.row_size)
    .with_generator_timeout(generator_timeout)
}

/// Human-readable topic table and keyboard layout for `persona-bot check`.
pub fn describe(settings: &TopicSettings, registry: &TopicRegistry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Topics ({}):", registry.len());
    for topic in registry.all_topics_in_order() {
        let _ = writeln!(
            out,
            "  {:<16} label={:?} callback={:?} prompt_chars={} answer={}",
            topic.key,
            topic.label,
            topic.callback_id,
            topic.system_prompt.chars().count(),
            if topic.answer.is_some() { "yes" } else { "no" },
        );
    }

    let keyboard = persona_router::build_keyboard(registry.all_topics_in_order(), settings.row_size);
    let _ = writeln!(out, "Keyboard (row_size={}):", settings.row_size);
    for row in &keyboard.rows {
        let labels: Vec<String> = row.iter().map(|b| format!("[{}]", b.label)).collect();
        let _ = writeln!(out, "  {}", labels.join(" "));
    }
    let _ = writeln!(out, "Wait phrases: {}", settings.texts.wait_phrases().len());
    out
}
