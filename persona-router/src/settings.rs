//! ConfigStore: topic sections and canned texts read with the `config` crate.
//!
//! Layout (TOML shown; any format the `config` crate detects works):
//!
//! ```toml
//! [labels]        # topic key -> button label
//! [callbacks]     # topic key -> callback identifier
//! [prompts]       # topic key -> system prompt
//! [answers]       # optional: topic key -> reply-on-select text
//! [texts]         # welcome, use_buttons, error
//! [wait]          # one or more "please wait" phrases
//! [keyboard]      # optional: row_size (default 1)
//! ```
//!
//! Section order is preserved (`preserve_order`), so topic order is declaration order.

use std::path::Path;

use config::{Config, ConfigError, File, FileFormat, Value};
use persona_core::{BotError, Result};
use tracing::{info, warn};

use crate::registry::TopicRegistry;

pub const DEFAULT_ROW_SIZE: usize = 1;

/// One `key = value` section in declaration order.
pub type Section = Vec<(String, String)>;

/// The key-aligned sections describing topics. Alignment is checked by [`TopicRegistry::from_sections`].
#[derive(Debug, Clone, Default)]
pub struct TopicSections {
    pub labels: Section,
    pub callbacks: Section,
    pub prompts: Section,
    pub answers: Section,
}

/// Canned reply texts. `wait_phrases` is never empty.
#[derive(Debug, Clone)]
pub struct CannedTexts {
    welcome: String,
    use_buttons: String,
    error: String,
    wait_phrases: Vec<String>,
}

impl CannedTexts {
    pub fn new(
        welcome: impl Into<String>,
        use_buttons: impl Into<String>,
        error: impl Into<String>,
        wait_phrases: Vec<String>,
    ) -> Result<Self> {
        if wait_phrases.is_empty() {
            return Err(BotError::ConfigInconsistency(
                "at least one wait phrase is required".to_string(),
            ));
        }
        Ok(Self {
            welcome: welcome.into(),
            use_buttons: use_buttons.into(),
            error: error.into(),
            wait_phrases,
        })
    }

    pub fn welcome(&self) -> &str {
        &self.welcome
    }

    pub fn use_buttons(&self) -> &str {
        &self.use_buttons
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn wait_phrases(&self) -> &[String] {
        &self.wait_phrases
    }
}

/// Everything the ConfigStore file provides.
#[derive(Debug, Clone)]
pub struct TopicSettings {
    pub sections: TopicSections,
    pub texts: CannedTexts,
    pub row_size: usize,
}

fn config_err(e: ConfigError) -> BotError {
    BotError::Config(e.to_string())
}

fn table_to_section(name: &str, table: config::Map<String, Value>) -> Result<Section> {
    table
        .into_iter()
        .map(|(key, value)| {
            value
                .into_string()
                .map(|v| (key.clone(), v))
                .map_err(|e| BotError::Config(format!("[{}] {}: {}", name, key, e)))
        })
        .collect()
}

fn required_section(cfg: &Config, name: &str) -> Result<Section> {
    let table = cfg.get_table(name).map_err(|e| match e {
        ConfigError::NotFound(_) => BotError::Config(format!("missing section [{}]", name)),
        other => config_err(other),
    })?;
    table_to_section(name, table)
}

fn optional_section(cfg: &Config, name: &str) -> Result<Section> {
    match cfg.get_table(name) {
        Ok(table) => table_to_section(name, table),
        Err(ConfigError::NotFound(_)) => Ok(Vec::new()),
        Err(e) => Err(config_err(e)),
    }
}

/// `[wait]` as a table of phrases, or `wait = [...]` as an array.
fn wait_phrases(cfg: &Config) -> Result<Vec<String>> {
    if let Ok(table) = cfg.get_table("wait") {
        return Ok(table_to_section("wait", table)?
            .into_iter()
            .map(|(_, phrase)| phrase)
            .collect());
    }
    match cfg.get_array("wait") {
        Ok(values) => values
            .into_iter()
            .map(|v| v.into_string().map_err(config_err))
            .collect(),
        Err(ConfigError::NotFound(_)) => Ok(Vec::new()),
        Err(e) => Err(config_err(e)),
    }
}

fn row_size(cfg: &Config) -> Result<usize> {
    match cfg.get_int("keyboard.row_size") {
        Ok(n) if n >= 1 => Ok(n as usize),
        Ok(n) => {
            warn!(row_size = n, "keyboard.row_size below 1, clamping to 1");
            Ok(1)
        }
        Err(ConfigError::NotFound(_)) => Ok(DEFAULT_ROW_SIZE),
        Err(e) => Err(config_err(e)),
    }
}

impl TopicSettings {
    /// Reads the ConfigStore file; the format is detected from the extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let cfg = Config::builder()
            .add_source(File::from(path))
            .build()
            .map_err(config_err)?;
        info!(path = %path.display(), "Loaded topic config");
        Self::from_config(&cfg)
    }

    /// Parses ConfigStore content held in memory.
    pub fn parse(content: &str, format: FileFormat) -> Result<Self> {
        let cfg = Config::builder()
            .add_source(File::from_str(content, format))
            .build()
            .map_err(config_err)?;
        Self::from_config(&cfg)
    }

    fn from_config(cfg: &Config) -> Result<Self> {
        let sections = TopicSections {
            labels: required_section(cfg, "labels")?,
            callbacks: required_section(cfg, "callbacks")?,
            prompts: required_section(cfg, "prompts")?,
            answers: optional_section(cfg, "answers")?,
        };
        let text = |key: &str| cfg.get_string(&format!("texts.{}", key)).map_err(config_err);
        let texts = CannedTexts::new(
            text("welcome")?,
            text("use_buttons")?,
            text("error")?,
            wait_phrases(cfg)?,
        )?;
        Ok(Self {
            sections,
            texts,
            row_size: row_size(cfg)?,
        })
    }

    /// Validates the aligned sections and builds the registry.
    pub fn build_registry(&self) -> Result<TopicRegistry> {
        TopicRegistry::from_sections(&self.sections)
    }
}
