//! # persona_bot
//!
//! Process assembly for the topic-menu bot. **Public API:** [`run_bot`], [`check_config`], and
//! the lower-level [`load_topics`] / [`build_router`] used by tests.

mod assembly;
pub mod cli;
mod facade;

pub use assembly::{build_router, describe, load_topics};
pub use cli::{resolve_config_path, Cli, Commands, DEFAULT_CONFIG_PATH};
pub use facade::{check_config, run_bot};
