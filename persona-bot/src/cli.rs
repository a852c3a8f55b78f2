//! CLI parser.

use std::env;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Content file used when neither `--config` nor `PERSONA_CONFIG` is given.
pub const DEFAULT_CONFIG_PATH: &str = "persona.toml";

#[derive(Parser, Debug)]
#[command(name = "persona-bot")]
#[command(about = "Topic-menu Telegram bot backed by an LLM", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the Telegram bot (secrets from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
        /// Topic/text content file (default: PERSONA_CONFIG or persona.toml).
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Validate the content file and print topics and keyboard layout.
    Check {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

/// `--config` wins over `PERSONA_CONFIG`, which wins over [`DEFAULT_CONFIG_PATH`].
pub fn resolve_config_path(arg: Option<PathBuf>) -> PathBuf {
    arg.or_else(|| env::var("PERSONA_CONFIG").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_run_with_overrides() {
        let cli = Cli::try_parse_from([
            "persona-bot",
            "run",
            "--token",
            "123:abc",
            "--config",
            "bots/fr.toml",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Commands::Run {
                token: Some("123:abc".to_string()),
                config: Some(PathBuf::from("bots/fr.toml")),
            }
        );
    }

    #[test]
    fn test_parse_check_defaults() {
        let cli = Cli::try_parse_from(["persona-bot", "check"]).unwrap();
        assert_eq!(cli.command, Commands::Check { config: None });
        assert!(Cli::try_parse_from(["persona-bot"]).is_err());
    }

    /// **Test: --config overrides PERSONA_CONFIG, which overrides the default path.**
    #[test]
    #[serial]
    fn test_resolve_config_path_precedence() {
        env::remove_var("PERSONA_CONFIG");
        assert_eq!(resolve_config_path(None), PathBuf::from(DEFAULT_CONFIG_PATH));

        env::set_var("PERSONA_CONFIG", "/etc/persona.toml");
        assert_eq!(resolve_config_path(None), PathBuf::from("/etc/persona.toml"));
        assert_eq!(
            resolve_config_path(Some(PathBuf::from("local.toml"))),
            PathBuf::from("local.toml")
        );
        env::remove_var("PERSONA_CONFIG");
    }
}
