//! persona-bot: entry point. Parses the CLI and runs or checks the bot.

use anyhow::Result;
use clap::Parser;
use persona_bot::{check_config, resolve_config_path, run_bot, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token, config } => run_bot(token, &resolve_config_path(config)).await,
        Commands::Check { config } => {
            print!("{}", check_config(&resolve_config_path(config))?);
            Ok(())
        }
    }
}
