use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unknown callback identifier: {0}")]
    UnknownCallback(String),

    #[error("Config inconsistency: {0}")]
    ConfigInconsistency(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Generator error: {0}")]
    Generator(String),

    #[error("Generator timed out after {0:?}")]
    GeneratorTimeout(Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BotError>;
