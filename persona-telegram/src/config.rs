//! Minimal Telegram config: token, API URL, log path.
//! Loaded from BOT_TOKEN (or TOKEN), TELEGRAM_API_URL (or TELOXIDE_API_URL) and LOG_FILE.

use anyhow::{Context, Result};
use std::env;

pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    pub log_file: Option<String>,
}

impl TelegramConfig {
    /// BOT_TOKEN (fallback TOKEN) is required; TELEGRAM_API_URL and LOG_FILE are optional.
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Like [`from_env`](Self::from_env), but a given `token` overrides BOT_TOKEN.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN")
                .or_else(|_| env::var("TOKEN"))
                .map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let mut config = Self::with_token(bot_token);
        config.telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        config.log_file = env::var("LOG_FILE").ok();
        Ok(config)
    }

    /// Token only; everything else unset.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            log_file: None,
        }
    }

    /// Fails on an empty token or a malformed API URL.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        self.api_url()?;
        Ok(())
    }

    pub fn api_url(&self) -> Result<Option<reqwest::Url>> {
        self.telegram_api_url
            .as_deref()
            .map(|raw| {
                reqwest::Url::parse(raw)
                    .with_context(|| format!("Invalid TELEGRAM_API_URL: {}", raw))
            })
            .transpose()
    }

    /// teloxide Bot for this token, pointed at the custom API server when one is set.
    pub fn build_bot(&self) -> Result<teloxide::Bot> {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        Ok(match self.api_url()? {
            Some(url) => bot.set_api_url(url),
            None => bot,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "BOT_TOKEN",
            "TOKEN",
            "TELEGRAM_API_URL",
            "TELOXIDE_API_URL",
            "LOG_FILE",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_with_token() {
        let config = TelegramConfig::with_token("test_token".to_string());
        assert_eq!(config.bot_token, "test_token");
        assert!(config.telegram_api_url.is_none());
        assert!(config.log_file.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_url_and_empty_token() {
        let mut config = TelegramConfig::with_token("t".to_string());
        config.telegram_api_url = Some("not a url".to_string());
        assert!(config.validate().is_err());
        assert!(config.build_bot().is_err());

        config.telegram_api_url = Some("http://localhost:8081".to_string());
        assert_eq!(
            config.api_url().unwrap().unwrap().as_str(),
            "http://localhost:8081/"
        );

        assert!(TelegramConfig::with_token("  ".to_string()).validate().is_err());
    }

    /// **Test: TOKEN and TELOXIDE_API_URL are accepted as fallbacks.**
    #[test]
    #[serial]
    fn test_from_env_fallbacks() {
        clear_env();
        env::set_var("TOKEN", "legacy");
        env::set_var("TELOXIDE_API_URL", "http://127.0.0.1:8081");
        env::set_var("LOG_FILE", "logs/bot.log");

        let config = TelegramConfig::from_env().unwrap();
        assert_eq!(config.bot_token, "legacy");
        assert_eq!(
            config.telegram_api_url.as_deref(),
            Some("http://127.0.0.1:8081")
        );
        assert_eq!(config.log_file.as_deref(), Some("logs/bot.log"));

        env::set_var("BOT_TOKEN", "primary");
        assert_eq!(TelegramConfig::from_env().unwrap().bot_token, "primary");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_requires_token() {
        clear_env();
        assert!(TelegramConfig::from_env().is_err());
    }

    /// **Test: An explicit token overrides BOT_TOKEN; the optional vars still come from env.**
    #[test]
    #[serial]
    fn test_load_with_token_override() {
        clear_env();
        env::set_var("BOT_TOKEN", "from_env");
        env::set_var("LOG_FILE", "bot.log");

        let config = TelegramConfig::load(Some("from_cli".to_string())).unwrap();
        assert_eq!(config.bot_token, "from_cli");
        assert_eq!(config.log_file.as_deref(), Some("bot.log"));
        clear_env();
    }
}
