//! BotConfig: Telegram connection + completion service + app settings. Loaded from env.

use std::collections::HashSet;

use anyhow::{bail, Result};
use crewbot_telegram::TelegramConfig;
use openai_client::{mask_token, CompletionConfig};
use tracing::info;

use crate::prompt::DEFAULT_SYSTEM_PROMPT;

pub const DEFAULT_DATABASE_URL: &str = "./crewbot.db";
pub const DEFAULT_LOG_FILE: &str = "logs/crewbot.log";

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub telegram: TelegramConfig,
    pub completion: CompletionConfig,
    /// SYSTEM_PROMPT, or the built-in prompt.
    pub system_prompt: String,
    /// ALLOWED_CHAT_IDS; messages from any other chat are dropped. Empty accepts nothing.
    pub allowed_chat_ids: HashSet<i64>,
    pub database_url: String,
    pub log_file: String,
}

impl BotConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        Self::from_lookup(token, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(token: Option<String>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let telegram = match token.filter(|t| !t.trim().is_empty()) {
            Some(token) => TelegramConfig::from_lookup(|key| match key {
                "BOT_TOKEN" => Some(token.clone()),
                other => lookup(other),
            })?,
            None => TelegramConfig::from_lookup(&lookup)?,
        };
        let completion = CompletionConfig::from_lookup(&lookup)?;
        let allowed_chat_ids = parse_allowed_chat_ids(value("ALLOWED_CHAT_IDS").as_deref())?;

        Ok(Self {
            telegram,
            completion,
            system_prompt: value("SYSTEM_PROMPT").unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            allowed_chat_ids,
            database_url: value("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            log_file: value("LOG_FILE").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.telegram.validate()?;
        if reqwest::Url::parse(&self.completion.base_url).is_err() {
            bail!("OPENAI_BASE_URL is not a valid URL: {}", self.completion.base_url);
        }
        Ok(())
    }

    /// Logs the effective settings with secrets masked.
    pub fn log_summary(&self) {
        info!(
            bot_token = %mask_token(&self.telegram.bot_token),
            openai_api_key = %mask_token(&self.completion.api_key),
            model = %self.completion.model,
            base_url = %self.completion.base_url,
            allowed_chats = self.allowed_chat_ids.len(),
            webhook = self.telegram.webhook.is_some(),
            database_url = %self.database_url,
            "Configuration loaded"
        );
    }
}

/// Comma-separated chat ids; blank entries are skipped, anything else must parse as i64.
pub fn parse_allowed_chat_ids(raw: Option<&str>) -> Result<HashSet<i64>> {
    let Some(raw) = raw else {
        return Ok(HashSet::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| anyhow::anyhow!("ALLOWED_CHAT_IDS contains an invalid chat id: {}", s))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allowed_chat_ids() {
        assert!(parse_allowed_chat_ids(None).unwrap().is_empty());
        assert!(parse_allowed_chat_ids(Some(" ")).unwrap().is_empty());
        let ids = parse_allowed_chat_ids(Some("-1001, 42,,7")).unwrap();
        assert_eq!(ids, HashSet::from([-1001, 42, 7]));
        assert!(parse_allowed_chat_ids(Some("12,abc")).is_err());
    }
}
