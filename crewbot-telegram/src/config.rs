//! Telegram connection config: token, API URL, bot handle override, and webhook (push) mode.
//! Loaded from BOT_TOKEN, TELEGRAM_API_URL, BOT_USERNAME, WEBHOOK_URL, WEBHOOK_SECRET, WEBHOOK_PORT.

use anyhow::{bail, Result};

pub const DEFAULT_WEBHOOK_PORT: u16 = 8080;

/// Push mode settings; present only when WEBHOOK_URL is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    pub url: String,
    pub secret: Option<String>,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    /// Handle used for mention detection; when None it is resolved with getMe at startup.
    pub bot_username: Option<String>,
    pub webhook: Option<WebhookConfig>,
}

impl TelegramConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// BOT_TOKEN is required; everything else is optional. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let Some(bot_token) = value("BOT_TOKEN") else {
            bail!("BOT_TOKEN not set");
        };
        let webhook = match value("WEBHOOK_URL") {
            Some(url) => {
                let port = match value("WEBHOOK_PORT") {
                    Some(p) => p
                        .parse()
                        .map_err(|_| anyhow::anyhow!("WEBHOOK_PORT is not a valid port: {}", p))?,
                    None => DEFAULT_WEBHOOK_PORT,
                };
                Some(WebhookConfig {
                    url,
                    secret: value("WEBHOOK_SECRET"),
                    port,
                })
            }
            None => None,
        };

        Ok(Self {
            bot_token,
            telegram_api_url: value("TELEGRAM_API_URL").or_else(|| value("TELOXIDE_API_URL")),
            bot_username: value("BOT_USERNAME").map(|u| u.trim_start_matches('@').to_string()),
            webhook,
        })
    }

    /// Uses the given token; everything else unset.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            bot_username: None,
            webhook: None,
        }
    }

    /// URLs must parse; the webhook secret must be 1-256 chars of `A-Z a-z 0-9 _ -` (Telegram's rule).
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                bail!("TELEGRAM_API_URL is set but not a valid URL: {}", url_str);
            }
        }
        if let Some(ref webhook) = self.webhook {
            if reqwest::Url::parse(&webhook.url).is_err() {
                bail!("WEBHOOK_URL is not a valid URL: {}", webhook.url);
            }
            if let Some(ref secret) = webhook.secret {
                let valid = (1..=256).contains(&secret.len())
                    && secret
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
                if !valid {
                    bail!("WEBHOOK_SECRET must be 1-256 characters of A-Z, a-z, 0-9, _ or -");
                }
            }
        }
        Ok(())
    }
}
