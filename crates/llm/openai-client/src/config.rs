//! Completion configuration loaded from `OPENAI_*` environment variables.

use std::fmt;

use crate::error::CompletionError;
use crate::mask_token;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// High on purpose: replies in a group chat should vary.
pub const DEFAULT_TEMPERATURE: f32 = 1.1;
pub const DEFAULT_MAX_TOKENS: u32 = 250;
pub const DEFAULT_PRESENCE_PENALTY: f32 = 0.6;
pub const DEFAULT_FREQUENCY_PENALTY: f32 = 0.2;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Clone, PartialEq)]
pub struct CompletionConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub presence_penalty: f32,
    pub frequency_penalty: f32,
    /// Network timeout of the underlying HTTP client.
    pub timeout_secs: u64,
}

impl fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("api_key", &mask_token(&self.api_key))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("presence_penalty", &self.presence_penalty)
            .field("frequency_penalty", &self.frequency_penalty)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl CompletionConfig {
    /// Config with the given key and every other field at its default.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            presence_penalty: DEFAULT_PRESENCE_PENALTY,
            frequency_penalty: DEFAULT_FREQUENCY_PENALTY,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Load from the process environment. See [`CompletionConfig::from_lookup`].
    pub fn from_env() -> Result<Self, CompletionError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from a variable lookup: `OPENAI_API_KEY` (required, non-blank), `OPENAI_BASE_URL`,
    /// `OPENAI_MODEL`, `OPENAI_TEMPERATURE`, `OPENAI_MAX_TOKENS`, `OPENAI_PRESENCE_PENALTY`,
    /// `OPENAI_FREQUENCY_PENALTY`, `OPENAI_TIMEOUT_SECS`. Numbers that fail to parse fall back to
    /// their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CompletionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_blank("OPENAI_API_KEY")
            .ok_or_else(|| CompletionError::Config("OPENAI_API_KEY not set".to_string()))?;

        let mut config = Self::new(api_key.trim());
        if let Some(url) = non_blank("OPENAI_BASE_URL") {
            config.base_url = url.trim().trim_end_matches('/').to_string();
        }
        if let Some(model) = non_blank("OPENAI_MODEL") {
            config.model = model.trim().to_string();
        }
        config.temperature = parse_or(non_blank("OPENAI_TEMPERATURE"), DEFAULT_TEMPERATURE);
        config.max_tokens = parse_or(non_blank("OPENAI_MAX_TOKENS"), DEFAULT_MAX_TOKENS);
        config.presence_penalty =
            parse_or(non_blank("OPENAI_PRESENCE_PENALTY"), DEFAULT_PRESENCE_PENALTY);
        config.frequency_penalty =
            parse_or(non_blank("OPENAI_FREQUENCY_PENALTY"), DEFAULT_FREQUENCY_PENALTY);
        config.timeout_secs = parse_or(non_blank("OPENAI_TIMEOUT_SECS"), DEFAULT_TIMEOUT_SECS);
        Ok(config)
    }

    /// URL of the chat completions endpoint.
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, fallback: T) -> T {
    value
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(fallback)
}
