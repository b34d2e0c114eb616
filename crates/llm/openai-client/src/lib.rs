//! # OpenAI-compatible completion client
//!
//! Issues exactly one `POST {base_url}/chat/completions` per call with a system message and a
//! user message, and returns the trimmed text of the first choice. No retries, no streaming.

mod client;
mod config;
mod error;
mod types;

pub use client::{CompletionService, OpenAIClient};
pub use config::{
    CompletionConfig, DEFAULT_BASE_URL, DEFAULT_FREQUENCY_PENALTY, DEFAULT_MAX_TOKENS,
    DEFAULT_MODEL, DEFAULT_PRESENCE_PENALTY, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS,
};
pub use error::CompletionError;
pub use types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Masks an API key/token for safe logging: first 7 chars + "***" + last 4 chars.
/// Keys of 11 chars or fewer come back as "***".
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}***{}", head, tail)
}
