//! HTTP client for `/chat/completions` and the [`CompletionService`] seam used by the bot.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::config::CompletionConfig;
use crate::error::CompletionError;
use crate::mask_token;
use crate::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};

/// Produces one reply for a system prompt and a user text.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_text: &str)
        -> Result<String, CompletionError>;
}

/// reqwest-based client for OpenAI-compatible chat completion endpoints.
#[derive(Clone)]
pub struct OpenAIClient {
    http: reqwest::Client,
    config: CompletionConfig,
}

impl OpenAIClient {
    pub fn new(config: CompletionConfig) -> Result<Self, CompletionError> {
        if config.api_key.trim().is_empty() {
            return Err(CompletionError::Config("OPENAI_API_KEY not set".to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Request body: exactly two messages, system first, then user.
    pub fn build_request(&self, system_prompt: &str, user_text: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            presence_penalty: self.config.presence_penalty,
            frequency_penalty: self.config.frequency_penalty,
            messages: vec![ChatMessage::system(system_prompt), ChatMessage::user(user_text)],
        }
    }
}

#[async_trait]
impl CompletionService for OpenAIClient {
    #[instrument(skip(self, system_prompt, user_text), fields(model = %self.config.model))]
    async fn complete(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> Result<String, CompletionError> {
        info!(
            api_key = %mask_token(&self.config.api_key),
            user_text_len = user_text.len(),
            "chat_completion request"
        );

        let request = self.build_request(system_prompt, user_text);
        let response = self
            .http
            .post(self.config.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "chat_completion failed");
            return Err(CompletionError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let payload: ChatCompletionResponse = serde_json::from_str(&body)?;
        if let Some(ref u) = payload.usage {
            info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "chat_completion usage"
            );
        }

        payload
            .first_text()
            .map(str::to_string)
            .ok_or(CompletionError::EmptyCompletion)
    }
}
