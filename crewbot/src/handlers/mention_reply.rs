//! Replies to messages that address the bot: completion, intent inference, placeholders.

use std::sync::Arc;

use async_trait::async_trait;
use crewbot_core::{Bot, CrewbotError, Handler, HandlerResponse, Message, MessageKind, Result};
use openai_client::{CompletionError, CompletionService};
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

use super::chat_locale;
use crate::chat_state::ChatStateStore;
use crate::i18n::Text;
use crate::inference::infer;
use crate::mention::addressed_text;
use crate::placeholder::{PlaceholderResolver, ResolveContext};
use crate::prompt::build_system_prompt;

pub struct MentionReplyHandler {
    bot: Arc<dyn Bot>,
    bot_username: Arc<RwLock<Option<String>>>,
    completion: Arc<dyn CompletionService>,
    chat_state: Arc<ChatStateStore>,
    resolver: PlaceholderResolver,
    system_prompt: String,
}

impl MentionReplyHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        bot_username: Arc<RwLock<Option<String>>>,
        completion: Arc<dyn CompletionService>,
        chat_state: Arc<ChatStateStore>,
        resolver: PlaceholderResolver,
        system_prompt: String,
    ) -> Self {
        Self {
            bot,
            bot_username,
            completion,
            chat_state,
            resolver,
            system_prompt,
        }
    }

    async fn generate(&self, message: &Message, user_text: &str, system_prompt: &str) -> Result<String> {
        let raw = self
            .completion
            .complete(system_prompt, user_text)
            .await
            .map_err(completion_error)?;
        let reply = infer(&raw);
        info!(command = ?reply.inferred_command, "step: completion received");

        let ctx = ResolveContext {
            chat_id: message.chat.id,
            invoker_display_name: message.user.display_name(),
        };
        let text = self.resolver.resolve(&reply, &ctx).await;
        if text.trim().is_empty() {
            return Err(CrewbotError::EmptyCompletion);
        }
        Ok(text)
    }
}

/// Maps client errors onto the application taxonomy.
pub fn completion_error(e: CompletionError) -> CrewbotError {
    match e {
        CompletionError::Config(msg) => CrewbotError::Config(msg),
        CompletionError::Upstream { status, body } => CrewbotError::Upstream { status, body },
        CompletionError::EmptyCompletion => CrewbotError::EmptyCompletion,
        CompletionError::Transport(e) => CrewbotError::Upstream {
            status: e.status().map(|s| s.as_u16()).unwrap_or(0),
            body: e.to_string(),
        },
        CompletionError::Decode(e) => CrewbotError::Upstream {
            status: 200,
            body: e.to_string(),
        },
    }
}

#[async_trait]
impl Handler for MentionReplyHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id, user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.kind != MessageKind::Text || message.user.is_bot {
            return Ok(HandlerResponse::Continue);
        }
        let bot_username = self.bot_username.read().await.clone();
        let Some(user_text) = addressed_text(message, bot_username.as_deref()) else {
            return Ok(HandlerResponse::Continue);
        };
        info!(question_len = user_text.len(), "step: bot addressed, requesting completion");

        let locale = chat_locale(&self.chat_state, message.chat.id).await;
        let system_prompt = build_system_prompt(&self.system_prompt, locale);

        let text = match self.generate(message, &user_text, &system_prompt).await {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, "Completion failed, sending apology");
                Text::CompletionFailed.render(locale)
            }
        };
        self.bot.reply_to(message, &text).await?;
        info!(reply_len = text.len(), "step: reply sent");
        Ok(HandlerResponse::Reply(text))
    }
}
