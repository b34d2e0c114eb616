//! Consumes the reply to a pending language prompt.

use std::sync::Arc;

use async_trait::async_trait;
use crewbot_core::{Bot, Handler, HandlerResponse, Message, MessageKind, ReplyMarkup, Result};
use tracing::{error, info, instrument};

use super::chat_locale;
use crate::chat_state::ChatStateStore;
use crate::i18n::{Text, LANGUAGE_KEYBOARD};
use crate::locale_conversation::{ConversationState, LocaleConversation, Step};

pub struct LocaleSelectionHandler {
    bot: Arc<dyn Bot>,
    chat_state: Arc<ChatStateStore>,
    conversation: Arc<LocaleConversation>,
}

impl LocaleSelectionHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        chat_state: Arc<ChatStateStore>,
        conversation: Arc<LocaleConversation>,
    ) -> Self {
        Self {
            bot,
            chat_state,
            conversation,
        }
    }
}

#[async_trait]
impl Handler for LocaleSelectionHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let chat_id = message.chat.id;
        if message.kind != MessageKind::Text
            || message.user.is_bot
            || self.conversation.state(chat_id) != ConversationState::AwaitingSelection
        {
            return Ok(HandlerResponse::Continue);
        }

        match self.conversation.receive(chat_id, &message.content) {
            Step::Selected(locale) => {
                if let Err(e) = self.chat_state.set_locale(chat_id, locale).await {
                    error!(error = %e, "Failed to store selected locale");
                    self.conversation.prompted(chat_id);
                    let current = chat_locale(&self.chat_state, chat_id).await;
                    let text = Text::StorageFailed.render(current);
                    self.bot.reply_to(message, &text).await?;
                    return Ok(HandlerResponse::Reply(text));
                }
                self.conversation.finish(chat_id);
                info!(locale = %locale, "step: locale selected");
                let text = Text::LanguageSet {
                    language: locale.label(),
                }
                .render(locale);
                self.bot
                    .reply_with_markup(message, &text, ReplyMarkup::RemoveKeyboard)
                    .await?;
                Ok(HandlerResponse::Reply(text))
            }
            Step::Reprompt => {
                let locale = chat_locale(&self.chat_state, chat_id).await;
                let text = Text::LanguageInvalid.render(locale);
                self.bot
                    .reply_with_markup(message, &text, ReplyMarkup::single_column(LANGUAGE_KEYBOARD))
                    .await?;
                Ok(HandlerResponse::Reply(text))
            }
            Step::Prompt | Step::Ignored => Ok(HandlerResponse::Continue),
        }
    }
}
