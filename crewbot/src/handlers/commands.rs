//! Slash command handler: /start, /language, /birthday, /nominate.

use std::sync::Arc;

use async_trait::async_trait;
use crewbot_core::{Bot, Handler, HandlerResponse, Locale, Message, MessageKind, ReplyMarkup, Result};
use rand::seq::SliceRandom;
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

use super::chat_locale;
use crate::birthday::parse_birthday;
use crate::chat_state::ChatStateStore;
use crate::commands::Command;
use crate::i18n::{Text, LANGUAGE_KEYBOARD};
use crate::locale_conversation::LocaleConversation;
use crate::members::{nominee_name, MemberDirectory};

pub struct CommandHandler {
    bot: Arc<dyn Bot>,
    bot_username: Arc<RwLock<Option<String>>>,
    chat_state: Arc<ChatStateStore>,
    members: MemberDirectory,
    conversation: Arc<LocaleConversation>,
}

impl CommandHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        bot_username: Arc<RwLock<Option<String>>>,
        chat_state: Arc<ChatStateStore>,
        members: MemberDirectory,
        conversation: Arc<LocaleConversation>,
    ) -> Self {
        Self {
            bot,
            bot_username,
            chat_state,
            members,
            conversation,
        }
    }

    async fn reply(&self, message: &Message, text: String) -> Result<HandlerResponse> {
        self.bot.reply_to(message, &text).await?;
        Ok(HandlerResponse::Reply(text))
    }

    async fn start(&self, message: &Message) -> Result<HandlerResponse> {
        let preferred = Locale::from_language_tag(message.user.language_code.as_deref());
        if let Err(e) = self.chat_state.ensure(message.chat.id, preferred).await {
            error!(error = %e, "Failed to ensure chat on /start");
        } else if let Err(e) = self.members.upsert(message.chat.id, &message.user).await {
            error!(error = %e, "Failed to upsert member on /start");
        }
        let locale = chat_locale(&self.chat_state, message.chat.id).await;
        self.reply(message, Text::Welcome.render(locale)).await
    }

    async fn language(&self, message: &Message, arg: &str) -> Result<HandlerResponse> {
        if arg.trim().is_empty() {
            let preferred = Locale::from_language_tag(message.user.language_code.as_deref());
            if let Err(e) = self.chat_state.ensure_once(message.chat.id, preferred).await {
                error!(error = %e, "Failed to ensure chat before language prompt");
                let locale = chat_locale(&self.chat_state, message.chat.id).await;
                return self.reply(message, Text::StorageFailed.render(locale)).await;
            }
            let locale = chat_locale(&self.chat_state, message.chat.id).await;
            self.conversation.begin(message.chat.id);
            let text = Text::LanguagePrompt.render(locale);
            if let Err(e) = self
                .bot
                .reply_with_markup(message, &text, ReplyMarkup::single_column(LANGUAGE_KEYBOARD))
                .await
            {
                self.conversation.abandon(message.chat.id);
                return Err(e);
            }
            self.conversation.prompted(message.chat.id);
            info!(chat_id = message.chat.id, "step: language prompt sent");
            return Ok(HandlerResponse::Reply(text));
        }

        let locale = chat_locale(&self.chat_state, message.chat.id).await;
        let Some(selected) = Locale::normalize(arg) else {
            return self.reply(message, Text::LanguageInvalid.render(locale)).await;
        };
        match self.chat_state.set_locale(message.chat.id, selected).await {
            Ok(()) => {
                self.conversation.abandon(message.chat.id);
                let text = Text::LanguageSet {
                    language: selected.label(),
                }
                .render(selected);
                self.reply(message, text).await
            }
            Err(e) => {
                error!(error = %e, "Failed to store chat locale");
                self.reply(message, Text::StorageFailed.render(locale)).await
            }
        }
    }

    async fn birthday(&self, message: &Message, arg: &str) -> Result<HandlerResponse> {
        let locale = chat_locale(&self.chat_state, message.chat.id).await;
        if arg.trim().is_empty() {
            return self.reply(message, Text::BirthdayHelp.render(locale)).await;
        }
        let Some(date) = parse_birthday(arg) else {
            return self.reply(message, Text::BirthdayInvalid.render(locale)).await;
        };

        let result = match self.chat_state.ensure_once(message.chat.id, locale).await {
            Ok(()) => self.members.set_birthday(message.chat.id, &message.user, date).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => {
                let text = Text::BirthdaySaved {
                    date: date.format("%Y-%m-%d").to_string(),
                };
                self.reply(message, text.render(locale)).await
            }
            Err(e) => {
                error!(error = %e, "Failed to save birthday");
                self.reply(message, Text::StorageFailed.render(locale)).await
            }
        }
    }

    async fn nominate(&self, message: &Message) -> Result<HandlerResponse> {
        let locale = chat_locale(&self.chat_state, message.chat.id).await;
        let roster = match self.members.list(message.chat.id).await {
            Ok(roster) => roster,
            Err(e) => {
                error!(error = %e, "Failed to list members for /nominate");
                Vec::new()
            }
        };
        let chosen = roster.choose(&mut rand::thread_rng()).map(nominee_name);
        let text = match chosen {
            Some(name) => Text::NominateResult { name },
            None => Text::NominateNoCandidates,
        };
        self.reply(message, text.render(locale)).await
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id, user_id = message.user.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.kind != MessageKind::Text || message.user.is_bot {
            return Ok(HandlerResponse::Continue);
        }
        let bot_username = self.bot_username.read().await.clone();
        let Some(command) = Command::parse_text(&message.content, bot_username.as_deref()) else {
            return Ok(HandlerResponse::Continue);
        };
        info!(command = ?command, "step: command received");

        match command {
            Command::Start => self.start(message).await,
            Command::Language(arg) | Command::Lang(arg) => self.language(message, &arg).await,
            Command::Birthday(arg) | Command::Bday(arg) => self.birthday(message, &arg).await,
            Command::Nominate => self.nominate(message).await,
        }
    }
}
