//! Wraps teloxide::Bot and implements [`crewbot_core::Bot`]. Production code sends messages via Telegram; tests substitute another Bot impl.

use async_trait::async_trait;
use crewbot_core::{parse_message_id, Bot as CoreBot, Chat, CrewbotError, Message, ReplyMarkup, Result};
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::*;
use teloxide::types::{
    ChatId, KeyboardButton, KeyboardMarkup, KeyboardRemove, MessageId, ReplyParameters,
};

/// Thin wrapper around teloxide::Bot that implements crewbot-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }

    async fn send(
        &self,
        chat: &Chat,
        text: &str,
        reply_to: Option<&str>,
        markup: Option<ReplyMarkup>,
    ) -> Result<()> {
        let mut request = self.bot.send_message(ChatId(chat.id), text.to_string());
        // Service events carry synthetic ids; those are sent unthreaded.
        if let Some(id) = reply_to.and_then(|id| parse_message_id(id).ok()) {
            request = request.reply_parameters(
                ReplyParameters::new(MessageId(id)).allow_sending_without_reply(),
            );
        }
        match markup {
            Some(ReplyMarkup::Keyboard(rows)) => {
                let keyboard = KeyboardMarkup::new(
                    rows.into_iter()
                        .map(|row| row.into_iter().map(KeyboardButton::new).collect::<Vec<_>>()),
                )
                .resize_keyboard()
                .one_time_keyboard();
                request = request.reply_markup(keyboard);
            }
            Some(ReplyMarkup::RemoveKeyboard) => {
                request = request.reply_markup(KeyboardRemove::new());
            }
            None => {}
        }
        request
            .await
            .map_err(|e| CrewbotError::Bot(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.send(chat, text, None, None).await
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send(&message.chat, text, Some(&message.id), None).await
    }

    async fn reply_with_markup(
        &self,
        message: &Message,
        text: &str,
        markup: ReplyMarkup,
    ) -> Result<()> {
        self.send(&message.chat, text, Some(&message.id), Some(markup))
            .await
    }
}
