//! Adapters from Telegram (teloxide) types to crewbot_core types.
//! Depends only on teloxide and crewbot_core type definitions.

use crewbot_core::{Chat, Message, MessageDirection, MessageKind, ToCoreMessage, ToCoreUser, User};
use teloxide::types::{ChatMemberStatus, ChatMemberUpdated};

/// Wraps a teloxide User for conversion to core [`User`].
pub struct TelegramUserWrapper<'a>(pub &'a teloxide::types::User);

impl<'a> ToCoreUser for TelegramUserWrapper<'a> {
    fn to_core(&self) -> User {
        User {
            id: self.0.id.0 as i64,
            username: self.0.username.clone(),
            first_name: Some(self.0.first_name.clone()).filter(|s| !s.is_empty()),
            last_name: self.0.last_name.clone(),
            is_bot: self.0.is_bot,
            language_code: self.0.language_code.clone(),
        }
    }
}

fn core_chat(chat: &teloxide::types::Chat) -> Chat {
    Chat {
        id: chat.id.0,
        chat_type: format!("{:?}", chat.kind),
        title: chat.title().map(str::to_string),
    }
}

fn anonymous_user() -> User {
    User {
        id: 0,
        username: None,
        first_name: None,
        last_name: None,
        is_bot: false,
        language_code: None,
    }
}

/// Wraps a teloxide Message for conversion to core [`Message`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> ToCoreMessage for TelegramMessageWrapper<'a> {
    fn to_core(&self) -> Message {
        let new_chat_members: Vec<User> = self
            .0
            .new_chat_members()
            .map(|members| {
                members
                    .iter()
                    .map(|u| TelegramUserWrapper(u).to_core())
                    .collect()
            })
            .unwrap_or_default();
        let content = self
            .0
            .text()
            .or_else(|| self.0.caption())
            .unwrap_or("")
            .to_string();
        let kind = if !new_chat_members.is_empty() {
            MessageKind::NewChatMembers
        } else if self.0.text().is_some() || self.0.caption().is_some() {
            MessageKind::Text
        } else {
            MessageKind::Other
        };

        Message {
            id: self.0.id.to_string(),
            user: self
                .0
                .from
                .as_ref()
                .map(|u| TelegramUserWrapper(u).to_core())
                .unwrap_or_else(anonymous_user),
            chat: core_chat(&self.0.chat),
            content,
            kind,
            direction: MessageDirection::Incoming,
            created_at: self.0.date,
            reply_to_message_id: self.0.reply_to_message().map(|m| m.id.to_string()),
            reply_to_bot_username: self
                .0
                .reply_to_message()
                .and_then(|m| m.from.as_ref())
                .filter(|u| u.is_bot)
                .and_then(|u| u.username.clone()),
            new_chat_members,
        }
    }
}

/// Converts a `my_chat_member` update into a [`MessageKind::BotJoined`] event when the bot
/// became a member or administrator; other status changes yield `None`.
pub fn bot_joined_event(update: &ChatMemberUpdated) -> Option<Message> {
    match update.new_chat_member.kind.status() {
        ChatMemberStatus::Member | ChatMemberStatus::Administrator => Some(Message {
            id: format!("my_chat_member:{}", update.date.timestamp()),
            user: TelegramUserWrapper(&update.from).to_core(),
            chat: core_chat(&update.chat),
            content: String::new(),
            kind: MessageKind::BotJoined,
            direction: MessageDirection::Incoming,
            created_at: update.date,
            reply_to_message_id: None,
            reply_to_bot_username: None,
            new_chat_members: Vec::new(),
        }),
        _ => None,
    }
}
