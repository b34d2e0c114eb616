//! Core types: user, chat, message, locale, handler response, and the Handler trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sender identity as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_bot: bool,
    /// IETF language tag reported by the client (e.g. `it`, `en-US`).
    pub language_code: Option<String>,
}

impl User {
    /// Human-facing name: "first last" (empty parts omitted), else `@username`, else empty.
    pub fn display_name(&self) -> String {
        let name = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !name.is_empty() {
            return name;
        }
        match self.username.as_deref().map(str::trim) {
            Some(u) if !u.is_empty() => format!("@{}", u),
            _ => String::new(),
        }
    }
}

/// Chat (group or private) identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub chat_type: String,
    pub title: Option<String>,
}

/// What kind of inbound event a [`Message`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    /// Text or captioned media.
    Text,
    /// Service message announcing new participants (see [`Message::new_chat_members`]).
    NewChatMembers,
    /// The assistant itself was added to the chat as member or administrator.
    BotJoined,
    /// Anything else (stickers without caption, pins, ...).
    Other,
}

/// A single inbound event with sender, chat, content, and optional reply context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub user: User,
    pub chat: Chat,
    /// Message text, or the media caption when there is no text.
    pub content: String,
    pub kind: MessageKind,
    pub direction: MessageDirection,
    pub created_at: DateTime<Utc>,
    pub reply_to_message_id: Option<String>,
    /// Username of the replied-to sender when that sender is a bot; None for people and for
    /// messages that are not replies.
    pub reply_to_bot_username: Option<String>,
    /// Participants announced by a `NewChatMembers` event; empty otherwise.
    pub new_chat_members: Vec<User>,
}

/// Direction of the message (from user or from bot).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MessageDirection {
    Incoming,
    Outgoing,
}

/// Chat display-language preference. `En` is the primary locale, `It` the secondary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    En,
    It,
}

impl Locale {
    /// Storage code (`en` / `it`).
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::It => "it",
        }
    }

    /// Inverse of [`Locale::code`]; exact match only.
    pub fn from_code(code: &str) -> Option<Locale> {
        match code {
            "en" => Some(Locale::En),
            "it" => Some(Locale::It),
            _ => None,
        }
    }

    /// Human label used in confirmations.
    pub fn label(self) -> &'static str {
        match self {
            Locale::En => "English",
            Locale::It => "Italiano",
        }
    }

    /// Initial locale for a chat created by this user: `it*` tags map to `It`, everything else to `En`.
    pub fn from_language_tag(tag: Option<&str>) -> Locale {
        match tag {
            Some(t) if t.trim().to_lowercase().starts_with("it") => Locale::It,
            _ => Locale::default(),
        }
    }

    /// Normalizes user input: `it`/`ita` and `en`/`eng`, case-insensitive, surrounding spaces ignored.
    pub fn normalize(input: &str) -> Option<Locale> {
        match input.trim().to_lowercase().as_str() {
            "it" | "ita" => Some(Locale::It),
            "en" | "eng" => Some(Locale::En),
            _ => None,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Handler result for the chain. `Reply(text)` carries the response body so later handlers can use it in `after()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Skip this handler, try next.
    Ignore,
    /// Stop the chain and attach the text that was sent.
    Reply(String),
}

/// Converts a transport-specific user type to core [`User`].
pub trait ToCoreUser: Send + Sync {
    fn to_core(&self) -> User;
}

/// Converts a transport-specific message type to core [`Message`].
pub trait ToCoreMessage: Send + Sync {
    fn to_core(&self) -> Message;
}

/// Single handler concept: optional before / handle / after. Chain runs all before → handle until Stop/Reply → all after (reverse).
#[async_trait]
pub trait Handler: Send + Sync {
    /// Runs before the handle phase. Return false to stop the chain.
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }
    /// Processes the message. Return Stop or Reply to end the handle phase. Default: Continue.
    async fn handle(&self, _message: &Message) -> crate::error::Result<HandlerResponse> {
        Ok(HandlerResponse::Continue)
    }
    /// Runs after the handle phase (reverse order), with the final response.
    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(first: Option<&str>, last: Option<&str>, username: Option<&str>) -> User {
        User {
            id: 1,
            username: username.map(String::from),
            first_name: first.map(String::from),
            last_name: last.map(String::from),
            is_bot: false,
            language_code: None,
        }
    }

    #[test]
    fn test_locale_normalize() {
        assert_eq!(Locale::normalize("ITA"), Some(Locale::It));
        assert_eq!(Locale::normalize("ita"), Some(Locale::It));
        assert_eq!(Locale::normalize("it"), Some(Locale::It));
        assert_eq!(Locale::normalize(" Eng "), Some(Locale::En));
        assert_eq!(Locale::normalize("en"), Some(Locale::En));
        assert_eq!(Locale::normalize("xyz"), None);
        assert_eq!(Locale::normalize(""), None);
        assert_eq!(Locale::normalize("italiano"), None);
    }

    #[test]
    fn test_locale_from_language_tag() {
        assert_eq!(Locale::from_language_tag(Some("it")), Locale::It);
        assert_eq!(Locale::from_language_tag(Some("it-IT")), Locale::It);
        assert_eq!(Locale::from_language_tag(Some("IT")), Locale::It);
        assert_eq!(Locale::from_language_tag(Some("en-GB")), Locale::En);
        assert_eq!(Locale::from_language_tag(Some("de")), Locale::En);
        assert_eq!(Locale::from_language_tag(None), Locale::En);
    }

    #[test]
    fn test_locale_code_round_trip() {
        for locale in [Locale::En, Locale::It] {
            assert_eq!(Locale::from_code(locale.code()), Some(locale));
        }
        assert_eq!(Locale::from_code("fr"), None);
    }

    #[test]
    fn test_display_name() {
        assert_eq!(user(Some("Ada"), Some("Lovelace"), Some("ada")).display_name(), "Ada Lovelace");
        assert_eq!(user(Some("Ada"), None, None).display_name(), "Ada");
        assert_eq!(user(None, Some("Lovelace"), None).display_name(), "Lovelace");
        assert_eq!(user(Some(""), None, Some("ada")).display_name(), "@ada");
        assert_eq!(user(None, None, None).display_name(), "");
    }
}
