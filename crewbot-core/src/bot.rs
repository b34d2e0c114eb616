//! Bot abstraction for sending replies.
//!
//! [`Bot`] is transport-agnostic; crewbot-telegram implements it via teloxide.

use crate::error::{CrewbotError, Result};
use crate::types::{Chat, Message};
use async_trait::async_trait;

/// Optional reply keyboard attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyMarkup {
    /// One-time, resized keyboard; each inner vec is a row of button labels.
    Keyboard(Vec<Vec<String>>),
    /// Removes a previously shown keyboard.
    RemoveKeyboard,
}

impl ReplyMarkup {
    /// Builds a keyboard with one button per row.
    pub fn single_column<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Keyboard(labels.into_iter().map(|l| vec![l.into()]).collect())
    }
}

/// Outbound side of the transport. Implementations map to a chat platform (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a plain text message to the chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()>;
    /// Sends plain text threaded as a reply to `message` (falls back to unthreaded if the target is gone).
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()>;
    /// Same as [`Bot::reply_to`] with a keyboard attached or removed.
    async fn reply_with_markup(
        &self,
        message: &Message,
        text: &str,
        markup: ReplyMarkup,
    ) -> Result<()>;
}

/// Parses a transport message id string into an i32.
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse()
        .map_err(|_| CrewbotError::Bot(format!("Invalid message_id: {}", s)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_message_id_valid() {
        assert_eq!(parse_message_id("123").unwrap(), 123);
        assert_eq!(parse_message_id("0").unwrap(), 0);
    }

    #[test]
    fn test_parse_message_id_invalid() {
        assert!(parse_message_id("").is_err());
        assert!(parse_message_id("abc").is_err());
        assert!(parse_message_id("12.3").is_err());
    }

    #[test]
    fn test_single_column_keyboard() {
        let markup = ReplyMarkup::single_column(["ITA", "ENG"]);
        assert_eq!(
            markup,
            ReplyMarkup::Keyboard(vec![vec!["ITA".to_string()], vec!["ENG".to_string()]])
        );
    }
}
