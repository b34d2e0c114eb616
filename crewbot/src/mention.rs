//! @-mention detection and stripping.
//!
//! The mention reply handler uses [`addressed_text`] to decide whether a message triggers a
//! completion and what text to send upstream.

use crewbot_core::Message;
use regex::{NoExpand, RegexBuilder};

/// Sent upstream instead of an empty string when the message was only the mention.
pub const EMPTY_MENTION_PLACEHOLDER: &str =
    "The user only mentioned you without writing anything else. Greet them briefly and invite them to talk.";

/// Result of [`detect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    pub mentioned: bool,
    /// Text with every `@handle` removed, whitespace runs collapsed, trimmed. May be empty.
    pub stripped_text: String,
}

/// Case-insensitive substring match of `@handle`; strips all occurrences when found.
pub fn detect(text: &str, handle: &str) -> Mention {
    let handle = handle.trim().trim_start_matches('@');
    if handle.is_empty() {
        return Mention {
            mentioned: false,
            stripped_text: collapse_whitespace(text),
        };
    }

    let pattern = format!("@{}", regex::escape(handle));
    let Ok(re) = RegexBuilder::new(&pattern).case_insensitive(true).build() else {
        return Mention {
            mentioned: false,
            stripped_text: collapse_whitespace(text),
        };
    };

    if !re.is_match(text) {
        return Mention {
            mentioned: false,
            stripped_text: collapse_whitespace(text),
        };
    }
    let stripped = re.replace_all(text, NoExpand(" "));
    Mention {
        mentioned: true,
        stripped_text: collapse_whitespace(&stripped),
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text to send upstream when `message` addresses the assistant, or None.
///
/// - **Reply to one of the assistant's messages**: the whole message text. Replies to other
///   bots do not count.
/// - **@mention**: the stripped text, or [`EMPTY_MENTION_PLACEHOLDER`] when nothing is left.
/// - An unknown handle matches neither.
pub fn addressed_text(message: &Message, bot_username: Option<&str>) -> Option<String> {
    let handle = bot_username
        .map(|h| h.trim().trim_start_matches('@'))
        .filter(|h| !h.is_empty());
    let replied_to_bot = match (handle, message.reply_to_bot_username.as_deref()) {
        (Some(handle), Some(author)) => {
            message.reply_to_message_id.is_some() && author.eq_ignore_ascii_case(handle)
        }
        _ => false,
    };

    let mention = handle.map(|handle| detect(&message.content, handle));
    let text = match mention {
        Some(m) if m.mentioned => m.stripped_text,
        _ if replied_to_bot => collapse_whitespace(&message.content),
        _ => return None,
    };

    if text.is_empty() {
        Some(EMPTY_MENTION_PLACEHOLDER.to_string())
    } else {
        Some(text)
    }
}
