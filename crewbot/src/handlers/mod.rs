//! Handlers of the message pipeline, in chain order:
//! allowlist, tracking, roster, commands, locale selection, mention reply.

mod allowlist;
mod commands;
mod locale_selection;
mod mention_reply;
mod roster;
mod tracking;

pub use allowlist::AllowlistHandler;
pub use commands::CommandHandler;
pub use locale_selection::LocaleSelectionHandler;
pub use mention_reply::{completion_error, MentionReplyHandler};
pub use roster::RosterHandler;
pub use tracking::TrackingHandler;

use crewbot_core::Locale;
use tracing::warn;

use crate::chat_state::ChatStateStore;

/// Locale of the chat, or the default one when the store cannot be read.
pub(crate) async fn chat_locale(chat_state: &ChatStateStore, chat_id: i64) -> Locale {
    match chat_state.get_locale(chat_id).await {
        Ok(locale) => locale,
        Err(e) => {
            warn!(chat_id, error = %e, "Failed to read chat locale, using default");
            Locale::default()
        }
    }
}
