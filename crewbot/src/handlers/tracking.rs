//! Touches chat state and the member directory for every message a person sends.
//!
//! Failures are logged and never stop the chain.

use std::sync::Arc;

use async_trait::async_trait;
use crewbot_core::{Handler, Locale, Message, MessageKind, Result};
use tracing::{error, info, instrument};

use crate::chat_state::ChatStateStore;
use crate::members::MemberDirectory;

pub struct TrackingHandler {
    chat_state: Arc<ChatStateStore>,
    members: MemberDirectory,
}

impl TrackingHandler {
    pub fn new(chat_state: Arc<ChatStateStore>, members: MemberDirectory) -> Self {
        Self {
            chat_state,
            members,
        }
    }
}

#[async_trait]
impl Handler for TrackingHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id, user_id = message.user.id))]
    async fn before(&self, message: &Message) -> Result<bool> {
        // Bot-joined events carry the user who added the bot; they are handled by RosterHandler.
        if message.user.is_bot || message.user.id == 0 || message.kind == MessageKind::BotJoined {
            return Ok(true);
        }

        let preferred = Locale::from_language_tag(message.user.language_code.as_deref());
        if let Err(e) = self.chat_state.ensure_once(message.chat.id, preferred).await {
            error!(error = %e, "Failed to ensure chat, member not tracked");
            return Ok(true);
        }
        if let Err(e) = self.members.upsert(message.chat.id, &message.user).await {
            error!(error = %e, "Failed to upsert member");
            return Ok(true);
        }
        info!("step: TrackingHandler before done, member tracked");
        Ok(true)
    }
}
