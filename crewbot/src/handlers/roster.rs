//! Roster events: participants joining and the bot itself being added.

use std::sync::Arc;

use async_trait::async_trait;
use crewbot_core::{Handler, HandlerResponse, Locale, Message, MessageKind, Result};
use tracing::{error, info, instrument};

use crate::chat_state::ChatStateStore;
use crate::members::MemberDirectory;

pub struct RosterHandler {
    chat_state: Arc<ChatStateStore>,
    members: MemberDirectory,
}

impl RosterHandler {
    pub fn new(chat_state: Arc<ChatStateStore>, members: MemberDirectory) -> Self {
        Self {
            chat_state,
            members,
        }
    }
}

#[async_trait]
impl Handler for RosterHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if !matches!(message.kind, MessageKind::NewChatMembers | MessageKind::BotJoined) {
            return Ok(HandlerResponse::Continue);
        }

        let preferred = Locale::from_language_tag(message.user.language_code.as_deref());
        if let Err(e) = self.chat_state.ensure(message.chat.id, preferred).await {
            error!(error = %e, "Failed to ensure chat on roster event");
            return Ok(HandlerResponse::Stop);
        }

        let mut added = 0usize;
        for member in message.new_chat_members.iter().filter(|u| !u.is_bot) {
            match self.members.upsert(message.chat.id, member).await {
                Ok(()) => added += 1,
                Err(e) => error!(error = %e, user_id = member.id, "Failed to upsert new member"),
            }
        }
        info!(kind = ?message.kind, added, "step: roster event processed");
        Ok(HandlerResponse::Stop)
    }
}
