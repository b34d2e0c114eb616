//! Drops messages from chats not listed in ALLOWED_CHAT_IDS.

use std::collections::HashSet;

use async_trait::async_trait;
use crewbot_core::{Handler, Message, Result};
use tracing::{info, instrument};

pub struct AllowlistHandler {
    allowed_chat_ids: HashSet<i64>,
}

impl AllowlistHandler {
    pub fn new(allowed_chat_ids: HashSet<i64>) -> Self {
        Self { allowed_chat_ids }
    }
}

#[async_trait]
impl Handler for AllowlistHandler {
    #[instrument(skip(self, message))]
    async fn before(&self, message: &Message) -> Result<bool> {
        if self.allowed_chat_ids.contains(&message.chat.id) {
            return Ok(true);
        }
        info!(
            chat_id = message.chat.id,
            user_id = message.user.id,
            "step: chat not allowed, message dropped"
        );
        Ok(false)
    }
}
