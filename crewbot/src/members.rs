//! Member directory: idempotent upsert and listing of chat participants.

use std::sync::Arc;

use chrono::NaiveDate;
use crewbot_core::{Result, User};
use storage::{ChatMember, ChatStore};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct MemberDirectory {
    store: Arc<dyn ChatStore>,
}

impl MemberDirectory {
    pub fn new(store: Arc<dyn ChatStore>) -> Self {
        Self { store }
    }

    /// Records the user as a member of the chat; repeated calls converge to the latest names.
    /// Bot accounts are skipped. The chat must already exist.
    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn upsert(&self, chat_id: i64, user: &User) -> Result<()> {
        if user.is_bot {
            debug!("Skipping bot account");
            return Ok(());
        }
        self.store.upsert_member(chat_id, user).await?;
        Ok(())
    }

    pub async fn list(&self, chat_id: i64) -> Result<Vec<ChatMember>> {
        Ok(self.store.list_members(chat_id).await?)
    }

    /// Upserts the user first, then stores the birthday.
    #[instrument(skip(self, user), fields(user_id = user.id))]
    pub async fn set_birthday(&self, chat_id: i64, user: &User, birthday: NaiveDate) -> Result<()> {
        self.upsert(chat_id, user).await?;
        self.store.set_birthday(chat_id, user.id, birthday).await?;
        Ok(())
    }
}

fn full_name(member: &ChatMember) -> Option<String> {
    let name = [member.first_name.as_deref(), member.last_name.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    Some(name).filter(|n| !n.is_empty())
}

fn handle(member: &ChatMember) -> Option<String> {
    member
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(|u| format!("@{}", u))
}

/// Label substituted into generated text: `@username`, else "first last", else `user <id>`.
pub fn member_label(member: &ChatMember) -> String {
    handle(member)
        .or_else(|| full_name(member))
        .unwrap_or_else(|| format!("user {}", member.user_id))
}

/// Name used by `/nominate`: "first last", else `@username`, else `user <id>`.
pub fn nominee_name(member: &ChatMember) -> String {
    full_name(member)
        .or_else(|| handle(member))
        .unwrap_or_else(|| format!("user {}", member.user_id))
}
