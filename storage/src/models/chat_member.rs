//! Chat member record; maps to the `chat_members` table.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A participant of one chat. Keyed by `(chat_id, user_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ChatMember {
    pub chat_id: i64,
    pub user_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub birthday: Option<NaiveDate>,
}

impl ChatMember {
    /// Builds a member from a core user (no birthday).
    pub fn from_user(chat_id: i64, user: &crewbot_core::User) -> Self {
        Self {
            chat_id,
            user_id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            username: user.username.clone(),
            birthday: None,
        }
    }
}
