use async_trait::async_trait;
use chrono::NaiveDate;
use crewbot_core::{Locale, User};

use crate::error::StorageError;
use crate::models::ChatMember;

/// Persistent store operations consumed by the bot core.
///
/// Implementations must make `ensure_chat` and `upsert_member` idempotent and rely only on
/// per-row atomicity.
#[async_trait]
pub trait ChatStore: Send + Sync {
    /// Creates the chat with `default_locale` if absent; an existing chat keeps its locale.
    async fn ensure_chat(&self, chat_id: i64, default_locale: Locale) -> Result<(), StorageError>;
    /// Stored locale of the chat; the default locale when the chat or its value is unknown.
    async fn get_chat_locale(&self, chat_id: i64) -> Result<Locale, StorageError>;
    async fn set_chat_locale(&self, chat_id: i64, locale: Locale) -> Result<(), StorageError>;
    /// Inserts or refreshes name fields of `(chat_id, user.id)`; keeps any stored birthday.
    async fn upsert_member(&self, chat_id: i64, user: &User) -> Result<(), StorageError>;
    async fn list_members(&self, chat_id: i64) -> Result<Vec<ChatMember>, StorageError>;
    /// Fails with `NotFound` when the member has not been upserted yet.
    async fn set_birthday(
        &self,
        chat_id: i64,
        user_id: i64,
        birthday: NaiveDate,
    ) -> Result<(), StorageError>;
}
