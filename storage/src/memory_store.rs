//! In-memory [`ChatStore`], used by tests and when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use crewbot_core::{Locale, User};
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::models::ChatMember;
use crate::repository::ChatStore;

#[derive(Default)]
struct Tables {
    chats: HashMap<i64, Locale>,
    members: HashMap<(i64, i64), ChatMember>,
}

/// Same semantics as the SQLite store, including rejecting member writes for unknown chats.
#[derive(Default)]
pub struct InMemoryChatStore {
    tables: RwLock<Tables>,
}

impl InMemoryChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn chat_count(&self) -> usize {
        self.tables.read().await.chats.len()
    }
}

#[async_trait]
impl ChatStore for InMemoryChatStore {
    async fn ensure_chat(&self, chat_id: i64, default_locale: Locale) -> Result<(), StorageError> {
        self.tables
            .write()
            .await
            .chats
            .entry(chat_id)
            .or_insert(default_locale);
        Ok(())
    }

    async fn get_chat_locale(&self, chat_id: i64) -> Result<Locale, StorageError> {
        Ok(self
            .tables
            .read()
            .await
            .chats
            .get(&chat_id)
            .copied()
            .unwrap_or_default())
    }

    async fn set_chat_locale(&self, chat_id: i64, locale: Locale) -> Result<(), StorageError> {
        match self.tables.write().await.chats.get_mut(&chat_id) {
            Some(stored) => {
                *stored = locale;
                Ok(())
            }
            None => Err(StorageError::NotFound(format!("chat {}", chat_id))),
        }
    }

    async fn upsert_member(&self, chat_id: i64, user: &User) -> Result<(), StorageError> {
        let mut tables = self.tables.write().await;
        if !tables.chats.contains_key(&chat_id) {
            return Err(StorageError::NotFound(format!("chat {}", chat_id)));
        }
        let fresh = ChatMember::from_user(chat_id, user);
        tables
            .members
            .entry((chat_id, user.id))
            .and_modify(|m| {
                m.first_name = fresh.first_name.clone();
                m.last_name = fresh.last_name.clone();
                m.username = fresh.username.clone();
            })
            .or_insert(fresh);
        Ok(())
    }

    async fn list_members(&self, chat_id: i64) -> Result<Vec<ChatMember>, StorageError> {
        Ok(self
            .tables
            .read()
            .await
            .members
            .values()
            .filter(|m| m.chat_id == chat_id)
            .cloned()
            .collect())
    }

    async fn set_birthday(
        &self,
        chat_id: i64,
        user_id: i64,
        birthday: NaiveDate,
    ) -> Result<(), StorageError> {
        match self.tables.write().await.members.get_mut(&(chat_id, user_id)) {
            Some(member) => {
                member.birthday = Some(birthday);
                Ok(())
            }
            None => Err(StorageError::NotFound(format!(
                "member {} in chat {}",
                user_id, chat_id
            ))),
        }
    }
}
