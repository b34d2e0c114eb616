//! SQLite-backed [`ChatStore`].
//!
//! Tables: `chats(id, locale, created_at)` and `chat_members(chat_id, user_id, ...)` with a
//! foreign key to `chats`, so member rows can never exist without their chat.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use crewbot_core::{Locale, User};
use tracing::{info, instrument, warn};

use crate::error::StorageError;
use crate::models::ChatMember;
use crate::repository::ChatStore;
use crate::sqlite_pool::SqlitePoolManager;

#[derive(Clone)]
pub struct SqliteChatStore {
    pool_manager: SqlitePoolManager,
}

impl SqliteChatStore {
    /// Opens (or creates) the database and its tables.
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let store = Self { pool_manager };
        store.init().await?;
        Ok(store)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating database tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS chats (
                id INTEGER PRIMARY KEY,
                locale TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS chat_members (
                chat_id INTEGER NOT NULL REFERENCES chats(id),
                user_id INTEGER NOT NULL,
                first_name TEXT,
                last_name TEXT,
                username TEXT,
                birthday TEXT,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (chat_id, user_id)
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_chat_members_chat_id ON chat_members(chat_id)")
            .execute(pool)
            .await?;

        info!("Database tables created successfully");
        Ok(())
    }
}

#[async_trait]
impl ChatStore for SqliteChatStore {
    #[instrument(skip(self))]
    async fn ensure_chat(&self, chat_id: i64, default_locale: Locale) -> Result<(), StorageError> {
        let result = sqlx::query(
            "INSERT INTO chats (id, locale, created_at) VALUES (?, ?, ?) ON CONFLICT(id) DO NOTHING",
        )
        .bind(chat_id)
        .bind(default_locale.code())
        .bind(Utc::now())
        .execute(self.pool_manager.pool())
        .await?;

        if result.rows_affected() > 0 {
            info!(chat_id, locale = %default_locale, "Created chat");
        }
        Ok(())
    }

    async fn get_chat_locale(&self, chat_id: i64) -> Result<Locale, StorageError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT locale FROM chats WHERE id = ?")
            .bind(chat_id)
            .fetch_optional(self.pool_manager.pool())
            .await?;

        Ok(match row {
            Some((code,)) => Locale::from_code(&code).unwrap_or_else(|| {
                warn!(chat_id, code = %code, "Unknown stored locale, using default");
                Locale::default()
            }),
            None => Locale::default(),
        })
    }

    #[instrument(skip(self))]
    async fn set_chat_locale(&self, chat_id: i64, locale: Locale) -> Result<(), StorageError> {
        let result = sqlx::query("UPDATE chats SET locale = ? WHERE id = ?")
            .bind(locale.code())
            .bind(chat_id)
            .execute(self.pool_manager.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(format!("chat {}", chat_id)));
        }
        Ok(())
    }

    async fn upsert_member(&self, chat_id: i64, user: &User) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO chat_members (chat_id, user_id, first_name, last_name, username, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(chat_id, user_id) DO UPDATE SET
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                username = excluded.username,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(chat_id)
        .bind(user.id)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.username)
        .bind(Utc::now())
        .execute(self.pool_manager.pool())
        .await?;
        Ok(())
    }

    async fn list_members(&self, chat_id: i64) -> Result<Vec<ChatMember>, StorageError> {
        let members = sqlx::query_as::<_, ChatMember>(
            "SELECT chat_id, user_id, first_name, last_name, username, birthday FROM chat_members WHERE chat_id = ?",
        )
        .bind(chat_id)
        .fetch_all(self.pool_manager.pool())
        .await?;
        Ok(members)
    }

    #[instrument(skip(self))]
    async fn set_birthday(
        &self,
        chat_id: i64,
        user_id: i64,
        birthday: NaiveDate,
    ) -> Result<(), StorageError> {
        let result = sqlx::query(
            "UPDATE chat_members SET birthday = ?, updated_at = ? WHERE chat_id = ? AND user_id = ?",
        )
        .bind(birthday)
        .bind(Utc::now())
        .bind(chat_id)
        .bind(user_id)
        .execute(self.pool_manager.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound(format!(
                "member {} in chat {}",
                user_id, chat_id
            )));
        }
        Ok(())
    }
}
