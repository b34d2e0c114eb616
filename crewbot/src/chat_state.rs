//! Process-wide chat state: at-most-once chat creation and a locale cache over [`ChatStore`].

use std::sync::Arc;

use crewbot_core::{Locale, Result};
use dashmap::DashMap;
use storage::ChatStore;
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

/// Shared by every unit of work as `Arc<ChatStateStore>`.
pub struct ChatStateStore {
    store: Arc<dyn ChatStore>,
    /// One cell per chat id; initialized once `ensure_chat` succeeded.
    ensured: DashMap<i64, Arc<OnceCell<()>>>,
    locales: DashMap<i64, Locale>,
}

impl ChatStateStore {
    pub fn new(store: Arc<dyn ChatStore>) -> Self {
        Self {
            store,
            ensured: DashMap::new(),
            locales: DashMap::new(),
        }
    }

    fn cell(&self, chat_id: i64) -> Arc<OnceCell<()>> {
        // The map guard must be dropped before awaiting the cell.
        self.ensured
            .entry(chat_id)
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }

    /// Creates the chat in the store at most once per process. Concurrent callers for the same
    /// id wait for the in-flight attempt; a failed attempt leaves the cell empty so a later call
    /// retries. The locale is cached afterwards if not cached yet.
    #[instrument(skip(self))]
    pub async fn ensure_once(&self, chat_id: i64, preferred_locale: Locale) -> Result<()> {
        let cell = self.cell(chat_id);
        cell.get_or_try_init(|| async {
            info!("step: ensuring chat in store");
            self.store.ensure_chat(chat_id, preferred_locale).await
        })
        .await?;
        self.prime_locale(chat_id).await
    }

    /// Unguarded variant for explicit setup paths (/start, roster events, bot added).
    /// Always hits the store and then marks the chat ensured.
    #[instrument(skip(self))]
    pub async fn ensure(&self, chat_id: i64, preferred_locale: Locale) -> Result<()> {
        self.store.ensure_chat(chat_id, preferred_locale).await?;
        // Err means another caller initialized it meanwhile, which is the same outcome.
        let _ = self.cell(chat_id).set(());
        self.prime_locale(chat_id).await
    }

    async fn prime_locale(&self, chat_id: i64) -> Result<()> {
        if self.locales.contains_key(&chat_id) {
            return Ok(());
        }
        let locale = self.store.get_chat_locale(chat_id).await?;
        self.locales.entry(chat_id).or_insert(locale);
        Ok(())
    }

    /// Reads through the cache. Chats not ensured in this process are read from the store
    /// without caching, so a later ensure can still record the creator's locale.
    pub async fn get_locale(&self, chat_id: i64) -> Result<Locale> {
        let cached = self.locales.get(&chat_id).map(|l| *l);
        if let Some(locale) = cached {
            return Ok(locale);
        }
        let ensured = self.is_ensured(chat_id);
        let locale = self.store.get_chat_locale(chat_id).await?;
        if !ensured {
            debug!(chat_id, locale = %locale, "Chat not ensured yet, locale not cached");
            return Ok(locale);
        }
        // A concurrent set_locale may have cached a newer value meanwhile.
        let locale = *self.locales.entry(chat_id).or_insert(locale);
        debug!(chat_id, locale = %locale, "Locale cached");
        Ok(locale)
    }

    /// Writes through to the store, then replaces the cached value.
    #[instrument(skip(self))]
    pub async fn set_locale(&self, chat_id: i64, locale: Locale) -> Result<()> {
        self.store.set_chat_locale(chat_id, locale).await?;
        self.locales.insert(chat_id, locale);
        info!("Chat locale updated");
        Ok(())
    }

    /// Whether `ensure_once`/`ensure` has succeeded for this chat in this process.
    pub fn is_ensured(&self, chat_id: i64) -> bool {
        self.ensured
            .get(&chat_id)
            .map(|cell| cell.initialized())
            .unwrap_or(false)
    }
}
