//! Storage crate: chat and member persistence behind the [`ChatStore`] trait.
//!
//! ## Modules
//!
//! - [`error`] – Storage error types
//! - [`models`] – ChatMember
//! - [`repository`] – ChatStore trait consumed by the bot core
//! - [`sqlite_store`] – SqliteChatStore (sqlx)
//! - [`memory_store`] – InMemoryChatStore for tests and ephemeral runs
//! - [`sqlite_pool`] – SqlitePoolManager

mod error;
mod memory_store;
mod models;
mod repository;
mod sqlite_pool;
mod sqlite_store;

pub use error::StorageError;
pub use memory_store::InMemoryChatStore;
pub use models::ChatMember;
pub use repository::ChatStore;
pub use sqlite_pool::SqlitePoolManager;
pub use sqlite_store::SqliteChatStore;
