//! # crewbot-telegram
//!
//! Telegram transport for crewbot: adapters from teloxide types, a [`crewbot_core::Bot`]
//! implementation, connection config, and the dispatcher runner (polling or webhook).

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{bot_joined_event, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::TelegramBotAdapter;
pub use config::{TelegramConfig, WebhookConfig, DEFAULT_WEBHOOK_PORT};
pub use runner::{build_bot, resolve_bot_username, run_dispatcher};
