//! # crewbot-core
//!
//! Core types and traits for the group-chat assistant: [`Bot`], [`Handler`], message, user and
//! locale types, the error taxonomy, and tracing initialization. Transport-agnostic; used by
//! storage, handler-chain, crewbot-telegram and the crewbot application.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{parse_message_id, Bot, ReplyMarkup};
pub use error::{CrewbotError, Result};
pub use logger::{init_tracing, DEFAULT_LOG_DIRECTIVES};
pub use types::{
    Chat, Handler, HandlerResponse, Locale, Message, MessageDirection, MessageKind, ToCoreMessage,
    ToCoreUser, User,
};
