//! # crewbot
//!
//! Group-chat assistant: replies when mentioned, infers a nomination intent from the reply,
//! fills member placeholders, and keeps a per-chat locale. Wires crewbot-core, handler-chain,
//! storage, openai-client and crewbot-telegram.

pub mod birthday;
pub mod chat_state;
pub mod cli;
pub mod commands;
pub mod components;
pub mod config;
pub mod handlers;
pub mod i18n;
pub mod inference;
pub mod locale_conversation;
pub mod members;
pub mod mention;
pub mod placeholder;
pub mod prompt;
pub mod runner;

pub use chat_state::ChatStateStore;
pub use cli::{load_config, Cli, Commands};
pub use components::{build_bot_components, build_handler_chain, BotComponents};
pub use config::BotConfig;
pub use inference::{infer, AiReply, InferredCommand};
pub use locale_conversation::{ConversationState, LocaleConversation, Step};
pub use members::MemberDirectory;
pub use mention::{addressed_text, detect, Mention, EMPTY_MENTION_PLACEHOLDER};
pub use placeholder::{fill_placeholders, PlaceholderResolver, ResolveContext};
pub use runner::run_bot;
