//! Component factory: builds BotComponents from config. Isolates assembly logic from runner.

use std::sync::Arc;

use anyhow::Result;
use crewbot_core::Bot;
use handler_chain::HandlerChain;
use openai_client::{CompletionService, OpenAIClient};
use storage::{ChatStore, SqliteChatStore};
use tokio::sync::RwLock;
use tracing::{error, info, instrument};

use crate::chat_state::ChatStateStore;
use crate::config::BotConfig;
use crate::handlers::{
    AllowlistHandler, CommandHandler, LocaleSelectionHandler, MentionReplyHandler, RosterHandler,
    TrackingHandler,
};
use crate::locale_conversation::LocaleConversation;
use crate::members::MemberDirectory;
use crate::placeholder::PlaceholderResolver;

/// Shared dependencies of the handler chain.
#[derive(Clone)]
pub struct BotComponents {
    pub bot: Arc<dyn Bot>,
    pub bot_username: Arc<RwLock<Option<String>>>,
    pub completion: Arc<dyn CompletionService>,
    pub chat_state: Arc<ChatStateStore>,
    pub members: MemberDirectory,
    pub conversation: Arc<LocaleConversation>,
}

impl BotComponents {
    /// Assembles components around an existing store, bot and completion service (used by tests).
    pub fn new(
        store: Arc<dyn ChatStore>,
        bot: Arc<dyn Bot>,
        completion: Arc<dyn CompletionService>,
        bot_username: Option<String>,
    ) -> Self {
        Self {
            bot,
            bot_username: Arc::new(RwLock::new(bot_username)),
            completion,
            chat_state: Arc::new(ChatStateStore::new(store.clone())),
            members: MemberDirectory::new(store),
            conversation: Arc::new(LocaleConversation::new()),
        }
    }
}

/// Opens the SQLite store and builds the completion client.
#[instrument(skip(config, bot))]
pub async fn build_bot_components(config: &BotConfig, bot: Arc<dyn Bot>) -> Result<BotComponents> {
    let store = SqliteChatStore::new(&config.database_url).await.map_err(|e| {
        error!(error = %e, database_url = %config.database_url, "Failed to initialize chat storage");
        anyhow::anyhow!("Failed to initialize chat storage: {}", e)
    })?;
    info!(database_url = %config.database_url, "Chat storage ready");

    let completion = OpenAIClient::new(config.completion.clone())?;

    Ok(BotComponents::new(
        Arc::new(store),
        bot,
        Arc::new(completion),
        config.telegram.bot_username.clone(),
    ))
}

/// Chain order: allowlist, tracking, roster, commands, locale selection, mention reply.
pub fn build_handler_chain(components: &BotComponents, config: &BotConfig) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(AllowlistHandler::new(config.allowed_chat_ids.clone())))
        .add_handler(Arc::new(TrackingHandler::new(
            components.chat_state.clone(),
            components.members.clone(),
        )))
        .add_handler(Arc::new(RosterHandler::new(
            components.chat_state.clone(),
            components.members.clone(),
        )))
        .add_handler(Arc::new(CommandHandler::new(
            components.bot.clone(),
            components.bot_username.clone(),
            components.chat_state.clone(),
            components.members.clone(),
            components.conversation.clone(),
        )))
        .add_handler(Arc::new(LocaleSelectionHandler::new(
            components.bot.clone(),
            components.chat_state.clone(),
            components.conversation.clone(),
        )))
        .add_handler(Arc::new(MentionReplyHandler::new(
            components.bot.clone(),
            components.bot_username.clone(),
            components.completion.clone(),
            components.chat_state.clone(),
            PlaceholderResolver::new(components.members.clone()),
            config.system_prompt.clone(),
        )))
}
