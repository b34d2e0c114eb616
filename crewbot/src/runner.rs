//! Entry point: init logging, validate config, build components, then run the dispatcher.

use std::sync::Arc;

use anyhow::Result;
use crewbot_core::init_tracing;
use crewbot_telegram::{build_bot, resolve_bot_username, run_dispatcher, TelegramBotAdapter};
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{info, instrument, warn};

use crate::commands::Command;
use crate::components::{build_bot_components, build_handler_chain};
use crate::config::BotConfig;

#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(&config.log_file)?;
    config.log_summary();

    if config.allowed_chat_ids.is_empty() {
        warn!("ALLOWED_CHAT_IDS is empty; every message will be dropped");
    }

    let teloxide_bot = build_bot(&config.telegram)?;
    let bot_adapter = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let components = build_bot_components(&config, bot_adapter).await?;

    resolve_bot_username(
        &teloxide_bot,
        config.telegram.bot_username.as_deref(),
        &components.bot_username,
    )
    .await;
    if let Err(e) = teloxide_bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    let handler_chain = build_handler_chain(&components, &config);
    info!(handlers = handler_chain.len(), "Bot started successfully");

    run_dispatcher(teloxide_bot, handler_chain, config.telegram.webhook.clone()).await
}
