//! Dispatcher runner: converts teloxide updates to core::Message and passes them to HandlerChain.
//! Message updates and the bot's own membership changes are both routed; each unit of work is spawned.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use crewbot_core::{Message as CoreMessage, ToCoreMessage};
use handler_chain::HandlerChain;
use teloxide::dispatching::UpdateFilterExt;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::types::ChatMemberUpdated;
use teloxide::update_listeners::webhooks;
use tracing::{debug, error, info, instrument, warn};

use crate::adapters::{bot_joined_event, TelegramMessageWrapper};
use crate::config::{TelegramConfig, WebhookConfig};

/// Builds the teloxide Bot, pointing it at TELEGRAM_API_URL when set.
pub fn build_bot(config: &TelegramConfig) -> Result<teloxide::Bot> {
    let bot = teloxide::Bot::new(config.bot_token.clone());
    match &config.telegram_api_url {
        Some(url) => {
            let url = reqwest::Url::parse(url)
                .map_err(|e| anyhow::anyhow!("Invalid TELEGRAM_API_URL {}: {}", url, e))?;
            info!(api_url = %url, "Using custom Telegram API URL");
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// Fills `bot_username` from the configured handle, or from getMe when none is configured.
/// A failed getMe leaves the cache empty; mention detection then never matches.
pub async fn resolve_bot_username(
    bot: &teloxide::Bot,
    configured: Option<&str>,
    bot_username: &Arc<tokio::sync::RwLock<Option<String>>>,
) {
    if let Some(username) = configured {
        *bot_username.write().await = Some(username.to_string());
        info!(username = %username, "Bot username set from config");
        return;
    }
    match bot.get_me().await {
        Ok(me) => {
            if let Some(username) = &me.user.username {
                *bot_username.write().await = Some(username.clone());
                info!(username = %username, "Bot username set from getMe");
            }
        }
        Err(e) => warn!(error = %e, "getMe failed; bot username unknown"),
    }
}

fn spawn_chain(chain: HandlerChain, core_msg: CoreMessage) {
    tokio::spawn(async move {
        info!(
            user_id = core_msg.user.id,
            chat_id = core_msg.chat.id,
            message_id = %core_msg.id,
            kind = ?core_msg.kind,
            "step: processing message (handler chain started)"
        );
        if let Err(e) = chain.handle(&core_msg).await {
            error!(error = %e, user_id = core_msg.user.id, chat_id = core_msg.chat.id, "Handler chain failed");
        }
    });
}

/// Content length at info; the text itself only at debug.
fn log_received(core_msg: &CoreMessage, text: Option<&str>) {
    match text {
        Some(text) => {
            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                content_len = text.len(),
                "Received message"
            );
            debug!(chat_id = core_msg.chat.id, message_content = %text, "Message content");
        }
        None => info!(
            user_id = core_msg.user.id,
            chat_id = core_msg.chat.id,
            kind = ?core_msg.kind,
            "Received non-text message"
        ),
    }
}

async fn on_message(msg: teloxide::types::Message, chain: HandlerChain) -> ResponseResult<()> {
    let core_msg = TelegramMessageWrapper(&msg).to_core();
    log_received(&core_msg, msg.text());
    spawn_chain(chain, core_msg);
    Ok(())
}

async fn on_my_chat_member(update: ChatMemberUpdated, chain: HandlerChain) -> ResponseResult<()> {
    match bot_joined_event(&update) {
        Some(core_msg) => {
            info!(chat_id = core_msg.chat.id, "Bot added to chat");
            spawn_chain(chain, core_msg);
        }
        None => info!(
            chat_id = update.chat.id.0,
            status = ?update.new_chat_member.kind.status(),
            "Bot membership changed"
        ),
    }
    Ok(())
}

/// Runs the dispatcher until shutdown. Polls for updates unless `webhook` is set, in which case
/// an axum listener is bound on `0.0.0.0:<port>` and the webhook is registered with Telegram.
#[instrument(skip(bot, handler_chain, webhook))]
pub async fn run_dispatcher(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    webhook: Option<WebhookConfig>,
) -> Result<()> {
    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_my_chat_member().endpoint(on_my_chat_member));

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .dependencies(dptree::deps![handler_chain])
        .enable_ctrlc_handler()
        .build();

    match webhook {
        None => {
            info!("Starting dispatcher in polling mode");
            dispatcher.dispatch().await;
        }
        Some(webhook) => {
            let url = reqwest::Url::parse(&webhook.url)
                .map_err(|e| anyhow::anyhow!("Invalid WEBHOOK_URL {}: {}", webhook.url, e))?;
            let addr = SocketAddr::from(([0, 0, 0, 0], webhook.port));
            info!(url = %url, listen = %addr, "Starting dispatcher in webhook mode");

            let mut options = webhooks::Options::new(addr, url);
            if let Some(secret) = webhook.secret {
                options = options.secret_token(secret);
            }
            let listener = webhooks::axum(bot, options)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to set up webhook: {}", e))?;
            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await;
        }
    }

    info!("Dispatcher stopped");
    Ok(())
}
