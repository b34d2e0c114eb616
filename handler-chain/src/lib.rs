//! # Handler chain
//!
//! Runs a sequence of [`Handler`]s for each inbound message: every `before` in order (any `false`
//! stops the chain), then `handle` in order until one returns Stop or Reply, then every `after`
//! in reverse order with the final response.

use crewbot_core::{Handler, HandlerResponse, Message, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Ordered list of handlers shared by every unit of work; cheap to clone.
#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler (runs in order; first Stop/Reply ends the handle phase).
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs before, handle and after phases. Returns the first Stop or Reply, or Continue.
    #[instrument(skip(self, message), fields(chat_id = message.chat.id, message_id = %message.id))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        info!(user_id = message.user.id, "step: handler_chain started");

        for handler in &self.handlers {
            let name = std::any::type_name_of_val(handler.as_ref());
            if !handler.before(message).await? {
                info!(
                    user_id = message.user.id,
                    handler = %name,
                    "step: handler before returned false, chain stopped"
                );
                return Ok(HandlerResponse::Stop);
            }
        }

        let mut final_response = HandlerResponse::Continue;
        for handler in &self.handlers {
            let name = std::any::type_name_of_val(handler.as_ref());
            let response = handler.handle(message).await?;
            debug!(handler = %name, response = ?response, "Handler processed");

            match response {
                HandlerResponse::Stop | HandlerResponse::Reply(_) => {
                    info!(
                        user_id = message.user.id,
                        handler = %name,
                        reply_len = ?match &response {
                            HandlerResponse::Reply(s) => Some(s.len()),
                            _ => None,
                        },
                        "step: handler chain stopped by handler"
                    );
                    final_response = response;
                    break;
                }
                HandlerResponse::Continue | HandlerResponse::Ignore => continue,
            }
        }

        for handler in self.handlers.iter().rev() {
            handler.after(message, &final_response).await?;
        }

        info!(user_id = message.user.id, "step: handler_chain finished");
        Ok(final_response)
    }
}
