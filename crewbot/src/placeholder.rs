//! Substitutes intent placeholders in generated text.
//!
//! Only [`InferredCommand::Nominate`] has a placeholder: every `[random_user]` (case-insensitive)
//! becomes the label of one randomly chosen chat member.

use std::sync::LazyLock;

use rand::seq::SliceRandom;
use rand::Rng;
use regex::{NoExpand, Regex};
use storage::ChatMember;
use tracing::{info, instrument, warn};

use crate::inference::{AiReply, InferredCommand};
use crate::members::{member_label, MemberDirectory};

pub const RANDOM_USER_TOKEN: &str = "[random_user]";

/// Used when the roster is empty and the invoker has no display name.
pub const FALLBACK_LABEL: &str = "someone";

static RANDOM_USER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\[random_user\]").expect("hardcoded regex"));

/// Per-message inputs of [`PlaceholderResolver::resolve`].
#[derive(Debug, Clone)]
pub struct ResolveContext {
    pub chat_id: i64,
    pub invoker_display_name: String,
}

#[derive(Clone)]
pub struct PlaceholderResolver {
    members: MemberDirectory,
}

impl PlaceholderResolver {
    pub fn new(members: MemberDirectory) -> Self {
        Self { members }
    }

    /// Returns the final reply text. The roster is only fetched when a placeholder is present;
    /// a failed lookup is logged and treated as an empty roster.
    #[instrument(skip(self, reply, ctx), fields(chat_id = ctx.chat_id, command = ?reply.inferred_command))]
    pub async fn resolve(&self, reply: &AiReply, ctx: &ResolveContext) -> String {
        if !needs_roster(reply) {
            return reply.response_text.clone();
        }

        let roster = match self.members.list(ctx.chat_id).await {
            Ok(roster) => roster,
            Err(e) => {
                warn!(error = %e, "Member lookup failed, using fallback label");
                Vec::new()
            }
        };
        info!(roster_len = roster.len(), "step: resolving placeholders");

        fill_placeholders(
            &reply.response_text,
            &roster,
            &ctx.invoker_display_name,
            &mut rand::thread_rng(),
        )
    }
}

fn needs_roster(reply: &AiReply) -> bool {
    reply.inferred_command == InferredCommand::Nominate
        && RANDOM_USER.is_match(&reply.response_text)
}

/// Pure part of resolution: one draw from `roster`, every token replaced with the same label.
/// An empty roster uses `invoker_display_name`, or [`FALLBACK_LABEL`] when that is blank.
pub fn fill_placeholders<R: Rng + ?Sized>(
    text: &str,
    roster: &[ChatMember],
    invoker_display_name: &str,
    rng: &mut R,
) -> String {
    if !RANDOM_USER.is_match(text) {
        return text.to_string();
    }
    let label = match roster.choose(rng) {
        Some(member) => member_label(member),
        None if !invoker_display_name.trim().is_empty() => invoker_display_name.trim().to_string(),
        None => FALLBACK_LABEL.to_string(),
    };
    RANDOM_USER
        .replace_all(text, NoExpand(&label))
        .into_owned()
}
