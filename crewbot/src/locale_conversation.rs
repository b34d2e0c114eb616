//! Per-chat locale selection dialogue, held in memory and keyed by chat id.
//!
//! `Idle -> Prompting -> AwaitingSelection -> Done`; a chat with no entry is `Idle`.

use crewbot_core::Locale;
use dashmap::DashMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    Idle,
    /// The keyboard prompt is being sent.
    Prompting,
    /// The next text message of the chat is taken as the selection.
    AwaitingSelection,
    /// A valid selection was received and is being stored.
    Done,
}

/// What the caller should do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Send the prompt with the keyboard.
    Prompt,
    /// Input was not a known locale; send the error and the keyboard again.
    Reprompt,
    /// Store this locale and confirm.
    Selected(Locale),
    /// No dialogue is waiting for input in this chat.
    Ignored,
}

#[derive(Default)]
pub struct LocaleConversation {
    states: DashMap<i64, ConversationState>,
}

impl LocaleConversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, chat_id: i64) -> ConversationState {
        self.states
            .get(&chat_id)
            .map(|s| *s)
            .unwrap_or(ConversationState::Idle)
    }

    /// Starts (or restarts) the dialogue.
    pub fn begin(&self, chat_id: i64) -> Step {
        self.states.insert(chat_id, ConversationState::Prompting);
        debug!(chat_id, "Locale conversation started");
        Step::Prompt
    }

    /// The prompt was delivered; wait for the selection.
    pub fn prompted(&self, chat_id: i64) {
        self.states
            .insert(chat_id, ConversationState::AwaitingSelection);
    }

    /// Feeds one text message of the chat into the dialogue.
    pub fn receive(&self, chat_id: i64, text: &str) -> Step {
        let Some(mut state) = self.states.get_mut(&chat_id) else {
            return Step::Ignored;
        };
        if *state != ConversationState::AwaitingSelection {
            return Step::Ignored;
        }
        match Locale::normalize(text) {
            Some(locale) => {
                *state = ConversationState::Done;
                Step::Selected(locale)
            }
            None => Step::Reprompt,
        }
    }

    /// The selection was stored; the dialogue ends.
    pub fn finish(&self, chat_id: i64) {
        self.states.remove(&chat_id);
    }

    /// Drops the dialogue without a selection (e.g. the prompt could not be sent).
    pub fn abandon(&self, chat_id: i64) {
        if self.states.remove(&chat_id).is_some() {
            debug!(chat_id, "Locale conversation abandoned");
        }
    }
}
