//! Tests for [`crewbot::locale_conversation::LocaleConversation`] transitions.

use crewbot::{ConversationState, LocaleConversation, Step};
use crewbot_core::Locale;

/// **Test: Full happy path Idle -> Prompting -> AwaitingSelection -> Done -> Idle.**
#[test]
fn test_happy_path() {
    let conv = LocaleConversation::new();
    assert_eq!(conv.state(1), ConversationState::Idle);

    assert_eq!(conv.begin(1), Step::Prompt);
    assert_eq!(conv.state(1), ConversationState::Prompting);

    conv.prompted(1);
    assert_eq!(conv.state(1), ConversationState::AwaitingSelection);

    assert_eq!(conv.receive(1, "ITA"), Step::Selected(Locale::It));
    assert_eq!(conv.state(1), ConversationState::Done);

    conv.finish(1);
    assert_eq!(conv.state(1), ConversationState::Idle);
}

/// **Test: Invalid input re-prompts and stays awaiting; accepted spellings normalize.**
#[test]
fn test_invalid_then_valid() {
    let conv = LocaleConversation::new();
    conv.begin(7);
    conv.prompted(7);

    assert_eq!(conv.receive(7, "xyz"), Step::Reprompt);
    assert_eq!(conv.state(7), ConversationState::AwaitingSelection);
    assert_eq!(conv.receive(7, " eng "), Step::Selected(Locale::En));
}

/// **Test: Input is ignored when nothing awaits it, and chats are independent.**
#[test]
fn test_ignored_and_independent() {
    let conv = LocaleConversation::new();
    assert_eq!(conv.receive(1, "ita"), Step::Ignored);

    conv.begin(1);
    assert_eq!(conv.receive(1, "ita"), Step::Ignored);

    conv.prompted(1);
    assert_eq!(conv.receive(2, "ita"), Step::Ignored);
    assert_eq!(conv.state(1), ConversationState::AwaitingSelection);
}

/// **Test: Re-entering restarts the dialogue; abandon removes it.**
#[test]
fn test_restart_and_abandon() {
    let conv = LocaleConversation::new();
    conv.begin(1);
    conv.prompted(1);
    conv.begin(1);
    assert_eq!(conv.state(1), ConversationState::Prompting);

    conv.abandon(1);
    assert_eq!(conv.state(1), ConversationState::Idle);
}
