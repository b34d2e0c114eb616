//! Tests for [`crewbot::mention`]: detection, stripping, and the addressed-text rules.

use crewbot::mention::{addressed_text, detect, EMPTY_MENTION_PLACEHOLDER};

use fakes::{text_message, user, CHAT_ID};

/// **Test: A mention in the middle of a sentence is detected and removed.**
///
/// **Setup:** Text `"hey @BotName please help"`, handle `BotName`.
/// **Action:** `detect`.
/// **Expected:** mentioned; stripped text `"hey please help"`.
#[test]
fn test_detect_mention_in_sentence() {
    let mention = detect("hey @BotName please help", "BotName");
    assert!(mention.mentioned);
    assert_eq!(mention.stripped_text, "hey please help");
}

/// **Test: Detection ignores case and strips every occurrence.**
#[test]
fn test_detect_case_insensitive_all_occurrences() {
    let mention = detect("@botname   ciao\t@BOTNAME  come va?", "BotName");
    assert!(mention.mentioned);
    assert_eq!(mention.stripped_text, "ciao come va?");
}

/// **Test: Text without the handle is not a mention; a leading `@` on the handle is tolerated.**
#[test]
fn test_detect_not_mentioned() {
    assert!(!detect("hello @someone_else", "BotName").mentioned);
    assert!(detect("hi @crew_bot", "@crew_bot").mentioned);
    assert!(!detect("hi @crew_bot", "").mentioned);
}

/// **Test: A bare mention leaves stripped text empty.**
#[test]
fn test_detect_bare_mention() {
    let mention = detect("  @BotName  ", "BotName");
    assert!(mention.mentioned);
    assert_eq!(mention.stripped_text, "");
}

/// **Test: addressed_text substitutes the placeholder for a bare mention.**
///
/// **Setup:** Message `"@crew_bot"`; username known.
/// **Action:** `addressed_text`.
/// **Expected:** `Some(EMPTY_MENTION_PLACEHOLDER)`.
#[test]
fn test_addressed_text_bare_mention_uses_placeholder() {
    let message = text_message(CHAT_ID, user(1, Some("Ada"), None, None), "@crew_bot");
    assert_eq!(
        addressed_text(&message, Some("crew_bot")).as_deref(),
        Some(EMPTY_MENTION_PLACEHOLDER)
    );
}

/// **Test: Unknown handle means not addressed; a reply counts only when it targets this bot.**
///
/// **Setup:** Message without a mention, replying to message 9.
/// **Action:** Vary the replied-to bot's username and the known handle.
/// **Expected:** Only a reply to `crew_bot` (any case) is addressed; other bots, people and an
/// unknown handle yield None.
#[test]
fn test_addressed_text_unknown_handle_and_reply_to_bot() {
    let mut message = text_message(CHAT_ID, user(1, Some("Ada"), None, None), "@crew_bot hi");
    assert_eq!(addressed_text(&message, None), None);

    message.content = "and  what about tomorrow?".to_string();
    message.reply_to_message_id = Some("9".to_string());
    message.reply_to_bot_username = Some("Crew_Bot".to_string());
    assert_eq!(
        addressed_text(&message, Some("crew_bot")).as_deref(),
        Some("and what about tomorrow?")
    );
    assert_eq!(addressed_text(&message, None), None);

    message.reply_to_bot_username = Some("weather_bot".to_string());
    assert_eq!(addressed_text(&message, Some("crew_bot")), None);

    message.reply_to_bot_username = None;
    assert_eq!(addressed_text(&message, Some("crew_bot")), None);
}
