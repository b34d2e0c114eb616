//! Tests for [`crewbot::placeholder`]: single draw per message, uniform choice, fallbacks.

use std::collections::HashMap;
use std::sync::Arc;

use crewbot::members::member_label;
use crewbot::{fill_placeholders, AiReply, InferredCommand, MemberDirectory, PlaceholderResolver, ResolveContext};
use crewbot_core::Locale;
use rand::rngs::StdRng;
use rand::SeedableRng;
use storage::{ChatMember, ChatStore, InMemoryChatStore};

use fakes::{user, InstrumentedStore, CHAT_ID};

fn roster(n: i64) -> Vec<ChatMember> {
    (1..=n)
        .map(|id| ChatMember {
            chat_id: CHAT_ID,
            user_id: id,
            first_name: Some(format!("Member{id}")),
            last_name: None,
            username: Some(format!("member{id}")),
            birthday: None,
        })
        .collect()
}

fn nominate(text: &str) -> AiReply {
    AiReply {
        response_text: text.to_string(),
        inferred_command: InferredCommand::Nominate,
    }
}

/// **Test: Three placeholders with five members all get the same label.**
///
/// **Setup:** Roster of 5; text with three `[random_user]` in mixed case.
/// **Action:** `fill_placeholders` with a seeded rng, many seeds.
/// **Expected:** No token left; all three positions hold one identical roster label.
#[test]
fn test_all_occurrences_same_label() {
    let members = roster(5);
    let labels: Vec<String> = members.iter().map(member_label).collect();

    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let out = fill_placeholders(
            "[random_user] vs [RANDOM_USER] vs [Random_User]",
            &members,
            "Ada",
            &mut rng,
        );
        let parts: Vec<&str> = out.split(" vs ").collect();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| *p == parts[0]), "out: {out}");
        assert!(labels.iter().any(|l| l == parts[0]));
    }
}

/// **Test: Selection is roughly uniform across the roster.**
///
/// **Setup:** Roster of 5, 5000 trials with a seeded rng.
/// **Expected:** Every member chosen between 800 and 1200 times.
#[test]
fn test_uniform_selection() {
    let members = roster(5);
    let mut rng = StdRng::seed_from_u64(42);
    let mut counts: HashMap<String, usize> = HashMap::new();

    for _ in 0..5000 {
        let out = fill_placeholders("[random_user]", &members, "Ada", &mut rng);
        *counts.entry(out).or_default() += 1;
    }

    assert_eq!(counts.len(), 5);
    for (label, count) in counts {
        assert!((800..=1200).contains(&count), "{label} chosen {count} times");
    }
}

/// **Test: Empty roster falls back to the invoker, then to "someone".**
#[test]
fn test_empty_roster_fallbacks() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(fill_placeholders("go [random_user]!", &[], "Ada Lovelace", &mut rng), "go Ada Lovelace!");
    assert_eq!(fill_placeholders("go [random_user]!", &[], "  ", &mut rng), "go someone!");
}

/// **Test: Text without a placeholder is unchanged; `$` in labels is not expanded.**
#[test]
fn test_no_placeholder_and_literal_labels() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(fill_placeholders("nothing here", &roster(3), "Ada", &mut rng), "nothing here");
    assert_eq!(fill_placeholders("[random_user]", &[], "$1 Ada", &mut rng), "$1 Ada");
}

/// **Test: resolve reads the roster from the directory; other intents are untouched.**
#[tokio::test]
async fn test_resolve_uses_directory() {
    let store = Arc::new(InMemoryChatStore::new());
    store.ensure_chat(CHAT_ID, Locale::En).await.unwrap();
    store
        .upsert_member(CHAT_ID, &user(5, Some("Grace"), Some("Hopper"), None))
        .await
        .unwrap();
    let resolver = PlaceholderResolver::new(MemberDirectory::new(store));
    let ctx = ResolveContext {
        chat_id: CHAT_ID,
        invoker_display_name: "Ada".to_string(),
    };

    let out = resolver.resolve(&nominate("Tonight [random_user] cooks"), &ctx).await;
    assert_eq!(out, "Tonight Grace Hopper cooks");

    let plain = AiReply::plain("[random_user] stays");
    assert_eq!(resolver.resolve(&plain, &ctx).await, "[random_user] stays");
}

/// **Test: A failing roster lookup is treated as empty (invoker fallback), not an error.**
#[tokio::test]
async fn test_resolve_lookup_failure_falls_back() {
    let store = Arc::new(InstrumentedStore::new().failing_list());
    let resolver = PlaceholderResolver::new(MemberDirectory::new(store));
    let ctx = ResolveContext {
        chat_id: CHAT_ID,
        invoker_display_name: "Ada".to_string(),
    };

    let out = resolver.resolve(&nominate("[random_user] wins"), &ctx).await;
    assert_eq!(out, "Ada wins");
}
