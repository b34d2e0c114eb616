//! Tests for [`crewbot::ChatStateStore`]: at-most-once ensure, retry after failure, locale cache.

use std::sync::Arc;
use std::time::Duration;

use crewbot::ChatStateStore;
use crewbot_core::Locale;
use storage::ChatStore;

use fakes::{InstrumentedStore, CHAT_ID};

/// **Test: N concurrent ensure_once calls for one chat hit the store once.**
///
/// **Setup:** Store whose ensure_chat takes 50ms and counts calls.
/// **Action:** 32 tasks call `ensure_once(CHAT_ID, It)` at the same time.
/// **Expected:** All succeed; ensure_chat called exactly once; locale cached as It.
#[tokio::test]
async fn test_concurrent_ensure_once_single_store_call() {
    let store = Arc::new(InstrumentedStore::new().with_ensure_delay(Duration::from_millis(50)));
    let state = Arc::new(ChatStateStore::new(store.clone()));

    let tasks: Vec<_> = (0..32)
        .map(|_| {
            let state = state.clone();
            tokio::spawn(async move { state.ensure_once(CHAT_ID, Locale::It).await })
        })
        .collect();
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(store.ensure_calls(), 1);
    assert!(state.is_ensured(CHAT_ID));
    assert_eq!(state.get_locale(CHAT_ID).await.unwrap(), Locale::It);
}

/// **Test: Different chats are ensured independently.**
#[tokio::test]
async fn test_ensure_once_per_chat() {
    let store = Arc::new(InstrumentedStore::new());
    let state = ChatStateStore::new(store.clone());

    state.ensure_once(1, Locale::En).await.unwrap();
    state.ensure_once(2, Locale::En).await.unwrap();
    state.ensure_once(1, Locale::En).await.unwrap();

    assert_eq!(store.ensure_calls(), 2);
}

/// **Test: A failed attempt is not remembered; the next call retries.**
#[tokio::test]
async fn test_failed_ensure_is_retried() {
    let store = Arc::new(InstrumentedStore::new().failing_first_ensure());
    let state = ChatStateStore::new(store.clone());

    assert!(state.ensure_once(CHAT_ID, Locale::En).await.is_err());
    assert!(!state.is_ensured(CHAT_ID));

    state.ensure_once(CHAT_ID, Locale::En).await.unwrap();
    state.ensure_once(CHAT_ID, Locale::En).await.unwrap();
    assert_eq!(store.ensure_calls(), 2);
    assert!(state.is_ensured(CHAT_ID));
}

/// **Test: The unguarded ensure always hits the store and marks the chat ensured.**
#[tokio::test]
async fn test_unguarded_ensure() {
    let store = Arc::new(InstrumentedStore::new());
    let state = ChatStateStore::new(store.clone());

    state.ensure(CHAT_ID, Locale::It).await.unwrap();
    state.ensure(CHAT_ID, Locale::En).await.unwrap();
    state.ensure_once(CHAT_ID, Locale::En).await.unwrap();

    assert_eq!(store.ensure_calls(), 2);
    assert_eq!(state.get_locale(CHAT_ID).await.unwrap(), Locale::It);
}

/// **Test: set_locale writes through; a fresh ChatStateStore reads the stored value.**
#[tokio::test]
async fn test_set_locale_write_through() {
    let store = Arc::new(InstrumentedStore::new());
    let state = ChatStateStore::new(store.clone());
    state.ensure_once(CHAT_ID, Locale::En).await.unwrap();

    state.set_locale(CHAT_ID, Locale::It).await.unwrap();
    assert_eq!(state.get_locale(CHAT_ID).await.unwrap(), Locale::It);
    assert_eq!(store.get_chat_locale(CHAT_ID).await.unwrap(), Locale::It);

    let fresh = ChatStateStore::new(store.clone());
    assert_eq!(fresh.get_locale(CHAT_ID).await.unwrap(), Locale::It);
}

/// **Test: Unknown chats read as the default locale.**
#[tokio::test]
async fn test_unknown_chat_default_locale() {
    let state = ChatStateStore::new(Arc::new(InstrumentedStore::new()));
    assert_eq!(state.get_locale(999).await.unwrap(), Locale::En);
    assert!(!state.is_ensured(999));
}

/// **Test: A locale read before the chat exists does not shadow the locale it is created with.**
///
/// **Setup:** Empty store.
/// **Action:** `get_locale(CHAT_ID)`, then `ensure_once(CHAT_ID, It)`, then `get_locale` again.
/// **Expected:** First read is the default En; after ensuring, store and cache both say It.
#[tokio::test]
async fn test_read_before_ensure_then_ensure_with_it() {
    let store = Arc::new(InstrumentedStore::new());
    let state = ChatStateStore::new(store.clone());

    assert_eq!(state.get_locale(CHAT_ID).await.unwrap(), Locale::En);
    state.ensure_once(CHAT_ID, Locale::It).await.unwrap();

    assert_eq!(store.get_chat_locale(CHAT_ID).await.unwrap(), Locale::It);
    assert_eq!(state.get_locale(CHAT_ID).await.unwrap(), Locale::It);
}

/// **Test: Same ordering through the unguarded ensure.**
#[tokio::test]
async fn test_read_before_unguarded_ensure() {
    let state = ChatStateStore::new(Arc::new(InstrumentedStore::new()));

    assert_eq!(state.get_locale(CHAT_ID).await.unwrap(), Locale::En);
    state.ensure(CHAT_ID, Locale::It).await.unwrap();

    assert_eq!(state.get_locale(CHAT_ID).await.unwrap(), Locale::It);
}
