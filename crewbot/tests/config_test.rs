//! Tests for [`crewbot::BotConfig`] loading and validation.

use std::collections::HashMap;
use std::env;

use crewbot::config::{DEFAULT_DATABASE_URL, DEFAULT_LOG_FILE};
use crewbot::prompt::DEFAULT_SYSTEM_PROMPT;
use crewbot::BotConfig;
use serial_test::serial;

fn load(pairs: &[(&str, &str)], token: Option<&str>) -> anyhow::Result<BotConfig> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    BotConfig::from_lookup(token.map(String::from), |key| vars.get(key).cloned())
}

/// **Test: Minimal config gets every default.**
///
/// **Setup:** Only BOT_TOKEN and OPENAI_API_KEY.
/// **Expected:** Default model, database, log file, prompt; empty allow-list; polling mode.
#[test]
fn test_defaults() {
    let config = load(&[("BOT_TOKEN", "t"), ("OPENAI_API_KEY", "sk-1")], None).unwrap();

    assert_eq!(config.completion.model, "gpt-4o-mini");
    assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    assert_eq!(config.log_file, DEFAULT_LOG_FILE);
    assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);
    assert!(config.allowed_chat_ids.is_empty());
    assert!(config.telegram.webhook.is_none());
    assert!(config.validate().is_ok());
}

/// **Test: Missing credentials fail; the CLI token overrides BOT_TOKEN.**
#[test]
fn test_credentials() {
    assert!(load(&[("OPENAI_API_KEY", "sk-1")], None).is_err());
    assert!(load(&[("BOT_TOKEN", "t"), ("OPENAI_API_KEY", "  ")], None).is_err());

    let config = load(&[("BOT_TOKEN", "env"), ("OPENAI_API_KEY", "sk-1")], Some("cli")).unwrap();
    assert_eq!(config.telegram.bot_token, "cli");
    let config = load(&[("OPENAI_API_KEY", "sk-1")], Some("cli")).unwrap();
    assert_eq!(config.telegram.bot_token, "cli");
}

/// **Test: An unparsable allow-list entry is a startup error.**
#[test]
fn test_invalid_allowed_chat_ids() {
    let result = load(
        &[("BOT_TOKEN", "t"), ("OPENAI_API_KEY", "sk-1"), ("ALLOWED_CHAT_IDS", "-1001,nope")],
        None,
    );
    assert!(result.is_err());
}

/// **Test: Bad numeric overrides fall back; bad URLs fail validation.**
#[test]
fn test_numeric_fallback_and_url_validation() {
    let config = load(
        &[
            ("BOT_TOKEN", "t"),
            ("OPENAI_API_KEY", "sk-1"),
            ("OPENAI_TEMPERATURE", "hot"),
            ("OPENAI_BASE_URL", "not a url"),
        ],
        None,
    )
    .unwrap();
    assert_eq!(config.completion.temperature, 1.1);
    assert!(config.validate().is_err());
}

/// **Test: BotConfig::load reads the process environment.**
#[test]
#[serial]
fn test_load_from_env() {
    env::set_var("BOT_TOKEN", "env_token");
    env::set_var("OPENAI_API_KEY", "sk-env");
    env::set_var("ALLOWED_CHAT_IDS", "-1001, 42");
    env::remove_var("WEBHOOK_URL");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.telegram.bot_token, "env_token");
    assert_eq!(config.allowed_chat_ids.len(), 2);
    assert!(config.allowed_chat_ids.contains(&42));

    env::remove_var("ALLOWED_CHAT_IDS");
}
