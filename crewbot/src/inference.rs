//! Maps completion text to an [`AiReply`]: optional leading intent tag plus the remaining text.
//!
//! Tag format (see [`crate::prompt`]): `[[command:<name>]]` at the very start of the reply,
//! case-insensitive, whitespace allowed inside the brackets.

use std::sync::LazyLock;

use regex::Regex;

/// Intent inferred from a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InferredCommand {
    #[default]
    None,
    /// Pick a random chat member; the reply may contain [`crate::placeholder::RANDOM_USER_TOKEN`].
    Nominate,
}

impl InferredCommand {
    fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "nominate" => Some(Self::Nominate),
            _ => None,
        }
    }
}

/// Completion text after intent extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiReply {
    pub response_text: String,
    pub inferred_command: InferredCommand,
}

impl AiReply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            response_text: text.into(),
            inferred_command: InferredCommand::None,
        }
    }
}

static LEADING_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*\[\[\s*command\s*:\s*([a-z_]+)\s*\]\]\s*").expect("hardcoded regex")
});

/// Total and pure. A recognised leading tag is removed together with the whitespace after it;
/// anything else (unknown name, malformed or non-leading tag) returns the text unchanged.
pub fn infer(raw: &str) -> AiReply {
    let Some(caps) = LEADING_TAG.captures(raw) else {
        return AiReply::plain(raw);
    };
    let whole = caps.get(0).map(|m| m.end()).unwrap_or(0);
    match caps.get(1).and_then(|m| InferredCommand::from_name(m.as_str())) {
        Some(command) => AiReply {
            response_text: raw[whole..].to_string(),
            inferred_command: command,
        },
        None => AiReply::plain(raw),
    }
}
