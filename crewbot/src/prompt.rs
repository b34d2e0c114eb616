//! System prompt sent with every completion request.
//!
//! The prompt tells the model about the intent tag read by [`crate::inference`] and the
//! placeholder filled by [`crate::placeholder`]. Keep the three in sync.

use crewbot_core::Locale;

pub const DEFAULT_SYSTEM_PROMPT: &str = "\
You are a witty, friendly member of a group chat. Keep replies short (one to three sentences), \
informal, and never offensive.

When the user asks you to pick, choose, nominate or blame someone in the group, start your reply \
with the tag [[command:nominate]] and write [random_user] wherever the chosen person's name goes, \
for example: \"[[command:nominate]] Tonight [random_user] pays for the pizza!\". Use the tag only \
at the very beginning and only for that purpose. Never invent member names.";

/// Appends the reply-language instruction for the chat locale to `base`.
pub fn build_system_prompt(base: &str, locale: Locale) -> String {
    let language = match locale {
        Locale::En => "English",
        Locale::It => "Italian",
    };
    format!("{}\n\nAlways reply in {}.", base.trim_end(), language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompt_documents_tag_and_placeholder() {
        assert!(DEFAULT_SYSTEM_PROMPT.contains("[[command:nominate]]"));
        assert!(DEFAULT_SYSTEM_PROMPT.contains(crate::placeholder::RANDOM_USER_TOKEN));
    }

    #[test]
    fn test_build_system_prompt_language() {
        assert!(build_system_prompt("base", Locale::It).ends_with("Always reply in Italian."));
        assert!(build_system_prompt("base\n", Locale::En).starts_with("base\n\nAlways"));
    }
}
