//! Slash commands understood by the bot.

use teloxide::utils::command::{BotCommands, ParseError};

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "set up the bot in this chat")]
    Start,
    #[command(description = "choose the chat language (ITA or ENG)", parse_with = rest_of_line)]
    Language(String),
    #[command(description = "short for /language", parse_with = rest_of_line)]
    Lang(String),
    #[command(description = "save your birthday: YYYY-MM-DD or DD/MM/YYYY", parse_with = rest_of_line)]
    Birthday(String),
    #[command(description = "short for /birthday", parse_with = rest_of_line)]
    Bday(String),
    #[command(description = "pick a random chat member")]
    Nominate,
}

/// Keeps the whole (possibly empty) argument string.
fn rest_of_line(input: String) -> Result<(String,), ParseError> {
    Ok((input.trim().to_string(),))
}

impl Command {
    /// Parses `text` as a command addressed to this bot (`/cmd` or `/cmd@bot_username`).
    /// Unknown commands and commands for other bots yield None.
    pub fn parse_text(text: &str, bot_username: Option<&str>) -> Option<Command> {
        if !text.trim_start().starts_with('/') {
            return None;
        }
        Command::parse(text.trim(), bot_username.unwrap_or_default()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse_text("/start", Some("crew_bot")), Some(Command::Start));
        assert_eq!(
            Command::parse_text("/language", Some("crew_bot")),
            Some(Command::Language(String::new()))
        );
        assert_eq!(
            Command::parse_text("/lang@crew_bot ita", Some("crew_bot")),
            Some(Command::Lang("ita".to_string()))
        );
        assert_eq!(
            Command::parse_text("/bday 04/05/1990", None),
            Some(Command::Bday("04/05/1990".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_other_text() {
        assert_eq!(Command::parse_text("hello /start", Some("crew_bot")), None);
        assert_eq!(Command::parse_text("/unknown", Some("crew_bot")), None);
        assert_eq!(Command::parse_text("/start@other_bot", Some("crew_bot")), None);
    }
}
