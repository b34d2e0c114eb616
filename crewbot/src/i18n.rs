//! Built-in message catalog for the two supported locales.

use crewbot_core::Locale;

/// Labels of the locale selection keyboard, in display order.
pub const LANGUAGE_KEYBOARD: [&str; 2] = ["ITA", "ENG"];

/// A user-visible message; rendered with [`Text::render`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Text {
    Welcome,
    LanguagePrompt,
    LanguageInvalid,
    LanguageSet { language: &'static str },
    BirthdayHelp,
    BirthdayInvalid,
    BirthdaySaved { date: String },
    NominateNoCandidates,
    NominateResult { name: String },
    CompletionFailed,
    StorageFailed,
}

impl Text {
    pub fn render(&self, locale: Locale) -> String {
        match (self, locale) {
            (Text::Welcome, Locale::En) => {
                "Hi! I'm here. Mention me to chat, or use /language, /birthday and /nominate.".into()
            }
            (Text::Welcome, Locale::It) => {
                "Ciao! Ci sono. Menzionami per parlare, oppure usa /language, /birthday e /nominate."
                    .into()
            }
            (Text::LanguagePrompt, Locale::En) => "Choose the chat language:".into(),
            (Text::LanguagePrompt, Locale::It) => "Scegli la lingua della chat:".into(),
            (Text::LanguageInvalid, Locale::En) => {
                "Unknown language. Pick ITA or ENG.".into()
            }
            (Text::LanguageInvalid, Locale::It) => {
                "Lingua non riconosciuta. Scegli ITA o ENG.".into()
            }
            (Text::LanguageSet { language }, Locale::En) => {
                format!("Chat language set to {}.", language)
            }
            (Text::LanguageSet { language }, Locale::It) => {
                format!("Lingua della chat impostata: {}.", language)
            }
            (Text::BirthdayHelp, Locale::En) => {
                "Send your birthday as /birthday YYYY-MM-DD or /birthday DD/MM/YYYY.".into()
            }
            (Text::BirthdayHelp, Locale::It) => {
                "Invia il tuo compleanno con /birthday AAAA-MM-GG oppure /birthday GG/MM/AAAA."
                    .into()
            }
            (Text::BirthdayInvalid, Locale::En) => {
                "That date is not valid. Use YYYY-MM-DD or DD/MM/YYYY.".into()
            }
            (Text::BirthdayInvalid, Locale::It) => {
                "Data non valida. Usa AAAA-MM-GG oppure GG/MM/AAAA.".into()
            }
            (Text::BirthdaySaved { date }, Locale::En) => format!("Birthday saved: {}.", date),
            (Text::BirthdaySaved { date }, Locale::It) => format!("Compleanno salvato: {}.", date),
            (Text::NominateNoCandidates, Locale::En) => {
                "Nobody to nominate yet. Members appear once they write in the chat.".into()
            }
            (Text::NominateNoCandidates, Locale::It) => {
                "Ancora nessuno da nominare. I membri compaiono quando scrivono nella chat.".into()
            }
            (Text::NominateResult { name }, Locale::En) => format!("The chosen one is {}!", name),
            (Text::NominateResult { name }, Locale::It) => format!("Il prescelto è {}!", name),
            (Text::CompletionFailed, Locale::En) => {
                "Sorry, I can't answer right now. Try again in a moment.".into()
            }
            (Text::CompletionFailed, Locale::It) => {
                "Scusa, ora non riesco a rispondere. Riprova tra poco.".into()
            }
            (Text::StorageFailed, Locale::En) => {
                "Sorry, I couldn't save that. Try again later.".into()
            }
            (Text::StorageFailed, Locale::It) => {
                "Scusa, non sono riuscito a salvarlo. Riprova più tardi.".into()
            }
        }
    }
}
