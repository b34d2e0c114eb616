use thiserror::Error;

/// Failures observable while handling one inbound message or starting the process.
///
/// `Config` is fatal at startup. `Upstream` and `EmptyCompletion` are recovered per message with
/// an apology reply. `Persistence` is logged and degrades member tracking / nomination.
/// `Validation` becomes a corrective reply to the user.
#[derive(Error, Debug)]
pub enum CrewbotError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Completion service returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Completion service returned no usable text")]
    EmptyCompletion,

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bot error: {0}")]
    Bot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CrewbotError>;
