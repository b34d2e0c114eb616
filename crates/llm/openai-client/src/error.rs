use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompletionError {
    /// Missing credential or invalid configuration value; fatal at startup.
    #[error("Config error: {0}")]
    Config(String),

    /// Non-success HTTP status; `body` is the raw response text.
    #[error("Completion request failed ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// Success status but `choices[0].message.content` missing or blank.
    #[error("Completion response was empty")]
    EmptyCompletion,

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid completion response: {0}")]
    Decode(#[from] serde_json::Error),
}
