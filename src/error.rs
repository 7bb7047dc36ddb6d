use std::io;

pub type Result<T> = std::result::Result<T, Error>;

/// Error type for QCM operations.
///
/// Parsing and decoding never fail on bad data; these variants cover file
/// access, configuration and the caller-facing view of a parse outcome.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The model declined the request; the message is shown verbatim.
    #[error("{0}")]
    Refused(String),

    #[error("Could not parse any question from the response")]
    Unparseable,

    #[error("Invalid answer for question {question}: {answer:?}")]
    InvalidAnswer { question: usize, answer: String },
}
