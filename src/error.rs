//! Domain error types.
//!
//! Startup and IO failures use `anyhow`; these enums cover the per-submission
//! paths where the caller needs to tell error kinds apart.

use reqwest::StatusCode;

/// Failures that halt a submission before commentary is generated.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("unknown {field} label: {label:?}")]
    UnknownCategory { field: &'static str, label: String },

    #[error("overs left {0:?} is not in O.B notation")]
    MalformedOvers(String),

    #[error("classifier failure: {0}")]
    Classifier(String),

    #[error("invalid match state: {0}")]
    InvalidMatch(String),
}

/// Failures talking to the chat-completion endpoint. Never shown raw;
/// `commentary::generate` turns each one into a warning string.
#[derive(Debug, thiserror::Error)]
pub enum CommentaryError {
    #[error("completion API returned {0}")]
    Status(StatusCode),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed completion response: {0}")]
    Malformed(String),
}
