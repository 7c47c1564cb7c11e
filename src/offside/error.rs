//! Error types

use thiserror::Error;

/// Failures raised by the indentation tracker itself.
///
/// Upstream scanner failures never appear here: the tracker returns them unchanged in the
/// source's own error type, which must be able to absorb these via `From`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndentationError {
    /// A dedent landed between two open levels (strict policy only)
    #[error("line {line}, column {column}: unindent does not match any outer indentation level (nearest is {nearest})")]
    InconsistentDedent {
        line: usize,
        column: usize,
        nearest: usize,
    },

    /// `next_token` was called after end of input was returned (fail-fast policy only)
    #[error("token requested after end of input was returned")]
    UseAfterEnd,
}

/// Main error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    /// The scanner met a character it has no token for
    #[error("line {line}, column {column}: unexpected character {text:?}")]
    UnexpectedCharacter {
        line: usize,
        column: usize,
        text: String,
    },

    #[error(transparent)]
    Indentation(#[from] IndentationError),

    /// The tracked token stream did not match the block structure grammar
    #[error("line {line}, column {column}: {message}")]
    Structure {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("invalid format: {0}")]
    InvalidFormat(String),

    #[error("invalid stage: {0}")]
    InvalidStage(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
