use thiserror::Error;

use crate::command::SYNTAX;

/// Failure to coerce a stream into linear 16-bit PCM.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot coerce stream to linear 16-bit PCM: {reason}")]
pub struct FormatError {
    pub reason: String,
}

impl FormatError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A `start` that failed to install a detector. The stream itself is left
/// unaffected.
#[derive(Debug, Error)]
pub enum StartError {
    #[error("audio source unavailable for stream {0}")]
    SourceUnavailable(String),

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Malformed control command. Surfaced to the control caller; never fatal
/// to the process.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("wrong argument count ({got}); usage: {SYNTAX}")]
    BadArgumentCount { got: usize },

    #[error("unknown command {0:?}; usage: {SYNTAX}")]
    UnknownCommand(String),

    #[error("invalid value {value:?} for {arg}; usage: {SYNTAX}")]
    InvalidNumber {
        arg: &'static str,
        value: String,
    },

    #[error("unknown stream {0:?}; usage: {SYNTAX}")]
    UnknownStream(String),
}

/// Everything the control surface can report besides a reply.
#[derive(Debug, Error)]
pub enum ControlError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Start(#[from] StartError),
}
