use std::fmt;

use thiserror::Error;
use tracing::error;

/// Backend call failures. These never reach the user; they're handed to an
/// [`ErrorReporter`] at the dashboard boundary.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("backend responded with {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("search response claims {count} results but has {len}")]
    CountMismatch { count: usize, len: usize },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operation {
    AddNote,
    QueryNotes,
    SaveResult,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::AddNote => "Failed to add note",
            Self::QueryNotes => "Failed to query notes",
            Self::SaveResult => "Failed to save result",
        };
        write!(f, "{message}")
    }
}

pub trait ErrorReporter: Send + Sync {
    fn report(&self, operation: Operation, err: &ClientError);
}

/// Writes failures to the diagnostic log.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, operation: Operation, err: &ClientError) {
        error!("{operation}: {err}");
    }
}

#[cfg(test)]
mod tests {
    use super::{ClientError, Operation};

    #[test]
    fn operation_messages() {
        assert_eq!(Operation::AddNote.to_string(), "Failed to add note");
        assert_eq!(Operation::QueryNotes.to_string(), "Failed to query notes");
        assert_eq!(Operation::SaveResult.to_string(), "Failed to save result");
    }

    #[test]
    fn status_error_message() {
        let err = ClientError::Status {
            status: 503,
            body: "down for maintenance".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "backend responded with 503: down for maintenance"
        );
    }
}
