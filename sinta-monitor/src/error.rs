//! Error types for the monitor

use sinta_client::ClientError;
use thiserror::Error;

/// Errors surfaced by the scheduler and the job controller
///
/// Transient polling failures never show up here: the poll loop logs them
/// and tries again on the next tick.
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Caller input was rejected before any request was made
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The backend refused to start the job
    #[error("Backend rejected the job: {message}")]
    Submission {
        /// Reason reported by the backend
        message: String,
    },

    /// A job is already being monitored or a poll loop is already active
    #[error("A scraping job is already running")]
    AlreadyRunning,

    /// The backend could not be reached or answered with garbage
    #[error(transparent)]
    Client(#[from] ClientError),
}

impl MonitorError {
    pub fn submission(message: impl Into<String>) -> Self {
        Self::Submission {
            message: message.into(),
        }
    }

    /// Whether the error stems from caller misuse rather than the backend
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::AlreadyRunning)
    }
}
