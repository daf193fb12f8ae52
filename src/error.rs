//! Error types shared across the lazyreview crate.

use thiserror::Error;

use crate::persistence::PersistenceError;

/// Errors surfaced while loading configuration, talking to the review
/// provider, running external commands, or driving the TUI.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LazyReviewError {
    /// Configuration could not be loaded or is incomplete.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// Networking failed while calling the review provider.
    #[error("network error talking to the review provider: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The review provider returned an error or an unusable response.
    #[error("review provider error: {message}")]
    Api {
        /// Response detail describing the failure.
        message: String,
    },

    /// Reading or writing a persisted file failed.
    #[error("persistence error: {message}")]
    Persistence {
        /// Details about the persistence failure.
        message: String,
    },

    /// An external command could not be started or exited unsuccessfully.
    #[error("command failed: {message}")]
    Process {
        /// Details about the command failure.
        message: String,
    },

    /// The terminal program failed to start or exited abnormally.
    #[error("TUI error: {message}")]
    Tui {
        /// Details reported by the terminal runtime.
        message: String,
    },
}

impl From<PersistenceError> for LazyReviewError {
    fn from(error: PersistenceError) -> Self {
        Self::Persistence {
            message: error.to_string(),
        }
    }
}

impl From<std::io::Error> for LazyReviewError {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: error.to_string(),
        }
    }
}
