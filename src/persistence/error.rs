//! Error types for local file persistence.

use thiserror::Error;

/// Errors returned while reading or writing persisted JSON and scratch files.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PersistenceError {
    /// The path has no file name component.
    #[error("invalid file path '{path}': no file name")]
    InvalidPath {
        /// The offending path.
        path: String,
    },

    /// Opening or reading the file failed.
    #[error("failed to read '{path}': {message}")]
    ReadFailed {
        /// The file being read.
        path: String,
        /// Error detail from the filesystem.
        message: String,
    },

    /// Creating parent directories or writing the file failed.
    #[error("failed to write '{path}': {message}")]
    WriteFailed {
        /// The file being written.
        path: String,
        /// Error detail from the filesystem.
        message: String,
    },

    /// The file contents were not valid JSON for the expected shape.
    #[error("failed to decode '{path}': {message}")]
    DecodeFailed {
        /// The file being decoded.
        path: String,
        /// Error detail from `serde_json`.
        message: String,
    },

    /// Serialising the in-memory value failed.
    #[error("failed to encode data for '{path}': {message}")]
    EncodeFailed {
        /// The destination file.
        path: String,
        /// Error detail from `serde_json`.
        message: String,
    },
}
