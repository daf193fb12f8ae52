//! JSON persistence for completed reviews.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::items::ItemIdentity;

use super::PersistenceError;
use super::files::{read_optional, write_with_parents};

/// Lifecycle of a stored review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    /// The request was issued but no result has been stored yet.
    Pending,
    /// The provider answered (or failed) and the text is final.
    #[default]
    Finished,
}

/// One review result keyed by item identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Identity of the reviewed item.
    pub identity: ItemIdentity,
    /// Locator of the reviewed item at the time of the review.
    pub locator: String,
    /// Review text, or the failure description when the request failed.
    pub text: String,
    /// Review lifecycle status.
    #[serde(default)]
    pub status: ReviewStatus,
}

impl ReviewRecord {
    /// Creates a finished review record.
    #[must_use]
    pub fn finished(
        identity: ItemIdentity,
        locator: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            identity,
            locator: locator.into(),
            text: text.into(),
            status: ReviewStatus::Finished,
        }
    }

    /// Returns true once the review text is final.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == ReviewStatus::Finished
    }
}

/// Loads reviews from `path`.
///
/// A missing file, an empty file, or a JSON `null` all yield an empty list.
///
/// # Errors
///
/// Returns [`PersistenceError::ReadFailed`] when the file exists but cannot
/// be read, or [`PersistenceError::DecodeFailed`] when it is not a JSON array
/// of review records.
pub fn load_reviews(path: &Utf8Path) -> Result<Vec<ReviewRecord>, PersistenceError> {
    let Some(content) = read_optional(path)? else {
        return Ok(Vec::new());
    };
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let records: Option<Vec<ReviewRecord>> =
        serde_json::from_str(&content).map_err(|error| PersistenceError::DecodeFailed {
            path: path.to_string(),
            message: error.to_string(),
        })?;
    Ok(records.unwrap_or_default())
}

/// Rewrites the reviews file with `records` as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns [`PersistenceError::EncodeFailed`] when serialisation fails or
/// [`PersistenceError::WriteFailed`] when the file cannot be written.
pub fn save_reviews(path: &Utf8Path, records: &[ReviewRecord]) -> Result<(), PersistenceError> {
    let json =
        serde_json::to_string_pretty(records).map_err(|error| PersistenceError::EncodeFailed {
            path: path.to_string(),
            message: error.to_string(),
        })?;
    write_with_parents(path, &json)
}
