//! Review service contract and the failure-folding wrapper.

use tracing::warn;

use crate::error::LazyReviewError;

use super::model::{ReviewCompletion, ReviewOutcome, ReviewRequest};

/// Provider contract used by the TUI to obtain reviews.
pub trait ReviewService: Send + Sync + std::fmt::Debug {
    /// Requests a review for the given content.
    ///
    /// # Errors
    ///
    /// Returns [`LazyReviewError`] when the provider call fails.
    fn fetch_review(&self, request: &ReviewRequest) -> Result<ReviewCompletion, LazyReviewError>;
}

/// Runs a review request, turning any failure into review text.
///
/// Every call yields exactly one outcome; failed requests are not retried.
#[must_use]
pub fn review_with_fallback(
    service: &dyn ReviewService,
    request: &ReviewRequest,
) -> ReviewOutcome {
    match service.fetch_review(request) {
        Ok(completion) => ReviewOutcome::completed(completion),
        Err(error) => {
            warn!(%error, "review request failed");
            ReviewOutcome::failure(error)
        }
    }
}
