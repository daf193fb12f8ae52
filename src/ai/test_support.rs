//! Deterministic review services for unit and behavioural tests.

use std::sync::Mutex;

use crate::error::LazyReviewError;
use crate::persistence::Usage;

use super::{ReviewCompletion, ReviewRequest, ReviewService};

/// Review-service stub returning a fixed response and recording requests.
#[derive(Debug)]
pub struct StubReviewService {
    response: Result<ReviewCompletion, LazyReviewError>,
    requests: Mutex<Vec<ReviewRequest>>,
}

impl StubReviewService {
    /// Creates a stub that always returns `text` with zero usage.
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self::success_with_usage(text, Usage::default())
    }

    /// Creates a stub that always returns `text` with the given usage.
    #[must_use]
    pub fn success_with_usage(text: impl Into<String>, usage: Usage) -> Self {
        Self {
            response: Ok(ReviewCompletion {
                text: text.into(),
                usage,
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Creates a stub that always returns the provided error.
    #[must_use]
    pub const fn failure(error: LazyReviewError) -> Self {
        Self {
            response: Err(error),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<ReviewRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl ReviewService for StubReviewService {
    fn fetch_review(&self, request: &ReviewRequest) -> Result<ReviewCompletion, LazyReviewError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }
        self.response.clone()
    }
}
