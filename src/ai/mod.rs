//! AI review services.
//!
//! The TUI depends only on [`ReviewService`]; the chat-completions client is
//! one implementation and the test-support stub is another.

mod model;
mod openai;
mod service;
#[cfg(any(test, feature = "test-support"))]
mod test_support;

pub use model::{
    FAILED_REVIEW_PREFIX, ReviewCompletion, ReviewOutcome, ReviewRequest, resolve_system_prompt,
};
pub use openai::{OpenAiReviewConfig, OpenAiReviewService};
pub use service::{ReviewService, review_with_fallback};
#[cfg(any(test, feature = "test-support"))]
pub use test_support::StubReviewService;
