//! Request and result models for AI review calls.

use crate::config::DEFAULT_PROMPT;
use crate::persistence::Usage;

/// Prefix of the review text stored when a review request fails.
pub const FAILED_REVIEW_PREFIX: &str = "Failed to get review";

/// Input payload for one review request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    system_prompt: String,
    content: String,
}

impl ReviewRequest {
    /// Constructs a request from an explicit system prompt and content.
    #[must_use]
    pub fn new(system_prompt: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            content: content.into(),
        }
    }

    /// Builds the request for an item preview.
    ///
    /// A non-empty `context` is placed before the preview, separated by a
    /// blank line.
    #[must_use]
    pub fn for_item(system_prompt: impl Into<String>, context: &str, preview: &str) -> Self {
        let content = if context.is_empty() {
            preview.to_owned()
        } else {
            format!("{context}\n\n{preview}")
        };
        Self::new(system_prompt, content)
    }

    /// System message sent ahead of the content.
    #[must_use]
    pub const fn system_prompt(&self) -> &str {
        self.system_prompt.as_str()
    }

    /// User message holding the context and item preview.
    #[must_use]
    pub const fn content(&self) -> &str {
        self.content.as_str()
    }
}

/// Picks the system prompt for a request.
///
/// The first non-blank value wins: the instant prompt, the item's source
/// prompt, the configured prompt, then [`DEFAULT_PROMPT`].
#[must_use]
pub fn resolve_system_prompt(
    instant_prompt: &str,
    source_prompt: Option<&str>,
    config_prompt: Option<&str>,
) -> String {
    [Some(instant_prompt), source_prompt, config_prompt]
        .into_iter()
        .flatten()
        .find(|prompt| !prompt.trim().is_empty())
        .unwrap_or(DEFAULT_PROMPT)
        .to_owned()
}

/// Successful provider response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewCompletion {
    /// Assistant text.
    pub text: String,
    /// Tokens consumed by the request.
    pub usage: Usage,
}

/// Result of a review attempt after failures have been folded into text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewOutcome {
    /// Review text, or the failure description when `failed` is set.
    pub text: String,
    /// Tokens consumed; zero when the request failed.
    pub usage: Usage,
    /// Whether the provider call failed.
    pub failed: bool,
}

impl ReviewOutcome {
    /// Wraps a successful completion.
    #[must_use]
    pub fn completed(completion: ReviewCompletion) -> Self {
        Self {
            text: completion.text,
            usage: completion.usage,
            failed: false,
        }
    }

    /// Builds the outcome stored when a request fails.
    #[must_use]
    pub fn failure(reason: impl std::fmt::Display) -> Self {
        Self {
            text: format!("{FAILED_REVIEW_PREFIX}: {reason}"),
            usage: Usage::default(),
            failed: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::instant_wins("be brief", Some("source"), Some("config"), "be brief")]
    #[case::source_over_config("", Some("source"), Some("config"), "source")]
    #[case::config_when_no_source("  ", None, Some("config"), "config")]
    #[case::default_when_blank("", Some(""), None, DEFAULT_PROMPT)]
    fn system_prompt_precedence(
        #[case] instant: &str,
        #[case] source: Option<&str>,
        #[case] config: Option<&str>,
        #[case] expected: &str,
    ) {
        assert_eq!(resolve_system_prompt(instant, source, config), expected);
    }

    #[rstest]
    fn item_request_places_context_first() {
        let request = ReviewRequest::for_item("p", "a.rs\nfn a() {}", "fn b() {}");

        assert_eq!(request.content(), "a.rs\nfn a() {}\n\nfn b() {}");
    }

    #[rstest]
    fn item_request_without_context_is_the_preview() {
        let request = ReviewRequest::for_item("p", "", "fn b() {}");

        assert_eq!(request.content(), "fn b() {}");
        assert_eq!(request.system_prompt(), "p");
    }

    #[rstest]
    fn failure_outcome_carries_reason() {
        let outcome = ReviewOutcome::failure("timeout");

        assert_eq!(outcome.text, "Failed to get review: timeout");
        assert!(outcome.failed);
        assert_eq!(outcome.usage, Usage::default());
    }
}
