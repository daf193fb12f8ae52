//! Session state persistence: prompt history and token usage.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use super::PersistenceError;
use super::files::{read_optional, write_with_parents};

/// Accumulated token usage across every review request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    /// Tokens sent to the provider.
    pub prompt_tokens: u64,
    /// Tokens produced by the provider.
    pub completion_tokens: u64,
}

impl Usage {
    /// Returns the sum of two usage values, saturating on overflow.
    #[must_use]
    pub const fn combined(self, other: Self) -> Self {
        Self {
            prompt_tokens: self.prompt_tokens.saturating_add(other.prompt_tokens),
            completion_tokens: self.completion_tokens.saturating_add(other.completion_tokens),
        }
    }
}

/// State carried between sessions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionState {
    /// Instant prompts in the order they were sent.
    pub prompt_history: Vec<String>,
    /// Token usage totals.
    pub usage: Usage,
}

impl SessionState {
    /// Records an instant prompt at the end of the history.
    pub fn push_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt_history.push(prompt.into());
    }

    /// Adds one request's usage to the running totals.
    pub const fn record_usage(&mut self, usage: Usage) {
        self.usage = self.usage.combined(usage);
    }
}

/// Loads the session state, returning the default when the file is missing.
///
/// # Errors
///
/// Returns [`PersistenceError::ReadFailed`] or
/// [`PersistenceError::DecodeFailed`] when the file exists but cannot be
/// read or parsed.
pub fn load_session_state(path: &Utf8Path) -> Result<SessionState, PersistenceError> {
    let Some(content) = read_optional(path)? else {
        return Ok(SessionState::default());
    };
    if content.trim().is_empty() {
        return Ok(SessionState::default());
    }

    serde_json::from_str(&content).map_err(|error| PersistenceError::DecodeFailed {
        path: path.to_string(),
        message: error.to_string(),
    })
}

/// Writes the session state as pretty-printed JSON, creating directories.
///
/// # Errors
///
/// Returns [`PersistenceError::EncodeFailed`] or
/// [`PersistenceError::WriteFailed`] when the state cannot be written.
pub fn save_session_state(path: &Utf8Path, state: &SessionState) -> Result<(), PersistenceError> {
    let json =
        serde_json::to_string_pretty(state).map_err(|error| PersistenceError::EncodeFailed {
            path: path.to_string(),
            message: error.to_string(),
        })?;
    write_with_parents(path, &json)
}
