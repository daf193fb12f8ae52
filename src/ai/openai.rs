//! Chat-completions client for `OpenAI` and Azure `OpenAI`.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use serde::{Deserialize, Serialize};

use crate::config::{LazyReviewConfig, Provider};
use crate::error::LazyReviewError;
use crate::persistence::Usage;

use super::model::{ReviewCompletion, ReviewRequest};
use super::service::ReviewService;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Configuration for [`OpenAiReviewService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenAiReviewConfig {
    /// Provider flavour, selecting URL layout and authentication header.
    pub provider: Provider,
    /// API base URL (`OpenAI`) or resource endpoint (Azure).
    pub base_url: String,
    /// Model identifier, or deployment name for Azure.
    pub model: String,
    /// API key.
    pub api_key: Option<String>,
    /// Azure `api-version` query value.
    pub api_version: Option<String>,
    /// Completion token cap.
    pub max_tokens: u32,
    /// HTTP timeout; `None` waits for the provider indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for OpenAiReviewConfig {
    fn default() -> Self {
        let defaults = LazyReviewConfig::default();
        Self {
            provider: Provider::OpenAi,
            base_url: DEFAULT_BASE_URL.to_owned(),
            model: defaults.model,
            api_key: None,
            api_version: None,
            max_tokens: defaults.max_tokens,
            timeout: None,
        }
    }
}

impl OpenAiReviewConfig {
    /// Builds client configuration from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LazyReviewError::Configuration`] when the model is blank or
    /// the provider settings are invalid.
    pub fn from_config(config: &LazyReviewConfig) -> Result<Self, LazyReviewError> {
        let provider = config.provider()?;
        let model = config.require_model()?.to_owned();
        let base_url = config
            .endpoint
            .clone()
            .filter(|endpoint| !endpoint.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());

        Ok(Self {
            provider,
            base_url,
            model,
            api_key: config.resolve_api_key(),
            api_version: config.api_version.clone(),
            max_tokens: config.effective_max_tokens(),
            timeout: None,
        })
    }

    fn completions_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        match self.provider {
            Provider::OpenAi => format!("{base}/chat/completions"),
            Provider::Azure => format!(
                "{base}/openai/deployments/{}/chat/completions?api-version={}",
                self.model,
                self.api_version.as_deref().unwrap_or_default()
            ),
        }
    }
}

/// Chat-completions review service.
#[derive(Debug, Clone, Default)]
pub struct OpenAiReviewService {
    config: OpenAiReviewConfig,
}

impl OpenAiReviewService {
    /// Creates a service from explicit configuration.
    #[must_use]
    pub const fn new(config: OpenAiReviewConfig) -> Self {
        Self { config }
    }

    fn extract_api_key(&self) -> Result<&str, LazyReviewError> {
        self.config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| LazyReviewError::Configuration {
                message: "API key is required (use --key, LAZYREVIEW_KEY, or OPENAI_API_KEY)"
                    .to_owned(),
            })
    }

    fn create_http_client(&self) -> Result<Client, LazyReviewError> {
        Client::builder()
            .timeout(self.config.timeout)
            .build()
            .map_err(|error| LazyReviewError::Configuration {
                message: format!("failed to configure review HTTP client: {error}"),
            })
    }

    fn authorise(&self, builder: RequestBuilder, api_key: &str) -> RequestBuilder {
        match self.config.provider {
            Provider::OpenAi => builder.bearer_auth(api_key),
            Provider::Azure => builder.header("api-key", api_key),
        }
    }
}

impl ReviewService for OpenAiReviewService {
    fn fetch_review(&self, request: &ReviewRequest) -> Result<ReviewCompletion, LazyReviewError> {
        let api_key = self.extract_api_key()?;
        let payload = ChatCompletionsRequest {
            model: self.config.model.as_str(),
            messages: vec![
                ChatCompletionsMessage {
                    role: "system",
                    content: request.system_prompt(),
                },
                ChatCompletionsMessage {
                    role: "user",
                    content: request.content(),
                },
            ],
            max_tokens: self.config.max_tokens,
        };

        let client = self.create_http_client()?;
        let builder = client.post(self.config.completions_url()).json(&payload);
        let response = self
            .authorise(builder, api_key)
            .send()
            .map_err(|error| LazyReviewError::Network {
                message: format!("review request transport failed: {error}"),
            })?;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let body = response.text().map_or_else(
                |_| "(failed to read error response body)".to_owned(),
                |content| truncate_for_message(content.as_str(), 160),
            );
            return Err(LazyReviewError::Api {
                message: format!("request failed with status {}: {body}", status.as_u16()),
            });
        }

        let response_payload: ChatCompletionsResponse =
            response.json().map_err(|error| LazyReviewError::Api {
                message: format!("response JSON decoding failed: {error}"),
            })?;

        let text = response_payload
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_ref())
            .and_then(parse_content_value)
            .filter(|content| !content.trim().is_empty())
            .map(ToOwned::to_owned)
            .ok_or_else(|| LazyReviewError::Api {
                message: "response did not contain assistant text".to_owned(),
            })?;

        Ok(ReviewCompletion {
            text,
            usage: response_payload.usage.map(Usage::from).unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: Vec<ChatCompletionsMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatCompletionsMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<ChatContent>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChatContent {
    Text(String),
    Parts(Vec<ChatContentPart>),
}

#[derive(Debug, Deserialize)]
struct ChatContentPart {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ChatUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
}

impl From<ChatUsage> for Usage {
    fn from(usage: ChatUsage) -> Self {
        Self {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
        }
    }
}

fn parse_content_value(content: &ChatContent) -> Option<&str> {
    match content {
        ChatContent::Text(text) => Some(text.as_str()),
        ChatContent::Parts(parts) => parts.iter().find_map(|part| part.text.as_deref()),
    }
}

fn truncate_for_message(message: &str, max_chars: usize) -> String {
    let mut output: String = message.chars().take(max_chars).collect();
    if message.chars().nth(max_chars).is_some() {
        output.push_str("...");
    }
    output
}

#[cfg(test)]
#[path = "openai_tests.rs"]
mod tests;
