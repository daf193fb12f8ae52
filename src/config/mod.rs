//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.lazyreview.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `LAZYREVIEW_MODEL`, `LAZYREVIEW_KEY`, or the
//!    `OPENAI_API_KEY` fallback for the key
//! 4. **Command-line arguments** – `--model`/`-m`, `--target`/`-t`, ...
//!
//! # Configuration File
//!
//! ```toml
//! key = "sk-example"
//! model = "gpt-4o-mini"
//! target = "src"
//! output = "reviews.json"
//! ignores = ["target/", "\\.lock$"]
//! opener = "code --wait"
//! sources_file = "sources.toml"
//! ```
//!
//! Sources live in a separate TOML file (see [`SourceConfig`]).

use std::env;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::LazyReviewError;

mod paths;
mod sources;

pub use paths::{XdgBase, resolve_xdg_path};
pub use sources::{SourceConfig, load_sources, parse_sources};

/// Default system prompt used when neither the instant prompt, the item's
/// source, nor the configuration supplies one.
pub const DEFAULT_PROMPT: &str = "you are a code reviewer. return the response in japanese.";

/// Completion token cap used when `max_tokens` is zero.
pub const DEFAULT_MAX_TOKENS: u32 = 1000;

const DEFAULT_MODEL: &str = "gpt-3.5-turbo-0125";
const DEFAULT_TARGET: &str = ".";
const DEFAULT_OUTPUT: &str = "reviews.json";
const DEFAULT_PROVIDER: &str = "openai";
const APP_DIR: &str = "lazyreview";

/// Chat-completions flavour used for review requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// `OpenAI` or any compatible endpoint with bearer authentication.
    OpenAi,
    /// Azure `OpenAI` deployments with `api-key` authentication.
    Azure,
}

/// Price per million tokens, in US dollars.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CostRates {
    /// Cost of one million prompt tokens.
    pub input: f64,
    /// Cost of one million completion tokens.
    pub output: f64,
}

impl CostRates {
    /// Returns true when no cost has been configured.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.input.abs() <= f64::EPSILON && self.output.abs() <= f64::EPSILON
    }

    /// Estimated spend in US dollars for `prompt_tokens` and
    /// `completion_tokens`.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "cost is a display-only estimate"
    )]
    pub fn estimate(&self, prompt_tokens: u64, completion_tokens: u64) -> f64 {
        let per_token = |count: u64, rate: f64| count as f64 * rate / 1_000_000.0;
        per_token(prompt_tokens, self.input) + per_token(completion_tokens, self.output)
    }
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `LAZYREVIEW_KEY`, `OPENAI_API_KEY`, or `--key`: API key
/// - `LAZYREVIEW_MODEL` or `--model`: chat model or Azure deployment
/// - `LAZYREVIEW_TARGET` or `--target`: directory walked for items
/// - `LAZYREVIEW_OUTPUT` or `--output`: reviews file
///
/// # Example
///
/// ```no_run
/// use lazyreview::LazyReviewConfig;
/// use ortho_config::OrthoConfig;
///
/// let config = LazyReviewConfig::load().expect("failed to load configuration");
/// let output = config.require_output().expect("output path required");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "LAZYREVIEW",
    discovery(
        dotfile_name = ".lazyreview.toml",
        config_file_name = "lazyreview.toml",
        app_name = "lazyreview"
    )
)]
pub struct LazyReviewConfig {
    /// API key for the review provider.
    ///
    /// Falls back to `OPENAI_API_KEY` when unset.
    #[ortho_config(cli_short = 'k')]
    pub key: Option<String>,

    /// API base URL (`OpenAI`) or resource endpoint (Azure).
    #[ortho_config(cli_short = 'e')]
    pub endpoint: Option<String>,

    /// Azure API version, e.g. `2024-02-01`.
    #[ortho_config(cli_short = 'a')]
    pub api_version: Option<String>,

    /// Provider flavour: `openai` or `azure`.
    #[ortho_config(cli_short = 'P')]
    pub provider: String,

    /// Chat model identifier, or the deployment name for Azure.
    #[ortho_config(cli_short = 'm')]
    pub model: String,

    /// Dollars per million prompt tokens, used for the cost display.
    #[ortho_config(cli_short = 'i')]
    pub input_cost: f64,

    /// Dollars per million completion tokens, used for the cost display.
    #[ortho_config(cli_short = 'O')]
    pub output_cost: f64,

    /// Completion token cap; zero selects the built-in default.
    #[ortho_config(cli_short = 'M')]
    pub max_tokens: u32,

    /// System prompt override for review requests.
    #[ortho_config(cli_short = 'p')]
    pub prompt: Option<String>,

    /// Directory walked by the default collector.
    #[ortho_config(cli_short = 't')]
    pub target: String,

    /// File that receives the reviews as a JSON array.
    #[ortho_config(cli_short = 'o')]
    pub output: String,

    /// Session state file; defaults under `$XDG_STATE_HOME/lazyreview`.
    #[ortho_config(cli_short = 'S')]
    pub state: Option<String>,

    /// Regular expressions; matching paths are skipped by the directory walk.
    #[ortho_config(cli_short = 'I')]
    pub ignores: Vec<String>,

    /// Command whose stdout lines become item locators.
    #[ortho_config(cli_short = 'c')]
    pub collector: Option<String>,

    /// Command run with the locator appended to preview an item.
    #[ortho_config(cli_short = 'v')]
    pub previewer: Option<String>,

    /// Command used to open reviews and edit prompts.
    #[ortho_config(cli_short = 'E')]
    pub opener: Option<String>,

    /// Scratch file for opening reviews.
    #[ortho_config(cli_short = 'R')]
    pub tmp_review_path: Option<String>,

    /// Scratch file for editing prompts and context entries.
    #[ortho_config(cli_short = 'T')]
    pub tmp_prompt_path: Option<String>,

    /// TOML file holding `[[sources]]` tables.
    #[ortho_config(cli_short = 's')]
    pub sources_file: Option<String>,

    /// Enables file logging to the given path.
    #[ortho_config(cli_short = 'l')]
    pub log_file: Option<String>,
}

impl Default for LazyReviewConfig {
    fn default() -> Self {
        Self {
            key: None,
            endpoint: None,
            api_version: None,
            provider: DEFAULT_PROVIDER.to_owned(),
            model: DEFAULT_MODEL.to_owned(),
            input_cost: 0.0,
            output_cost: 0.0,
            max_tokens: DEFAULT_MAX_TOKENS,
            prompt: None,
            target: DEFAULT_TARGET.to_owned(),
            output: DEFAULT_OUTPUT.to_owned(),
            state: None,
            ignores: Vec::new(),
            collector: None,
            previewer: None,
            opener: None,
            tmp_review_path: None,
            tmp_prompt_path: None,
            sources_file: None,
            log_file: None,
        }
    }
}

impl LazyReviewConfig {
    /// Resolves the API key from configuration or `OPENAI_API_KEY`.
    #[must_use]
    pub fn resolve_api_key(&self) -> Option<String> {
        self.key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| env::var("OPENAI_API_KEY").ok().filter(|key| !key.is_empty()))
    }

    /// Returns the target directory or an error if blank.
    ///
    /// # Errors
    ///
    /// Returns [`LazyReviewError::Configuration`] when `target` is empty.
    pub fn require_target(&self) -> Result<&Utf8Path, LazyReviewError> {
        require_non_blank(&self.target, "target directory is required (use --target or -t)")
            .map(Utf8Path::new)
    }

    /// Returns the reviews output path or an error if blank.
    ///
    /// # Errors
    ///
    /// Returns [`LazyReviewError::Configuration`] when `output` is empty.
    pub fn require_output(&self) -> Result<&Utf8Path, LazyReviewError> {
        require_non_blank(&self.output, "output file is required (use --output or -o)")
            .map(Utf8Path::new)
    }

    /// Returns the model or an error if blank.
    ///
    /// # Errors
    ///
    /// Returns [`LazyReviewError::Configuration`] when `model` is empty.
    pub fn require_model(&self) -> Result<&str, LazyReviewError> {
        require_non_blank(&self.model, "model is required (use --model or -m)")
    }

    /// Parses the provider flavour.
    ///
    /// # Errors
    ///
    /// Returns [`LazyReviewError::Configuration`] for unknown providers or
    /// when Azure is selected without an endpoint and API version.
    pub fn provider(&self) -> Result<Provider, LazyReviewError> {
        match self.provider.trim().to_ascii_lowercase().as_str() {
            "" | "openai" => Ok(Provider::OpenAi),
            "azure" => {
                if self.endpoint.is_none() || self.api_version.is_none() {
                    return Err(LazyReviewError::Configuration {
                        message: "azure provider requires endpoint and api_version".to_owned(),
                    });
                }
                Ok(Provider::Azure)
            }
            other => Err(LazyReviewError::Configuration {
                message: format!("unknown provider '{other}' (expected openai or azure)"),
            }),
        }
    }

    /// Completion token cap, substituting the default for zero.
    #[must_use]
    pub const fn effective_max_tokens(&self) -> u32 {
        if self.max_tokens == 0 {
            DEFAULT_MAX_TOKENS
        } else {
            self.max_tokens
        }
    }

    /// Configured token prices.
    #[must_use]
    pub const fn cost_rates(&self) -> CostRates {
        CostRates {
            input: self.input_cost,
            output: self.output_cost,
        }
    }

    /// Compiles the ignore patterns.
    ///
    /// # Errors
    ///
    /// Returns [`LazyReviewError::Configuration`] naming the first pattern
    /// that is not a valid regular expression.
    pub fn compiled_ignores(&self) -> Result<Vec<Regex>, LazyReviewError> {
        self.ignores
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|error| LazyReviewError::Configuration {
                    message: format!("invalid ignore pattern '{pattern}': {error}"),
                })
            })
            .collect()
    }

    /// Session state file path, defaulting under the XDG state directory.
    ///
    /// # Errors
    ///
    /// Returns [`LazyReviewError::Configuration`] when no explicit path is
    /// configured and neither the XDG variable nor `HOME` is set.
    pub fn state_path(&self) -> Result<Utf8PathBuf, LazyReviewError> {
        self.path_or_xdg(self.state.as_deref(), XdgBase::State, "state.json")
    }

    /// Scratch path for reviews handed to the opener.
    ///
    /// # Errors
    ///
    /// Returns [`LazyReviewError::Configuration`] when no base directory can
    /// be resolved.
    pub fn tmp_review_path(&self) -> Result<Utf8PathBuf, LazyReviewError> {
        self.path_or_xdg(
            self.tmp_review_path.as_deref(),
            XdgBase::Cache,
            "tmp_review.md",
        )
    }

    /// Scratch path for prompts and context entries handed to the editor.
    ///
    /// # Errors
    ///
    /// Returns [`LazyReviewError::Configuration`] when no base directory can
    /// be resolved.
    pub fn tmp_prompt_path(&self) -> Result<Utf8PathBuf, LazyReviewError> {
        self.path_or_xdg(
            self.tmp_prompt_path.as_deref(),
            XdgBase::Cache,
            "tmp_prompt.md",
        )
    }

    fn path_or_xdg(
        &self,
        explicit: Option<&str>,
        base: XdgBase,
        file_name: &str,
    ) -> Result<Utf8PathBuf, LazyReviewError> {
        if let Some(path) = explicit.filter(|path| !path.is_empty()) {
            return Ok(Utf8PathBuf::from(path));
        }
        let xdg = env::var(base.variable()).ok().filter(|value| !value.is_empty());
        let home = env::var("HOME").ok().filter(|value| !value.is_empty());
        resolve_xdg_path(base, xdg.as_deref(), home.as_deref(), APP_DIR, file_name)
    }

    /// Loads the sources declared in `sources_file`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`LazyReviewError::Configuration`] when the file cannot be
    /// read or parsed, or declares duplicate source names.
    pub fn load_sources(&self) -> Result<Vec<SourceConfig>, LazyReviewError> {
        self.sources_file
            .as_deref()
            .filter(|path| !path.is_empty())
            .map_or_else(|| Ok(Vec::new()), |path| load_sources(Utf8Path::new(path)))
    }

    /// Renders the configuration for the config detail panel.
    ///
    /// The API key is masked.
    #[must_use]
    pub fn summary_lines(&self) -> Vec<String> {
        let show = |value: Option<&str>| value.unwrap_or_default().to_owned();
        vec![
            format!("key={}", if self.key.is_some() { "******" } else { "" }),
            format!("endpoint={}", show(self.endpoint.as_deref())),
            format!("api_version={}", show(self.api_version.as_deref())),
            format!("provider={}", self.provider),
            format!("model={}", self.model),
            format!("target={}", self.target),
            format!("output={}", self.output),
            format!("state={}", show(self.state.as_deref())),
            format!("ignores={}", self.ignores.join(",")),
            format!("prompt={}", show(self.prompt.as_deref())),
            format!("collector={}", show(self.collector.as_deref())),
            format!("previewer={}", show(self.previewer.as_deref())),
            format!("max_tokens={}", self.effective_max_tokens()),
            format!("tmp_review_path={}", show(self.tmp_review_path.as_deref())),
            format!("opener={}", show(self.opener.as_deref())),
            format!("sources_file={}", show(self.sources_file.as_deref())),
        ]
    }
}

fn require_non_blank<'a>(value: &'a str, message: &str) -> Result<&'a str, LazyReviewError> {
    if value.trim().is_empty() {
        return Err(LazyReviewError::Configuration {
            message: message.to_owned(),
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests;
