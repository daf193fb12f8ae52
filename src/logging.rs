//! File logging for the interactive session.
//!
//! The terminal belongs to the TUI, so diagnostics go to a log file instead.
//! Nothing is installed when no log file is configured.

use std::fs::OpenOptions;
use std::sync::Mutex;

use camino::Utf8Path;
use tracing_subscriber::EnvFilter;

use crate::error::LazyReviewError;

/// Environment variable holding the log filter directive.
pub const LOG_FILTER_VAR: &str = "LAZYREVIEW_LOG";

const DEFAULT_FILTER: &str = "info";

/// Builds the filter from `LAZYREVIEW_LOG`, defaulting to `info`.
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs a global subscriber appending to `log_file`.
///
/// A subscriber that is already installed is left in place.
///
/// # Errors
///
/// Returns [`LazyReviewError::Configuration`] when the log file or its
/// directory cannot be created.
pub fn init_file_logging(log_file: &Utf8Path) -> Result<(), LazyReviewError> {
    if let Some(parent) = log_file.parent().filter(|dir| !dir.as_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|error| LazyReviewError::Configuration {
            message: format!("failed to create log directory '{parent}': {error}"),
        })?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|error| LazyReviewError::Configuration {
            message: format!("failed to open log file '{log_file}': {error}"),
        })?;

    let _already_installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();

    Ok(())
}
