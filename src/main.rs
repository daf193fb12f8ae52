//! lazyreview CLI entrypoint.

use std::io::{self, Write};
use std::process::ExitCode;

use lazyreview::{LazyReviewConfig, LazyReviewError};
use ortho_config::OrthoConfig;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), LazyReviewError> {
    let config = load_config()?;
    cli::review_tui::run(config).await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`LazyReviewError::Configuration`] when ortho-config fails to
/// parse arguments or load configuration files.
fn load_config() -> Result<LazyReviewConfig, LazyReviewError> {
    LazyReviewConfig::load().map_err(|error| LazyReviewError::Configuration {
        message: error.to_string(),
    })
}
