//! TUI mode for the review workspace.
//!
//! Everything the first frame needs is loaded here, before the terminal is
//! taken over, so that configuration and persistence failures end the
//! process with a readable message instead of a broken screen.

use std::io::{self, Write};
use std::sync::Arc;

use bubbletea_rs::Program;
use camino::Utf8Path;
use crossterm::terminal;
use tracing::info;

use lazyreview::items::{CollectionPlan, DirectoryCollector, collect_items};
use lazyreview::logging::init_file_logging;
use lazyreview::persistence::{load_reviews, load_session_state};
use lazyreview::telemetry::TracingTelemetrySink;
use lazyreview::tui::{
    App, AppEnvironment, StartupContext, set_initial_terminal_size, set_startup_context,
    set_telemetry_sink,
};
use lazyreview::{
    Item, LazyReviewConfig, LazyReviewError, OpenAiReviewConfig, OpenAiReviewService,
    ReviewService, SourceConfig,
};

/// Runs the review workspace.
///
/// # Errors
///
/// Returns an error if:
/// - logging cannot be initialised
/// - the target, output or model is missing, or provider settings are
///   invalid
/// - the sources, reviews or state file cannot be read
/// - the TUI fails to start
pub async fn run(config: LazyReviewConfig) -> Result<(), LazyReviewError> {
    if let Some(log_file) = config.log_file.as_deref().filter(|path| !path.is_empty()) {
        init_file_logging(Utf8Path::new(log_file))?;
    }

    config.require_target()?;
    let output = config.require_output()?.to_owned();
    let review_service: Arc<dyn ReviewService> = Arc::new(OpenAiReviewService::new(
        OpenAiReviewConfig::from_config(&config)?,
    ));

    let sources = config.load_sources()?;
    let environment = AppEnvironment::from_config(config)?;
    let reviews = load_reviews(&output)?;
    let session = load_session_state(&environment.state_path)?;
    let items = collect_startup_items(&environment, &sources).await?;
    info!(
        items = items.len(),
        sources = sources.len(),
        reviews = reviews.len(),
        "starting review workspace"
    );

    // Already-set storage keeps its data when the TUI is re-run in-process.
    let _ = set_startup_context(StartupContext {
        environment,
        items,
        sources,
        reviews,
        session,
        review_service: Some(review_service),
    });
    let _ = set_telemetry_sink(Arc::new(TracingTelemetrySink));
    if let Ok((width, height)) = terminal::size() {
        let _ = set_initial_terminal_size(width, height);
    }

    run_tui().await.map_err(|error| LazyReviewError::Tui {
        message: error.to_string(),
    })
}

async fn collect_startup_items(
    environment: &AppEnvironment,
    sources: &[SourceConfig],
) -> Result<Vec<Item>, LazyReviewError> {
    let plan = CollectionPlan::resolve(
        sources,
        environment.config.collector.as_deref(),
        DirectoryCollector::new(
            environment.config.target.as_str(),
            environment.ignores.clone(),
        ),
    );

    tokio::task::spawn_blocking(move || collect_items(&plan))
        .await
        .map_err(|error| LazyReviewError::Io {
            message: format!("item collection task failed: {error}"),
        })
}

/// Runs the bubbletea-rs program; `App::init()` reads the startup context.
async fn run_tui() -> Result<(), bubbletea_rs::Error> {
    let program = Program::<App>::builder().alt_screen(true).build()?;

    program.run().await?;

    io::stdout().flush().ok();

    Ok(())
}
