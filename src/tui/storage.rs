//! Startup context storage for the review TUI.
//!
//! bubbletea-rs constructs the model through the static `Model::init`, so
//! everything loaded by the CLI before the program starts is parked in
//! `OnceLock` values here and read back by [`App::init`](super::App).

use std::sync::{Arc, OnceLock};

use crossterm::terminal;

use super::app::AppEnvironment;
use crate::ai::ReviewService;
use crate::config::SourceConfig;
use crate::items::Item;
use crate::persistence::{ReviewRecord, SessionState};
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

static STARTUP_CONTEXT: OnceLock<StartupContext> = OnceLock::new();

/// Initial terminal dimensions, read by `App::new` for the first frame.
static INITIAL_TERMINAL_SIZE: OnceLock<(u16, u16)> = OnceLock::new();

static TELEMETRY_SINK: OnceLock<Arc<dyn TelemetrySink>> = OnceLock::new();

/// Fallback sink, allocated once.
static DEFAULT_TELEMETRY_SINK: OnceLock<Arc<dyn TelemetrySink>> = OnceLock::new();

/// Everything the app starts with.
#[derive(Debug, Clone)]
pub struct StartupContext {
    /// Resolved configuration and paths.
    pub environment: AppEnvironment,
    /// Items collected before the first frame.
    pub items: Vec<Item>,
    /// Sources loaded from the sources file.
    pub sources: Vec<SourceConfig>,
    /// Reviews loaded from the output file.
    pub reviews: Vec<ReviewRecord>,
    /// Prompt history and usage loaded from the state file.
    pub session: SessionState,
    /// Provider client, when one could be configured.
    pub review_service: Option<Arc<dyn ReviewService>>,
}

/// Sets the startup context read by `App::init`.
///
/// Returns `true` if the context was set, `false` if it was already set.
pub fn set_startup_context(context: StartupContext) -> bool {
    STARTUP_CONTEXT.set(context).is_ok()
}

/// Sets the initial terminal dimensions.
///
/// Returns `true` if the dimensions were set, `false` if they were already
/// set.
pub fn set_initial_terminal_size(width: u16, height: u16) -> bool {
    INITIAL_TERMINAL_SIZE.set((width, height)).is_ok()
}

/// Sets the telemetry sink; a no-op sink is used otherwise.
///
/// Returns `true` if the sink was set, `false` if it was already set.
pub fn set_telemetry_sink(sink: Arc<dyn TelemetrySink>) -> bool {
    TELEMETRY_SINK.set(sink).is_ok()
}

/// Clone of the startup context, if the CLI stored one.
///
/// `OnceLock` cannot hand out ownership, so the value is cloned.
pub(crate) fn get_startup_context() -> Option<StartupContext> {
    STARTUP_CONTEXT.get().cloned()
}

fn get_telemetry_sink() -> Arc<dyn TelemetrySink> {
    TELEMETRY_SINK.get().cloned().unwrap_or_else(|| {
        Arc::clone(DEFAULT_TELEMETRY_SINK.get_or_init(|| Arc::new(NoopTelemetrySink)))
    })
}

/// Records a telemetry event on the configured sink.
pub(crate) fn record_telemetry(event: TelemetryEvent) {
    get_telemetry_sink().record(event);
}

/// Initial terminal dimensions, falling back to the live terminal size and
/// then to 80x24.
pub(crate) fn get_initial_terminal_size() -> (u16, u16) {
    const DEFAULT_WIDTH: u16 = 80;
    const DEFAULT_HEIGHT: u16 = 24;

    INITIAL_TERMINAL_SIZE
        .get()
        .copied()
        .filter(|(width, height)| *width > 0 && *height > 0)
        .or_else(|| {
            terminal::size()
                .ok()
                .filter(|(width, height)| *width > 0 && *height > 0)
        })
        .unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT))
}
