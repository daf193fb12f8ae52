//! Application telemetry events and sinks.
//!
//! lazyreview is a local tool; telemetry exists for debugging and to capture
//! operational signals such as token consumption per review.

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted by lazyreview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// A review request finished, successfully or not.
    ReviewCompleted {
        /// Prompt tokens reported by the provider (zero on failure).
        prompt_tokens: u64,
        /// Completion tokens reported by the provider (zero on failure).
        completion_tokens: u64,
        /// Whether the request failed and its error became the review text.
        failed: bool,
    },
    /// Items were (re)collected.
    ItemsCollected {
        /// Number of items produced by the collection plan.
        count: usize,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync + std::fmt::Debug {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events as JSON through `tracing`.
///
/// Events land in the log file when file logging is enabled and are dropped
/// otherwise, so the sink never writes to the terminal the TUI draws on.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTelemetrySink;

impl TelemetrySink for TracingTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        tracing::info!(target: "lazyreview::telemetry", event = %serialised, "telemetry");
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Recording sink for tests.

    use std::sync::Mutex;

    use super::{TelemetryEvent, TelemetrySink};

    /// Sink that keeps every recorded event in memory.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingTelemetrySink {
        events: Mutex<Vec<TelemetryEvent>>,
    }

    impl RecordingTelemetrySink {
        /// Events recorded so far.
        pub(crate) fn events(&self) -> Vec<TelemetryEvent> {
            self.events
                .lock()
                .expect("events mutex should be available")
                .clone()
        }
    }

    impl TelemetrySink for RecordingTelemetrySink {
        fn record(&self, event: TelemetryEvent) {
            self.events
                .lock()
                .expect("events mutex should be available")
                .push(event);
        }
    }
}
