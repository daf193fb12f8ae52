//! Tests for TUI startup context storage helpers.

use std::sync::Arc;

use crate::items::Item;
use crate::persistence::SessionState;
use crate::telemetry::test_support::RecordingTelemetrySink;
use crate::telemetry::{NoopTelemetrySink, TelemetryEvent, TelemetrySink};

use super::*;

#[test]
fn record_telemetry_without_sink_does_not_panic() {
    // OnceLock may hold Noop or a sink set by another test.
    record_telemetry(TelemetryEvent::ItemsCollected { count: 0 });
}

#[test]
fn noop_telemetry_sink_can_record_without_panic() {
    let sink = NoopTelemetrySink;
    sink.record(TelemetryEvent::ReviewCompleted {
        prompt_tokens: 1,
        completion_tokens: 2,
        failed: false,
    });
}

#[test]
fn set_telemetry_sink_wires_sink_for_record_telemetry() {
    // OnceLock: only verify events if our sink was first to be set.
    let sink = Arc::new(RecordingTelemetrySink::default());
    let was_set = set_telemetry_sink(Arc::clone(&sink) as Arc<dyn TelemetrySink>);
    record_telemetry(TelemetryEvent::ItemsCollected { count: 7 });
    if was_set {
        assert!(
            sink.events()
                .contains(&TelemetryEvent::ItemsCollected { count: 7 })
        );
    }
}

#[test]
fn initial_terminal_size_is_never_zero() {
    let (width, height) = get_initial_terminal_size();
    assert!(width > 0);
    assert!(height > 0);
}

#[test]
fn set_startup_context_wires_context_for_get() {
    let context = StartupContext {
        environment: AppEnvironment::default(),
        items: vec![Item::from_locator("src/main.rs", "")],
        sources: Vec::new(),
        reviews: Vec::new(),
        session: SessionState::default(),
        review_service: None,
    };
    let was_set = set_startup_context(context);

    let retrieved = get_startup_context();
    assert!(retrieved.is_some(), "context should always be available");

    if was_set {
        let stored = retrieved.expect("already asserted Some");
        assert_eq!(stored.items.len(), 1);
    }
}
