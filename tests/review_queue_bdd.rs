//! Behavioural tests for queueing, completing and persisting reviews.

#[path = "review_queue_bdd/mod.rs"]
mod review_queue_bdd_support;

use std::sync::Arc;

use bubbletea_rs::Cmd;
use bubbletea_rs::event::BatchCmdMsg;
use lazyreview::LazyReviewError;
use lazyreview::ai::{FAILED_REVIEW_PREFIX, StubReviewService};
use lazyreview::persistence::load_reviews;
use lazyreview::tui::App;
use lazyreview::tui::messages::AppMsg;
use review_queue_bdd_support::QueueState;
use review_queue_bdd_support::state::{Workspace, item_body};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;

#[fixture]
fn queue_state() -> QueueState {
    QueueState::default()
}

/// Builds the app once both the workspace and the service are known.
#[expect(clippy::expect_used, reason = "BDD test step; panics are acceptable")]
fn install_service(queue_state: &QueueState, service: StubReviewService) {
    let service = Arc::new(service);
    let app = queue_state
        .workspace
        .with_ref(|workspace| workspace.app(Arc::clone(&service)))
        .expect("workspace not initialised");
    queue_state.service.set(service);
    queue_state.app.set(app);
}

#[expect(clippy::expect_used, reason = "BDD test step; panics are acceptable")]
fn request_selected(queue_state: &QueueState) {
    let cmd = queue_state
        .app
        .with_mut(|app| app.handle_message(&AppMsg::RequestReview))
        .expect("app not initialised");
    if let Some(review) = cmd {
        let mut pending = queue_state.pending.take().unwrap_or_default();
        pending.push(review);
        queue_state.pending.set(pending);
    }
}

/// Runs `cmd` and any batch it expands to, collecting the app messages.
fn resolve(runtime: &Runtime, cmd: Cmd) -> Vec<AppMsg> {
    let mut pending = vec![cmd];
    let mut messages = Vec::new();
    while let Some(next) = pending.pop() {
        let Some(boxed) = runtime.block_on(next) else {
            continue;
        };
        match boxed.downcast::<AppMsg>() {
            Ok(msg) => messages.push(*msg),
            Err(other) => {
                if let Ok(batch) = other.downcast::<BatchCmdMsg>() {
                    pending.extend(batch.0);
                }
            }
        }
    }
    messages
}

#[expect(clippy::expect_used, reason = "BDD test step; panics are acceptable")]
fn selected_review_text(app: &App) -> Option<String> {
    let identity = app.selected_item().expect("an item should be selected").identity();
    app.store().get(identity).map(|record| record.text.clone())
}

// Given steps

#[given("a workspace with {count:usize} items")]
fn given_workspace(queue_state: &QueueState, count: usize) {
    queue_state.workspace.set(Workspace::with_items(count));
}

#[given("a review service answering {text}")]
fn given_answering_service(queue_state: &QueueState, text: String) {
    install_service(queue_state, StubReviewService::success(text.trim_matches('"')));
}

#[given("a review service failing with {reason}")]
fn given_failing_service(queue_state: &QueueState, reason: String) {
    let error = LazyReviewError::Network {
        message: reason.trim_matches('"').to_owned(),
    };
    install_service(queue_state, StubReviewService::failure(error));
}

// When steps

#[when("a review is requested for every item")]
#[expect(clippy::expect_used, reason = "BDD test step; panics are acceptable")]
fn when_every_item_requested(queue_state: &QueueState) {
    let count = queue_state
        .app
        .with_ref(|app| app.items().len())
        .expect("app not initialised");
    for _ in 0..count {
        request_selected(queue_state);
        queue_state
            .app
            .with_mut(|app| app.handle_message(&AppMsg::CursorDown))
            .expect("app not initialised");
    }
}

#[when("a review is requested for the selected item")]
fn when_selected_item_requested(queue_state: &QueueState) {
    request_selected(queue_state);
}

#[when("item {index:usize} is selected")]
#[expect(clippy::expect_used, reason = "BDD test step; panics are acceptable")]
fn when_item_selected(queue_state: &QueueState, index: usize) {
    queue_state
        .app
        .with_mut(|app| {
            for _ in 0..app.items().len() {
                app.handle_message(&AppMsg::CursorUp);
            }
            for _ in 1..index {
                app.handle_message(&AppMsg::CursorDown);
            }
        })
        .expect("app not initialised");
}

#[when("item {index:usize} is added to the context")]
#[expect(clippy::expect_used, reason = "BDD test step; panics are acceptable")]
fn when_item_added_to_context(queue_state: &QueueState, index: usize) {
    when_item_selected(queue_state, index);
    queue_state
        .app
        .with_mut(|app| app.handle_message(&AppMsg::ToggleContext))
        .expect("app not initialised");
}

#[when("all pending reviews complete")]
#[expect(clippy::expect_used, reason = "BDD test step; panics are acceptable")]
fn when_pending_reviews_complete(queue_state: &QueueState) {
    let runtime = Runtime::new().expect("runtime should start");
    for cmd in queue_state.pending.take().unwrap_or_default() {
        let messages = resolve(&runtime, cmd);
        assert!(
            messages
                .iter()
                .any(|msg| matches!(msg, AppMsg::ReviewCompleted { .. })),
            "review command should emit ReviewCompleted"
        );
        queue_state
            .app
            .with_mut(|app| {
                for msg in &messages {
                    app.handle_message(msg);
                }
            })
            .expect("app not initialised");
    }
}

// Then steps

#[then("{count:usize} reviews are pending")]
#[expect(clippy::expect_used, reason = "BDD test step; panics are acceptable")]
fn then_reviews_pending(queue_state: &QueueState, count: usize) {
    let pending = queue_state
        .app
        .with_ref(|app| app.queue().len())
        .expect("app not initialised");
    assert_eq!(pending, count);
}

#[then("the review queue is empty")]
fn then_queue_empty(queue_state: &QueueState) {
    then_reviews_pending(queue_state, 0);
}

#[then("the review progress is {percent:u8} percent")]
#[expect(clippy::expect_used, reason = "BDD test step; panics are acceptable")]
fn then_review_progress(queue_state: &QueueState, percent: u8) {
    let actual = queue_state
        .app
        .with_ref(|app| app.queue().percent())
        .expect("app not initialised");
    assert_eq!(actual, percent);
}

#[then("every item is marked reviewed")]
#[expect(clippy::expect_used, reason = "BDD test step; panics are acceptable")]
fn then_every_item_reviewed(queue_state: &QueueState) {
    let labels = queue_state
        .app
        .with_ref(App::item_labels)
        .expect("app not initialised");
    assert!(
        labels.iter().all(|label| label.starts_with('☑')),
        "unexpected labels: {labels:?}"
    );
}

#[then("the reviews file holds {count:usize} reviews")]
#[expect(clippy::expect_used, reason = "BDD test step; panics are acceptable")]
fn then_reviews_file_holds(queue_state: &QueueState, count: usize) {
    let path = queue_state
        .workspace
        .with_ref(Workspace::reviews_path)
        .expect("workspace not initialised");
    let saved = load_reviews(&path).expect("reviews file should load");
    assert_eq!(saved.len(), count);
}

#[then("the selected review reports the failure {reason}")]
#[expect(clippy::expect_used, reason = "BDD test step; panics are acceptable")]
fn then_selected_review_failed(queue_state: &QueueState, reason: String) {
    let text = queue_state
        .app
        .with_ref(selected_review_text)
        .expect("app not initialised")
        .expect("failed review should be stored");
    assert!(text.starts_with(FAILED_REVIEW_PREFIX), "unexpected text: {text}");
    assert!(text.contains(reason.trim_matches('"')), "unexpected text: {text}");
}

#[then("no message is shown")]
#[expect(clippy::expect_used, reason = "BDD test step; panics are acceptable")]
fn then_no_message(queue_state: &QueueState) {
    let message = queue_state
        .app
        .with_ref(|app| app.message().map(str::to_owned))
        .expect("app not initialised");
    assert_eq!(message, None);
}

#[then("the request content lists item {first:usize}, then item {second:usize}, then item {item:usize}")]
#[expect(clippy::expect_used, reason = "BDD test step; panics are acceptable")]
fn then_request_order(queue_state: &QueueState, first: usize, second: usize, item: usize) {
    let requests = queue_state
        .service
        .with_ref(|service| service.requests())
        .expect("service not initialised");
    let content = requests
        .first()
        .map(|request| request.content().to_owned())
        .expect("the service should receive a request");
    let position = |index: usize| {
        content
            .find(item_body(index).trim_end())
            .unwrap_or_else(|| panic!("item {index} missing from request:\n{content}"))
    };
    assert!(position(first) < position(second));
    assert!(position(second) < position(item));
}

// Scenario bindings

#[scenario(path = "tests/features/review_queue.feature", index = 0)]
fn every_item_is_reviewed_and_saved(queue_state: QueueState) {
    let _ = queue_state;
}

#[scenario(path = "tests/features/review_queue.feature", index = 1)]
fn provider_failure_becomes_review_text(queue_state: QueueState) {
    let _ = queue_state;
}

#[scenario(path = "tests/features/review_queue.feature", index = 2)]
fn context_precedes_reviewed_item(queue_state: QueueState) {
    let _ = queue_state;
}

#[scenario(path = "tests/features/review_queue.feature", index = 3)]
fn repeated_request_keeps_one_review(queue_state: QueueState) {
    let _ = queue_state;
}
