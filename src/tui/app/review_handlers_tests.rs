//! Tests for review requests, completions and the animation chain.

use std::sync::Arc;

use bubbletea_rs::Cmd;
use rstest::{fixture, rstest};

use super::test_support::{Workspace, resolve_cmd_to_app_msgs};
use super::*;
use crate::ai::{FAILED_REVIEW_PREFIX, ReviewOutcome, StubReviewService};
use crate::persistence::{Usage, load_reviews, load_session_state};
use crate::tui::messages::AppMsg;
use crate::tui::state::ReviewState;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[fixture]
fn workspace() -> Workspace {
    Workspace::three_files()
}

fn lgtm() -> Arc<StubReviewService> {
    Arc::new(StubReviewService::success("LGTM"))
}

fn request_review(app: &mut App) -> Result<Cmd, &'static str> {
    app.handle_message(&AppMsg::RequestReview)
        .ok_or("review request should return a command")
}

async fn complete(app: &mut App, cmd: Cmd) -> Result<Option<Cmd>, &'static str> {
    let msg = resolve_cmd_to_app_msgs(cmd)
        .await
        .into_iter()
        .find(|msg| matches!(msg, AppMsg::ReviewCompleted { .. }))
        .ok_or("review command should emit ReviewCompleted")?;
    Ok(app.handle_message(&msg))
}

fn ticks(messages: &[AppMsg]) -> usize {
    messages
        .iter()
        .filter(|msg| **msg == AppMsg::AnimationTick)
        .count()
}

fn selected_review(app: &App) -> Option<String> {
    let identity = app.selected_item()?.identity();
    app.store().get(identity).map(|record| record.text.clone())
}

#[rstest]
#[tokio::test]
async fn every_queued_item_is_reviewed_and_saved(workspace: Workspace) -> TestResult {
    let mut app = workspace.app_with_service(lgtm());

    let mut cmds = Vec::new();
    for _ in 0..3 {
        cmds.push(request_review(&mut app)?);
        app.handle_message(&AppMsg::CursorDown);
    }
    assert_eq!(app.queue().len(), 3);
    assert_eq!(app.queue().percent(), 0);
    assert_eq!(app.queue().state(), ReviewState::Reviewing);

    let mut first = true;
    for cmd in cmds {
        complete(&mut app, cmd).await?;
        if first {
            assert_eq!(app.queue().percent(), 33);
            first = false;
        }
    }

    assert!(app.queue().is_empty());
    assert_eq!(app.progress.target(), 100);
    assert!(app.item_labels().iter().all(|label| label.starts_with('☑')));
    assert!(app.message().is_none());

    let saved = load_reviews(&workspace.reviews_path())?;
    assert_eq!(saved.len(), 3);
    assert!(saved.iter().all(|record| record.text == "LGTM"));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn provider_failure_becomes_the_review_text(workspace: Workspace) -> TestResult {
    let service = Arc::new(StubReviewService::failure(LazyReviewError::Network {
        message: "connection refused".to_owned(),
    }));
    let mut app = workspace.app_with_service(service);

    let cmd = request_review(&mut app)?;
    complete(&mut app, cmd).await?;

    let text = selected_review(&app).ok_or("failed review should be stored")?;
    assert!(text.starts_with(FAILED_REVIEW_PREFIX));
    assert!(text.contains("connection refused"));
    assert!(app.queue().is_empty());
    assert!(app.message().is_none());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn missing_service_still_completes_the_request(workspace: Workspace) -> TestResult {
    let mut app = workspace.app();

    let cmd = request_review(&mut app)?;
    complete(&mut app, cmd).await?;

    let text = selected_review(&app).ok_or("failed review should be stored")?;
    assert!(text.contains("no review service configured"));
    assert!(app.queue().is_empty());
    Ok(())
}

#[rstest]
#[tokio::test]
async fn unwritable_reviews_file_opens_message(workspace: Workspace) -> TestResult {
    let mut environment = workspace.environment();
    // A directory cannot be replaced by the reviews file.
    environment.config.output = workspace.root().to_string();
    let mut app = workspace
        .app_with_environment(environment)
        .with_review_service(lgtm());

    let cmd = request_review(&mut app)?;
    complete(&mut app, cmd).await?;

    assert_eq!(app.focus(), FocusState::Message);
    assert!(
        app.message()
            .is_some_and(|text| text.starts_with("failed to save reviews: \n\n"))
    );
    assert!(app.queue().is_empty(), "the entry is dequeued regardless");
    assert_eq!(selected_review(&app).as_deref(), Some("LGTM"));
    Ok(())
}

#[rstest]
#[tokio::test]
async fn context_entries_precede_the_item_in_insertion_order(workspace: Workspace) -> TestResult {
    let stub = lgtm();
    let mut app = workspace.app_with_service(Arc::clone(&stub) as Arc<dyn ReviewService>);
    let items = workspace.items();
    let (alpha, bravo) = match items.as_slice() {
        [first, second, ..] => (first.locator().to_owned(), second.locator().to_owned()),
        _ => return Err("workspace should hold three items".into()),
    };

    app.handle_message(&AppMsg::CursorDown);
    app.handle_message(&AppMsg::ToggleContext);
    app.handle_message(&AppMsg::CursorUp);
    app.handle_message(&AppMsg::ToggleContext);
    app.handle_message(&AppMsg::CursorDown);
    app.handle_message(&AppMsg::CursorDown);

    let cmd = request_review(&mut app)?;
    complete(&mut app, cmd).await?;

    let requests = stub.requests();
    let content = requests
        .first()
        .map(|request| request.content().to_owned())
        .ok_or("the stub should receive one request")?;
    let bravo_at = content.find(&bravo).ok_or("bravo context missing")?;
    let alpha_at = content.find(&alpha).ok_or("alpha context missing")?;
    let item_at = content.find("charlie body").ok_or("item preview missing")?;
    assert!(bravo_at < alpha_at);
    assert!(alpha_at < item_at);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn instant_prompt_overrides_and_is_remembered(workspace: Workspace) -> TestResult {
    let stub = lgtm();
    let mut app = workspace.app_with_service(Arc::clone(&stub) as Arc<dyn ReviewService>);
    app.handle_message(&AppMsg::SetPromptText("focus on naming".to_owned()));

    let cmd = request_review(&mut app)?;
    complete(&mut app, cmd).await?;

    let requests = stub.requests();
    assert_eq!(
        requests.first().map(|request| request.system_prompt()),
        Some("focus on naming")
    );
    assert_eq!(app.session().prompt_history, vec!["focus on naming".to_owned()]);
    let saved = load_session_state(&workspace.state_path())?;
    assert_eq!(saved.prompt_history, vec!["focus on naming".to_owned()]);
    Ok(())
}

#[rstest]
#[tokio::test]
async fn token_usage_accumulates_and_is_saved(workspace: Workspace) -> TestResult {
    let usage = Usage {
        prompt_tokens: 10,
        completion_tokens: 5,
    };
    let service = Arc::new(StubReviewService::success_with_usage("LGTM", usage));
    let mut app = workspace.app_with_service(service);

    for _ in 0..2 {
        let cmd = request_review(&mut app)?;
        complete(&mut app, cmd).await?;
    }

    let expected = Usage {
        prompt_tokens: 20,
        completion_tokens: 10,
    };
    assert_eq!(app.session().usage, expected);
    assert_eq!(load_session_state(&workspace.state_path())?.usage, expected);
    Ok(())
}

#[rstest]
fn completion_for_unqueued_identity_still_records(workspace: Workspace) {
    let mut app = workspace.app();
    let item = workspace.items().into_iter().next().expect("item should exist");

    app.handle_message(&AppMsg::ReviewCompleted {
        identity: item.identity().clone(),
        locator: item.locator().to_owned(),
        outcome: ReviewOutcome::failure("late"),
    });

    assert!(app.store().get(item.identity()).is_some());
    assert!(app.queue().is_empty());
}

#[rstest]
fn first_completion_starts_one_animation_chain(workspace: Workspace) {
    let mut app = workspace.app();
    let item = workspace.items().into_iter().next().expect("item should exist");
    let completed = AppMsg::ReviewCompleted {
        identity: item.identity().clone(),
        locator: item.locator().to_owned(),
        outcome: ReviewOutcome::failure("late"),
    };

    assert!(app.handle_message(&completed).is_some());
    assert!(app.animating);
    assert!(
        app.handle_message(&completed).is_none(),
        "a running chain is not started twice"
    );
}

#[rstest]
#[tokio::test]
async fn first_request_starts_the_spinner_with_the_review(workspace: Workspace) -> TestResult {
    let mut app = workspace.app_with_service(lgtm());

    let first = request_review(&mut app)?;
    assert!(app.animating, "the spinner runs as soon as a review is queued");
    app.handle_message(&AppMsg::CursorDown);
    let second = request_review(&mut app)?;

    let first_messages = resolve_cmd_to_app_msgs(first).await;
    let second_messages = resolve_cmd_to_app_msgs(second).await;
    assert_eq!(ticks(&first_messages), 1);
    assert_eq!(ticks(&second_messages), 0, "a running chain is not started twice");
    for messages in [&first_messages, &second_messages] {
        assert!(
            messages
                .iter()
                .any(|msg| matches!(msg, AppMsg::ReviewCompleted { .. }))
        );
    }
    Ok(())
}

#[rstest]
fn animation_stops_once_idle_and_settled(workspace: Workspace) {
    let mut app = workspace.app();
    app.animating = true;
    app.progress.snap(0);
    app.progress.set_target(100);

    let mut ticks = 0;
    while app.handle_message(&AppMsg::AnimationTick).is_some() {
        ticks += 1;
        assert!(ticks < 100, "the bar should settle");
    }

    assert!(!app.animating);
    assert!(app.progress.is_settled());
}

#[rstest]
fn delete_review_removes_the_record(workspace: Workspace) {
    let mut app = workspace.app();
    let item = workspace.items().into_iter().next().expect("item should exist");
    app.handle_message(&AppMsg::ReviewCompleted {
        identity: item.identity().clone(),
        locator: item.locator().to_owned(),
        outcome: ReviewOutcome::failure("late"),
    });

    app.handle_message(&AppMsg::DeleteReview);

    assert!(app.store().get(item.identity()).is_none());
    assert_eq!(app.review_view.lines(), ["No review".to_owned()]);
}
