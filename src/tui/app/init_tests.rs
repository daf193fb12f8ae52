//! Tests for startup initialisation of the review workspace.

use std::error::Error;
use std::io;
use std::time::Duration;

use bubbletea_rs::Model;

use super::*;
use crate::tui::messages::AppMsg;

#[test]
fn init_returns_startup_command() {
    // OnceLock may hold a context set by another test; only the command and
    // initial focus are independent of it.
    let (app, cmd) = App::init();

    assert!(cmd.is_some());
    assert_eq!(app.focus(), FocusState::ItemList);
    assert!(app.message().is_none());
    assert!(app.queue().is_empty());
}

#[tokio::test]
async fn init_emits_initialized_message_immediately() -> Result<(), Box<dyn Error>> {
    let (_app, cmd) = App::init();
    let startup_cmd =
        cmd.ok_or_else(|| io::Error::other("init should return a startup command"))?;

    let result = tokio::time::timeout(Duration::from_millis(250), startup_cmd).await?;
    let msg = result.ok_or_else(|| io::Error::other("startup command should return a message"))?;

    let app_msg = msg.downcast_ref::<AppMsg>();
    if !matches!(app_msg, Some(AppMsg::Initialized)) {
        return Err(io::Error::other("startup command should emit AppMsg::Initialized").into());
    }

    Ok(())
}

#[test]
fn initialized_message_without_items_needs_no_follow_up() {
    let mut app = App::with_dimensions(
        AppEnvironment::default(),
        Vec::new(),
        Vec::new(),
        Vec::new(),
        SessionState::default(),
        80,
        24,
    );

    assert!(app.handle_message(&AppMsg::Initialized).is_none());
}
