//! Fixtures shared by the app test modules.

use std::sync::Arc;

use bubbletea_rs::Cmd;
use bubbletea_rs::event::BatchCmdMsg;
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

use super::{App, AppEnvironment};
use crate::ai::ReviewService;
use crate::config::LazyReviewConfig;
use crate::items::{Item, Previewer, preview_item};
use crate::persistence::SessionState;
use crate::tui::messages::AppMsg;

pub(super) const WIDTH: u16 = 120;
pub(super) const HEIGHT: u16 = 40;

/// Temporary directory holding item files, the reviews file and state.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
    items: Vec<Item>,
}

impl Workspace {
    /// Writes `files` and creates one item per file, in order.
    pub(super) fn new(files: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().expect("temp dir should be created");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .expect("temp dir should be UTF-8");
        let items = files
            .iter()
            .map(|(name, content)| {
                let path = root.join(name);
                std::fs::write(&path, content).expect("item file should be written");
                Item::from_locator(path.as_str(), "")
            })
            .collect();
        Self {
            _dir: dir,
            root,
            items,
        }
    }

    /// Three small files without an extension, previewed as plain text.
    pub(super) fn three_files() -> Self {
        Self::new(&[
            ("alpha", "alpha body\n"),
            ("bravo", "bravo body\n"),
            ("charlie", "charlie body\n"),
        ])
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn items(&self) -> Vec<Item> {
        self.items.clone()
    }

    pub(super) fn reviews_path(&self) -> Utf8PathBuf {
        self.root.join("reviews.json")
    }

    pub(super) fn state_path(&self) -> Utf8PathBuf {
        self.root.join("state").join("state.json")
    }

    pub(super) fn environment(&self) -> AppEnvironment {
        let config = LazyReviewConfig {
            target: self.root.to_string(),
            output: self.reviews_path().to_string(),
            ..LazyReviewConfig::default()
        };
        AppEnvironment {
            config,
            state_path: self.state_path(),
            tmp_review_path: self.root.join("tmp_review.md"),
            tmp_prompt_path: self.root.join("tmp_prompt.md"),
            ignores: Vec::new(),
            previewer: Previewer::default(),
        }
    }

    /// App over this workspace's items with no review service.
    ///
    /// Every item preview is already cached, so no message issues a load.
    pub(super) fn app(&self) -> App {
        self.app_with_environment(self.environment())
    }

    pub(super) fn app_with_environment(&self, environment: AppEnvironment) -> App {
        preload_previews(self.app_without_previews(environment))
    }

    /// App whose previews still have to be loaded through the loop.
    pub(super) fn app_without_previews(&self, environment: AppEnvironment) -> App {
        App::with_dimensions(
            environment,
            self.items(),
            Vec::new(),
            Vec::new(),
            SessionState::default(),
            WIDTH,
            HEIGHT,
        )
    }

    /// App over this workspace's items using `service` for reviews.
    pub(super) fn app_with_service(&self, service: Arc<dyn ReviewService>) -> App {
        self.app().with_review_service(service)
    }
}

/// Fills the preview cache as if every load had already come back.
pub(super) fn preload_previews(mut app: App) -> App {
    let loaded: Vec<_> = app
        .items
        .iter()
        .map(|item| {
            let text = preview_item(item, &app.sources, &app.environment.previewer);
            (item.identity().clone(), text)
        })
        .collect();
    app.previews.extend(loaded);
    assert!(app.sync_viewports().is_none(), "cached previews need no load");
    app
}

/// Awaits a command, flattening batches, and collects every app message.
pub(super) async fn resolve_cmd_to_app_msgs(cmd: Cmd) -> Vec<AppMsg> {
    let mut pending = vec![cmd];
    let mut messages = Vec::new();
    while let Some(next) = pending.pop() {
        let Some(boxed) = next.await else {
            continue;
        };
        match boxed.downcast::<AppMsg>() {
            Ok(message) => messages.push(*message),
            Err(other) => {
                if let Ok(batch) = other.downcast::<BatchCmdMsg>() {
                    pending.extend(batch.0);
                }
            }
        }
    }
    messages
}
