//! Scenario state for review queue BDD tests.

use std::sync::Arc;

use bubbletea_rs::Cmd;
use camino::Utf8PathBuf;
use lazyreview::Item;
use lazyreview::ai::StubReviewService;
use lazyreview::config::LazyReviewConfig;
use lazyreview::items::Previewer;
use lazyreview::persistence::SessionState;
use lazyreview::tui::{App, AppEnvironment};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use tempfile::TempDir;

/// Files and paths backing a scenario.
pub(crate) struct Workspace {
    _dir: TempDir,
    pub(crate) root: Utf8PathBuf,
    pub(crate) items: Vec<Item>,
}

impl Workspace {
    /// Writes `count` files named `item-N` whose body is `body of item N`.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory or a file cannot be created.
    pub(crate) fn with_items(count: usize) -> Self {
        let dir = TempDir::new()
            .unwrap_or_else(|error| panic!("failed to create temporary directory: {error}"));
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .unwrap_or_else(|path| panic!("temporary directory is not UTF-8: {}", path.display()));
        let items = (1..=count)
            .map(|index| {
                let path = root.join(format!("item-{index}"));
                std::fs::write(&path, item_body(index))
                    .unwrap_or_else(|error| panic!("failed to write {path}: {error}"));
                Item::from_locator(path.as_str(), "")
            })
            .collect();
        Self {
            _dir: dir,
            root,
            items,
        }
    }

    pub(crate) fn reviews_path(&self) -> Utf8PathBuf {
        self.root.join("reviews.json")
    }

    /// App over the workspace items, reviewing with `service`.
    pub(crate) fn app(&self, service: Arc<StubReviewService>) -> App {
        let environment = AppEnvironment {
            config: LazyReviewConfig {
                target: self.root.to_string(),
                output: self.reviews_path().to_string(),
                ..LazyReviewConfig::default()
            },
            state_path: self.root.join("state.json"),
            tmp_review_path: self.root.join("tmp_review.md"),
            tmp_prompt_path: self.root.join("tmp_prompt.md"),
            ignores: Vec::new(),
            previewer: Previewer::default(),
        };
        App::with_dimensions(
            environment,
            self.items.clone(),
            Vec::new(),
            Vec::new(),
            SessionState::default(),
            120,
            40,
        )
        .with_review_service(service)
    }
}

/// File content written for the item at one-based `index`.
pub(crate) fn item_body(index: usize) -> String {
    format!("body of item {index}\n")
}

/// State shared across steps in a review queue scenario.
#[derive(ScenarioState, Default)]
pub(crate) struct QueueState {
    /// Temporary files the items point at.
    pub(crate) workspace: Slot<Workspace>,
    /// Stub provider; kept so steps can inspect the requests it saw.
    pub(crate) service: Slot<Arc<StubReviewService>>,
    /// The TUI application model under test.
    pub(crate) app: Slot<App>,
    /// Review commands returned by the app and not yet awaited.
    pub(crate) pending: Slot<Vec<Cmd>>,
}
