//! Main TUI application model implementing the MVU pattern.
//!
//! [`App`] owns every piece of mutable session state: the item, context and
//! source lists, the review queue and store, the instant prompt, focus and
//! zoom. Handlers live in category modules as separate `impl App` blocks;
//! deferred work (review requests, collectors, editor sessions) is issued
//! as commands whose results re-enter [`App::handle_message`].
//!
//! # Module Structure
//!
//! - `routing`: category dispatch and lifecycle handling
//! - `navigation`: focus changes, list cursors and viewport scrolling
//! - `filter_handlers`: item list filter editing
//! - `review_handlers`: review queue, completions and animation
//! - `item_handlers`: collection, sources, view style and preview loading
//! - `context_handlers`: context set membership and editing
//! - `editor`: opener sessions for reviews, prompts and context entries
//! - `viewports`: per-message synchronisation of scrollable panels
//! - `rendering`: frame composition

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use camino::Utf8PathBuf;
use regex::Regex;

use crate::ai::ReviewService;
use crate::config::{LazyReviewConfig, SourceConfig};
use crate::error::LazyReviewError;
use crate::items::{Item, ItemIdentity, Previewer};
use crate::persistence::{ReviewRecord, SessionState};

use super::components::{CodeHighlighter, ProgressBar, ScrollViewport, Spinner};
use super::focus::{FocusState, ZoomState};
use super::input::InputContext;
use super::layout::{LayoutContext, LayoutInputs};
use super::state::{ContextSet, FilterMode, ListState, PromptInput, ReviewQueue, ReviewStore};

mod context_handlers;
mod editor;
mod filter_handlers;
mod item_handlers;
mod model_impl;
mod navigation;
mod rendering;
mod review_handlers;
mod routing;
mod viewports;

/// Settings and resolved paths the app needs after startup.
#[derive(Debug, Clone, Default)]
pub struct AppEnvironment {
    /// Effective configuration.
    pub config: LazyReviewConfig,
    /// Session state file.
    pub state_path: Utf8PathBuf,
    /// Scratch file for opening reviews.
    pub tmp_review_path: Utf8PathBuf,
    /// Scratch file for editing prompts and context entries.
    pub tmp_prompt_path: Utf8PathBuf,
    /// Compiled ignore patterns for the directory walk.
    pub ignores: Vec<Regex>,
    /// Previewer used for items whose source defines none.
    pub previewer: Previewer,
}

impl AppEnvironment {
    /// Resolves paths and patterns from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`LazyReviewError::Configuration`] when a path cannot be
    /// resolved or an ignore pattern does not compile.
    pub fn from_config(config: LazyReviewConfig) -> Result<Self, LazyReviewError> {
        Ok(Self {
            state_path: config.state_path()?,
            tmp_review_path: config.tmp_review_path()?,
            tmp_prompt_path: config.tmp_prompt_path()?,
            ignores: config.compiled_ignores()?,
            previewer: Previewer::from_command(config.previewer.as_deref()),
            config,
        })
    }
}

/// What the content viewport was last rendered from.
#[derive(Debug, Clone)]
struct ContentCache {
    identity: ItemIdentity,
    width: usize,
    loaded: bool,
}

/// Main application model for the review workspace.
#[derive(Debug)]
pub struct App {
    environment: AppEnvironment,
    pub(crate) items: Vec<Item>,
    item_titles: Vec<String>,
    pub(crate) item_list: ListState,
    pub(crate) show_locators: bool,
    pub(crate) sources: Vec<SourceConfig>,
    pub(crate) source_list: ListState,
    pub(crate) context: ContextSet,
    pub(crate) context_list: ListState,
    pub(crate) queue: ReviewQueue,
    pub(crate) store: ReviewStore,
    pub(crate) session: SessionState,
    pub(crate) prompt: PromptInput,
    pub(crate) focus: FocusState,
    pub(crate) zoom: ZoomState,
    pub(crate) message: Option<String>,
    width: u16,
    height: u16,
    content_view: ScrollViewport,
    content_cache: Option<ContentCache>,
    previews: HashMap<ItemIdentity, String>,
    pending_previews: HashSet<ItemIdentity>,
    preview_generation: u64,
    review_view: ScrollViewport,
    review_identity: Option<ItemIdentity>,
    detail_view: ScrollViewport,
    detail_key: Option<viewports::DetailKey>,
    highlighter: CodeHighlighter,
    pub(crate) progress: ProgressBar,
    spinner: Spinner,
    pub(crate) animating: bool,
    review_service: Option<Arc<dyn ReviewService>>,
}

impl App {
    /// Creates an app from startup data.
    #[must_use]
    pub fn new(
        environment: AppEnvironment,
        items: Vec<Item>,
        sources: Vec<SourceConfig>,
        reviews: Vec<ReviewRecord>,
        session: SessionState,
    ) -> Self {
        let (width, height) = super::get_initial_terminal_size();
        Self::with_dimensions(environment, items, sources, reviews, session, width, height)
    }

    /// Creates an app with explicit terminal dimensions.
    #[must_use]
    pub fn with_dimensions(
        environment: AppEnvironment,
        items: Vec<Item>,
        sources: Vec<SourceConfig>,
        reviews: Vec<ReviewRecord>,
        session: SessionState,
        width: u16,
        height: u16,
    ) -> Self {
        let item_titles: Vec<String> = items.iter().map(|item| item.title().to_owned()).collect();
        let store = ReviewStore::new(environment.config.output.as_str(), reviews);
        let prompt = PromptInput::new(session.prompt_history.len());
        let mut app = Self {
            item_list: ListState::new(items.len()),
            source_list: ListState::new(sources.len()),
            items,
            item_titles,
            show_locators: false,
            sources,
            context: ContextSet::new(),
            context_list: ListState::new(0),
            queue: ReviewQueue::new(),
            store,
            session,
            prompt,
            focus: FocusState::default(),
            zoom: ZoomState::default(),
            message: None,
            width,
            height,
            content_view: ScrollViewport::new(),
            content_cache: None,
            previews: HashMap::new(),
            pending_previews: HashSet::new(),
            preview_generation: 0,
            review_view: ScrollViewport::new(),
            review_identity: None,
            detail_view: ScrollViewport::new(),
            detail_key: None,
            highlighter: CodeHighlighter::new(),
            progress: ProgressBar::default(),
            spinner: Spinner::default(),
            animating: false,
            review_service: None,
            environment,
        };
        // Previews load once `AppMsg::Initialized` passes through the loop.
        app.sync_review_view();
        app
    }

    /// Sets the service used for review requests.
    #[must_use]
    pub fn with_review_service(mut self, service: Arc<dyn ReviewService>) -> Self {
        self.review_service = Some(service);
        self
    }

    /// Currently focused panel.
    #[must_use]
    pub const fn focus(&self) -> FocusState {
        self.focus
    }

    /// Current zoom level.
    #[must_use]
    pub const fn zoom(&self) -> ZoomState {
        self.zoom
    }

    /// All collected items, in collection order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// The item under the list cursor, if any.
    #[must_use]
    pub fn selected_item(&self) -> Option<&Item> {
        self.item_list
            .selected()
            .and_then(|index| self.items.get(index))
    }

    /// Pending review queue.
    #[must_use]
    pub const fn queue(&self) -> &ReviewQueue {
        &self.queue
    }

    /// Stored reviews.
    #[must_use]
    pub const fn store(&self) -> &ReviewStore {
        &self.store
    }

    /// Context set.
    #[must_use]
    pub const fn context(&self) -> &ContextSet {
        &self.context
    }

    /// Text shown in the message overlay, if one is open.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Session state: prompt history and token usage.
    #[must_use]
    pub const fn session(&self) -> &SessionState {
        &self.session
    }

    /// Configured sources with their current enabled flags.
    #[must_use]
    pub fn sources(&self) -> &[SourceConfig] {
        &self.sources
    }

    /// Current instant prompt text.
    #[must_use]
    pub fn prompt_text(&self) -> &str {
        self.prompt.value()
    }

    /// List labels for every item, in collection order.
    #[must_use]
    pub fn item_labels(&self) -> Vec<String> {
        self.items
            .iter()
            .map(|item| self.store.label_for(item))
            .collect()
    }

    /// Input context for key mapping.
    pub(crate) fn input_context(&self) -> InputContext {
        InputContext {
            keymap: self.focus.behaviour().keymap,
            filter_editing: self.focus == FocusState::ItemList
                && self.item_list.filter_mode() == FilterMode::Editing,
        }
    }

    /// Layout for the current focus, zoom and terminal size.
    ///
    /// One column is held back so full-width rows never trigger autowrap.
    pub(crate) fn layout(&self) -> LayoutContext {
        LayoutContext::compute(&LayoutInputs {
            focus: self.focus,
            zoom: self.zoom,
            width: self.width.saturating_sub(1).max(1),
            height: self.height.max(1),
            context_len: self.context.len(),
            source_len: self.sources.len(),
            prompt_lines: self.prompt.value().lines().count().max(1),
        })
    }

    /// Opens the message overlay with an error description.
    pub(crate) fn show_error(&mut self, description: &str, error: impl std::fmt::Display) {
        self.open_message(&format!("{description}: \n\n{error}"));
    }

    /// Opens the message overlay; dismissing it returns to the item list.
    pub(crate) fn open_message(&mut self, text: &str) {
        self.message = Some(format!("{text}\n\nPress enter to return..."));
        self.focus = FocusState::Message;
    }
}

#[cfg(test)]
#[path = "test_support.rs"]
mod test_support;


#[cfg(test)]
#[path = "init_tests.rs"]
mod init_tests;

#[cfg(test)]
#[path = "review_handlers_tests.rs"]
mod review_handlers_tests;
