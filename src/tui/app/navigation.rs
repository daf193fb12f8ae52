//! Cursor and scrolling handlers.
//!
//! List cursors move in the list owned by the focused panel. Scroll messages
//! move the viewport the focused panel shows: the content or review text in
//! the workspace, or the detail panel beside a summary.

use bubbletea_rs::Cmd;

use super::App;
use crate::tui::components::ScrollViewport;
use crate::tui::focus::FocusState;
use crate::tui::state::ListState;

impl App {
    fn focused_list(&mut self) -> Option<&mut ListState> {
        match self.focus {
            FocusState::ItemList => Some(&mut self.item_list),
            FocusState::Context => Some(&mut self.context_list),
            FocusState::SourceList => Some(&mut self.source_list),
            _ => None,
        }
    }

    /// Viewport scrolled by the focused panel and its height.
    fn focused_viewport(&mut self) -> Option<(&mut ScrollViewport, usize)> {
        let layout = self.layout();
        match self.focus {
            FocusState::Content => Some((&mut self.content_view, layout.workspace_height)),
            FocusState::Review => Some((&mut self.review_view, layout.workspace_height)),
            FocusState::State | FocusState::ConfigSummary | FocusState::ReviewQueue => {
                Some((&mut self.detail_view, layout.detail_height))
            }
            _ => None,
        }
    }

    /// Moves the focused list's cursor up.
    pub(super) fn handle_cursor_up(&mut self) -> Option<Cmd> {
        if let Some(list) = self.focused_list() {
            list.cursor_up();
        }
        None
    }

    /// Moves the focused list's cursor down.
    pub(super) fn handle_cursor_down(&mut self) -> Option<Cmd> {
        if let Some(list) = self.focused_list() {
            list.cursor_down();
        }
        None
    }

    pub(super) fn handle_scroll_down(&mut self) -> Option<Cmd> {
        if let Some((viewport, height)) = self.focused_viewport() {
            viewport.scroll_down(1, height);
        }
        None
    }

    pub(super) fn handle_scroll_up(&mut self) -> Option<Cmd> {
        if let Some((viewport, _)) = self.focused_viewport() {
            viewport.scroll_up(1);
        }
        None
    }

    pub(super) fn handle_half_page_down(&mut self) -> Option<Cmd> {
        if let Some((viewport, height)) = self.focused_viewport() {
            viewport.half_page_down(height);
        }
        None
    }

    pub(super) fn handle_half_page_up(&mut self) -> Option<Cmd> {
        if let Some((viewport, height)) = self.focused_viewport() {
            viewport.half_page_up(height);
        }
        None
    }

    /// Scrolls the review panel from the item list.
    pub(super) fn handle_review_scroll(&mut self, rows: usize, down: bool) -> Option<Cmd> {
        let height = self.layout().workspace_height;
        if down {
            self.review_view.scroll_down(rows, height);
        } else {
            self.review_view.scroll_up(rows);
        }
        None
    }

    /// Scrolls the review panel half a page from the item list.
    pub(super) fn handle_review_half_page(&mut self, down: bool) -> Option<Cmd> {
        let height = self.layout().workspace_height;
        if down {
            self.review_view.half_page_down(height);
        } else {
            self.review_view.half_page_up(height);
        }
        None
    }
}
