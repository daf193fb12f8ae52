//! Filter message handlers for the item list.
//!
//! The filter narrows the list by case-insensitive title match. While it is
//! being edited the key mapper routes every key here instead of to the list
//! bindings.

use bubbletea_rs::Cmd;

use super::App;

impl App {
    pub(super) fn handle_start_filter(&mut self) -> Option<Cmd> {
        self.item_list.begin_filter();
        None
    }

    pub(super) fn handle_filter_input(&mut self, ch: char) -> Option<Cmd> {
        self.item_list.push_filter_char(ch, &self.item_titles);
        None
    }

    pub(super) fn handle_filter_backspace(&mut self) -> Option<Cmd> {
        self.item_list.pop_filter_char(&self.item_titles);
        None
    }

    pub(super) fn handle_apply_filter(&mut self) -> Option<Cmd> {
        self.item_list.apply_filter();
        None
    }

    /// Drops the filter text and shows every item again.
    pub(super) fn handle_cancel_filter(&mut self) -> Option<Cmd> {
        self.item_list.cancel_filter(&self.item_titles);
        None
    }
}
