//! Cursor and filter state shared by the item, context and source lists.
//!
//! The state never stores list entries. It keeps the indices of the entries
//! that match the active filter, so callers always resolve the selection
//! against their own strongly typed collection.

/// Where the list filter is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// No filter text; every entry is visible.
    #[default]
    Unfiltered,
    /// The user is typing filter text; list bindings are suppressed.
    Editing,
    /// Filter text was accepted and still narrows the list.
    Applied,
}

/// Cursor position plus an optional case-insensitive title filter.
#[derive(Debug, Clone, Default)]
pub struct ListState {
    cursor: usize,
    filter_text: String,
    mode: FilterMode,
    visible: Vec<usize>,
}

impl ListState {
    /// Creates state for a list of `len` entries with no filter.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            visible: (0..len).collect(),
            ..Self::default()
        }
    }

    /// Recomputes visible entries from `titles` and clamps the cursor.
    ///
    /// Call after the underlying collection changes.
    pub fn refresh<S: AsRef<str>>(&mut self, titles: &[S]) {
        let needle = self.filter_text.to_lowercase();
        self.visible = titles
            .iter()
            .enumerate()
            .filter(|(_, title)| needle.is_empty() || title.as_ref().to_lowercase().contains(&needle))
            .map(|(index, _)| index)
            .collect();
        self.clamp_cursor();
    }

    /// Index into the underlying collection of the selected entry.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.visible.get(self.cursor).copied()
    }

    /// Moves the cursor to the visible entry for underlying `index`.
    ///
    /// Returns false, leaving the cursor alone, when that entry is filtered
    /// out or out of range.
    pub fn select(&mut self, index: usize) -> bool {
        self.visible
            .iter()
            .position(|&visible| visible == index)
            .map(|position| self.cursor = position)
            .is_some()
    }

    /// Cursor position within the visible entries.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Underlying indices of the visible entries, in order.
    #[must_use]
    pub fn visible(&self) -> &[usize] {
        &self.visible
    }

    /// Number of visible entries.
    #[must_use]
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// Moves the cursor up one entry.
    pub const fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor down one entry, stopping at the last.
    pub fn cursor_down(&mut self) {
        let max_index = self.visible.len().saturating_sub(1);
        if self.cursor < max_index {
            self.cursor = self.cursor.saturating_add(1);
        }
    }

    /// Moves the cursor to the first entry.
    pub const fn home(&mut self) {
        self.cursor = 0;
    }

    /// Moves the cursor to the last entry.
    pub fn end(&mut self) {
        self.cursor = self.visible.len().saturating_sub(1);
    }

    /// Index of the first visible entry on the page holding the cursor.
    #[must_use]
    pub fn page_start(&self, page_height: usize) -> usize {
        let page = self.cursor.checked_div(page_height).unwrap_or(0);
        page.saturating_mul(page_height)
    }

    /// One-based page number and page count for `page_height` rows.
    #[must_use]
    pub fn page_position(&self, page_height: usize) -> (usize, usize) {
        let pages = self
            .visible
            .len()
            .saturating_add(page_height.saturating_sub(1))
            .checked_div(page_height)
            .unwrap_or(1)
            .max(1);
        let current = self.cursor.checked_div(page_height).unwrap_or(0);
        (current.saturating_add(1), pages)
    }

    /// Current filter lifecycle stage.
    #[must_use]
    pub const fn filter_mode(&self) -> FilterMode {
        self.mode
    }

    /// Returns true while filter text is being typed.
    #[must_use]
    pub fn is_filtering(&self) -> bool {
        self.mode == FilterMode::Editing
    }

    /// Returns true when no filter narrows the list.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.mode == FilterMode::Unfiltered
    }

    /// Filter text typed so far.
    #[must_use]
    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    /// Starts editing the filter, keeping any applied text.
    pub fn begin_filter(&mut self) {
        self.mode = FilterMode::Editing;
    }

    /// Appends a character to the filter text.
    pub fn push_filter_char<S: AsRef<str>>(&mut self, ch: char, titles: &[S]) {
        self.filter_text.push(ch);
        self.cursor = 0;
        self.refresh(titles);
    }

    /// Removes the last filter character.
    pub fn pop_filter_char<S: AsRef<str>>(&mut self, titles: &[S]) {
        self.filter_text.pop();
        self.cursor = 0;
        self.refresh(titles);
    }

    /// Accepts the typed filter; an empty filter returns to unfiltered.
    pub fn apply_filter(&mut self) {
        self.mode = if self.filter_text.is_empty() {
            FilterMode::Unfiltered
        } else {
            FilterMode::Applied
        };
    }

    /// Drops the filter and shows every entry again.
    pub fn cancel_filter<S: AsRef<str>>(&mut self, titles: &[S]) {
        self.filter_text.clear();
        self.mode = FilterMode::Unfiltered;
        self.refresh(titles);
    }

    fn clamp_cursor(&mut self) {
        let max_index = self.visible.len().saturating_sub(1);
        if self.cursor > max_index {
            self.cursor = max_index;
        }
    }
}
