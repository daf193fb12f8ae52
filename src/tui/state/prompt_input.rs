//! Single-line instant prompt input with history navigation.

/// Editable prompt text and its position in the prompt history.
///
/// The history itself lives in the session state; this type only tracks
/// which entry is shown. The index equals the history length when the input
/// is not showing a history entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptInput {
    value: String,
    cursor: usize,
    history_index: usize,
}

impl PromptInput {
    /// Creates an empty input positioned after `history_len` entries.
    #[must_use]
    pub fn new(history_len: usize) -> Self {
        Self {
            history_index: history_len,
            ..Self::default()
        }
    }

    /// Current text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position in characters.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Index of the history entry on display.
    #[must_use]
    pub const fn history_index(&self) -> usize {
        self.history_index
    }

    /// Returns true when there is no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replaces the text and moves the cursor to the end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.cursor = self.value.chars().count();
    }

    /// Clears the text.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Inserts `ch` at the cursor.
    pub fn insert_char(&mut self, ch: char) {
        let byte_index = self.byte_index(self.cursor);
        self.value.insert(byte_index, ch);
        self.cursor = self.cursor.saturating_add(1);
    }

    /// Deletes the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor = self.cursor.saturating_sub(1);
        let byte_index = self.byte_index(self.cursor);
        self.value.remove(byte_index);
    }

    /// Deletes the character under the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let byte_index = self.byte_index(self.cursor);
            self.value.remove(byte_index);
        }
    }

    /// Moves the cursor one character left.
    pub const fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor one character right.
    pub fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor = self.cursor.saturating_add(1);
        }
    }

    /// Moves the cursor to the start.
    pub const fn move_home(&mut self) {
        self.cursor = 0;
    }

    /// Moves the cursor to the end.
    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// Shows the previous history entry, stopping at the oldest.
    pub fn history_prev(&mut self, history: &[String]) {
        if self.history_index == 0 {
            return;
        }
        let index = self.history_index.saturating_sub(1).min(history.len());
        if let Some(entry) = history.get(index) {
            self.history_index = index;
            self.set_value(entry.clone());
        }
    }

    /// Shows the next history entry; moving past the newest clears the
    /// input.
    pub fn history_next(&mut self, history: &[String]) {
        let next = self.history_index.saturating_add(1);
        if let Some(entry) = history.get(next) {
            self.history_index = next;
            self.set_value(entry.clone());
        } else {
            self.clear();
            self.history_index = history.len();
        }
    }

    /// Forgets the history position after the history grew.
    pub const fn reset_history(&mut self, history_len: usize) {
        self.history_index = history_len;
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(index, _)| index)
    }
}
