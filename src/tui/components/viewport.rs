//! Scrollable text viewport for the content, review and detail panels.

/// Pre-rendered lines plus a scroll offset.
///
/// The viewport does not know its height; callers pass the panel height to
/// each scrolling call so the offset is always clamped to the current
/// layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollViewport {
    lines: Vec<String>,
    offset: usize,
}

impl ScrollViewport {
    /// Creates an empty viewport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the content, keeping the offset when it is still valid.
    pub fn set_lines(&mut self, lines: Vec<String>, height: usize) {
        self.lines = lines;
        self.offset = self.offset.min(self.max_offset(height));
    }

    /// Replaces the content and scrolls back to the top.
    pub fn reset(&mut self, lines: Vec<String>) {
        self.lines = lines;
        self.offset = 0;
    }

    /// All content lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// First visible line.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Lines visible in a panel of `height` rows.
    #[must_use]
    pub fn visible(&self, height: usize) -> &[String] {
        let end = self.offset.saturating_add(height).min(self.lines.len());
        self.lines.get(self.offset..end).unwrap_or_default()
    }

    /// Scrolls down by `rows`.
    pub fn scroll_down(&mut self, rows: usize, height: usize) {
        self.offset = self.offset.saturating_add(rows).min(self.max_offset(height));
    }

    /// Scrolls up by `rows`.
    pub const fn scroll_up(&mut self, rows: usize) {
        self.offset = self.offset.saturating_sub(rows);
    }

    /// Scrolls down half of `height`.
    pub fn half_page_down(&mut self, height: usize) {
        self.scroll_down(half(height), height);
    }

    /// Scrolls up half of `height`.
    pub fn half_page_up(&mut self, height: usize) {
        self.scroll_up(half(height));
    }

    fn max_offset(&self, height: usize) -> usize {
        self.lines.len().saturating_sub(height)
    }
}

fn half(height: usize) -> usize {
    height.checked_div(2).unwrap_or(0).max(1)
}
