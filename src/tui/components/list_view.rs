//! Paged list rendering for the item, context and source panels.
//!
//! Lists page rather than scroll. The page holding the cursor is drawn with
//! a `>` marker on the selected row and, once entries overflow the panel, a
//! trailing `page x/y` row. While a filter is active its text occupies the
//! first row. Entries with a description take two rows.

use crate::tui::layout::list_page_rows;
use crate::tui::state::{FilterMode, ListState};

/// Data needed to draw one list panel body.
#[derive(Debug, Clone, Copy)]
pub struct ListViewContext<'a> {
    /// Labels for every entry of the underlying collection.
    pub labels: &'a [String],
    /// Optional second row per entry, indexed like `labels`.
    pub descriptions: Option<&'a [String]>,
    /// Cursor and filter state for the list.
    pub state: &'a ListState,
    /// Inner height of the panel in rows.
    pub height: usize,
    /// Whether the panel has focus; the marker is hidden otherwise.
    pub focused: bool,
    /// Text shown when nothing is visible.
    pub empty_message: &'a str,
}

/// Renders the body rows of a list panel.
#[must_use]
pub fn render_list(ctx: &ListViewContext<'_>) -> Vec<String> {
    let mut rows = Vec::with_capacity(ctx.height);
    let mut height = ctx.height;

    if let Some(filter_row) = filter_row(ctx.state) {
        rows.push(filter_row);
        height = height.saturating_sub(1);
    }

    let visible = ctx.state.visible();
    if visible.is_empty() {
        rows.push(format!("  {}", ctx.empty_message));
        return rows;
    }

    let rows_per_entry = if ctx.descriptions.is_some() { 2 } else { 1 };
    let needed_rows = visible.len().saturating_mul(rows_per_entry);
    let page_entries = list_page_rows(height, needed_rows)
        .checked_div(rows_per_entry)
        .unwrap_or(1)
        .max(1);
    let start = ctx.state.page_start(page_entries);
    for (position, &index) in visible.iter().enumerate().skip(start).take(page_entries) {
        let label = ctx.labels.get(index).map_or("", String::as_str);
        let marker = if ctx.focused && position == ctx.state.cursor() {
            '>'
        } else {
            ' '
        };
        rows.push(format!("{marker} {label}"));
        if let Some(description) = ctx.descriptions.and_then(|all| all.get(index)) {
            rows.push(format!("    {description}"));
        }
    }

    if needed_rows > height {
        let (page, pages) = ctx.state.page_position(page_entries);
        rows.push(format!("  page {page}/{pages}"));
    }
    rows
}

fn filter_row(state: &ListState) -> Option<String> {
    match state.filter_mode() {
        FilterMode::Unfiltered => None,
        FilterMode::Editing => Some(format!("/{}▏", state.filter_text())),
        FilterMode::Applied => Some(format!("/{}", state.filter_text())),
    }
}
