//! Per-frame layout computation.
//!
//! [`LayoutContext::compute`] is a pure function of focus, zoom, terminal
//! size and a few content lengths. Every dimension it returns is an inner
//! (border-less) size of at least one cell; panels whose share of the width
//! collapses to zero are reported as hidden instead.

use crate::tui::focus::{FocusState, ZoomState};

/// Rows taken by the help line at the bottom of the frame.
pub const FOOTER_HEIGHT: usize = 1;
/// Rows taken by a panel's top and bottom border.
pub const BORDER: usize = 2;
/// Most rows shown by the context and source lists before paging.
pub const MAX_SHORT_LIST_ROWS: usize = 5;

const SUMMARY_ROWS: usize = 1;

/// Inputs for one frame's layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutInputs {
    /// Focused panel.
    pub focus: FocusState,
    /// Zoom level.
    pub zoom: ZoomState,
    /// Terminal width in columns.
    pub width: u16,
    /// Terminal height in rows.
    pub height: u16,
    /// Entries in the context list.
    pub context_len: usize,
    /// Entries in the source list.
    pub source_len: usize,
    /// Lines of text in the instant prompt.
    pub prompt_lines: usize,
}

/// Inner panel sizes for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutContext {
    /// Whether the primary column is drawn.
    pub show_primary: bool,
    /// Whether the content preview is drawn.
    pub show_content: bool,
    /// Whether the review panel is drawn.
    pub show_review: bool,
    /// Inner width of primary column panels.
    pub primary_width: usize,
    /// Inner width of full-width secondary panels (prompt, details).
    pub secondary_width: usize,
    /// Inner width of the content preview.
    pub content_width: usize,
    /// Inner width of the review panel.
    pub review_width: usize,
    /// Inner height of the state, config and progress summaries.
    pub summary_height: usize,
    /// Inner height of the context list, including its pager row.
    pub context_height: usize,
    /// Inner height of the source list, including its pager row.
    pub source_height: usize,
    /// Inner height of the item list, including its pager row.
    pub item_list_height: usize,
    /// Inner height of the content and review panels.
    pub workspace_height: usize,
    /// Inner height of the instant prompt.
    pub prompt_height: usize,
    /// Inner height of detail panels and the message overlay.
    pub detail_height: usize,
    /// Inner width of the message overlay.
    pub message_width: usize,
}

impl LayoutContext {
    /// Computes the layout for one frame.
    #[must_use]
    pub fn compute(inputs: &LayoutInputs) -> Self {
        let total_width = usize::from(inputs.width);
        let total_height = usize::from(inputs.height);

        let primary_outer = primary_column_width(inputs.zoom, inputs.focus, total_width);
        let secondary_outer = total_width.saturating_sub(primary_outer);
        let content_outer = content_share(inputs.zoom, inputs.focus, secondary_outer);
        let review_outer = secondary_outer.saturating_sub(content_outer);

        let summary_outer = SUMMARY_ROWS.saturating_add(BORDER);
        let context_height = short_list_height(inputs.context_len);
        let source_height = short_list_height(inputs.source_len);
        let item_list_height = total_height
            .saturating_sub(FOOTER_HEIGHT)
            .saturating_sub(summary_outer.saturating_mul(3))
            .saturating_sub(context_height.saturating_add(BORDER))
            .saturating_sub(source_height.saturating_add(BORDER))
            .saturating_sub(BORDER);

        let prompt_height = inputs
            .prompt_lines
            .min(total_height.checked_div(2).unwrap_or(0))
            .max(1);
        let workspace_height = total_height
            .saturating_sub(FOOTER_HEIGHT)
            .saturating_sub(prompt_height.saturating_add(BORDER))
            .saturating_sub(BORDER);
        let detail_height = total_height
            .saturating_sub(FOOTER_HEIGHT)
            .saturating_sub(BORDER);

        Self {
            show_primary: primary_outer > 0,
            show_content: content_outer > 0,
            show_review: review_outer > 0,
            primary_width: inner(primary_outer),
            secondary_width: inner(secondary_outer),
            content_width: inner(content_outer),
            review_width: inner(review_outer),
            summary_height: SUMMARY_ROWS,
            context_height,
            source_height,
            item_list_height: item_list_height.max(1),
            workspace_height: workspace_height.max(1),
            prompt_height,
            detail_height: detail_height.max(1),
            message_width: inner(total_width),
        }
    }

    /// Returns true when the secondary side has any width.
    #[must_use]
    pub const fn show_secondary(&self) -> bool {
        self.show_content || self.show_review
    }
}

/// Rows needed by a short list: up to five entries plus a pager row once
/// the list pages.
#[must_use]
pub fn short_list_height(len: usize) -> usize {
    let rows = len.clamp(1, MAX_SHORT_LIST_ROWS);
    if len > MAX_SHORT_LIST_ROWS {
        rows.saturating_add(1)
    } else {
        rows
    }
}

/// Rows of entries shown per page in a list of `inner_height` rows that
/// reserves a pager row when `len` exceeds the space.
#[must_use]
pub fn list_page_rows(inner_height: usize, len: usize) -> usize {
    if len > inner_height {
        inner_height.saturating_sub(1).max(1)
    } else {
        inner_height.max(1)
    }
}

fn primary_column_width(zoom: ZoomState, focus: FocusState, total_width: usize) -> usize {
    let primary_focus = focus.is_primary();
    match zoom {
        ZoomState::Normal if primary_focus => total_width.checked_div(3).unwrap_or(0),
        ZoomState::Normal => total_width.checked_div(5).unwrap_or(0),
        ZoomState::Middle if primary_focus => total_width.checked_div(2).unwrap_or(0),
        ZoomState::Max if primary_focus => total_width,
        ZoomState::Middle | ZoomState::Max => 0,
    }
}

fn content_share(zoom: ZoomState, focus: FocusState, secondary_width: usize) -> usize {
    match (zoom, focus) {
        (ZoomState::Max, FocusState::Content) => secondary_width,
        (ZoomState::Max, _) => 0,
        _ => secondary_width.checked_div(2).unwrap_or(0),
    }
}

fn inner(outer: usize) -> usize {
    outer.saturating_sub(BORDER).max(1)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn inputs(focus: FocusState, zoom: ZoomState, width: u16, height: u16) -> LayoutInputs {
        LayoutInputs {
            focus,
            zoom,
            width,
            height,
            context_len: 2,
            source_len: 0,
            prompt_lines: 1,
        }
    }

    #[rstest]
    #[case::primary_focus(FocusState::ItemList, 40, 80)]
    #[case::secondary_focus(FocusState::Content, 24, 96)]
    fn normal_zoom_splits_columns(
        #[case] focus: FocusState,
        #[case] primary: usize,
        #[case] secondary: usize,
    ) {
        let layout = LayoutContext::compute(&inputs(focus, ZoomState::Normal, 120, 40));

        assert_eq!(layout.primary_width, primary.saturating_sub(BORDER));
        assert_eq!(layout.secondary_width, secondary.saturating_sub(BORDER));
        assert!(layout.show_primary && layout.show_content && layout.show_review);
    }

    #[rstest]
    fn middle_zoom_hides_primary_when_unfocused() {
        let layout = LayoutContext::compute(&inputs(
            FocusState::Review,
            ZoomState::Middle,
            100,
            30,
        ));

        assert!(!layout.show_primary);
        assert_eq!(layout.secondary_width, 98);
    }

    #[rstest]
    #[case::content(FocusState::Content, true, false)]
    #[case::review(FocusState::Review, false, true)]
    #[case::prompt(FocusState::InstantPrompt, false, true)]
    fn max_zoom_collapses_unfocused_sibling(
        #[case] focus: FocusState,
        #[case] content: bool,
        #[case] review: bool,
    ) {
        let layout = LayoutContext::compute(&inputs(focus, ZoomState::Max, 100, 30));

        assert!(!layout.show_primary);
        assert_eq!(layout.show_content, content);
        assert_eq!(layout.show_review, review);
    }

    #[rstest]
    fn max_zoom_on_primary_hides_secondary() {
        let layout = LayoutContext::compute(&inputs(
            FocusState::ItemList,
            ZoomState::Max,
            100,
            30,
        ));

        assert!(layout.show_primary);
        assert!(!layout.show_secondary());
        assert_eq!(layout.primary_width, 98);
    }

    #[rstest]
    fn item_list_takes_remaining_height() {
        let layout = LayoutContext::compute(&inputs(
            FocusState::ItemList,
            ZoomState::Normal,
            100,
            40,
        ));

        // 40 - footer 1 - summaries 9 - context 4 - sources 3 - border 2
        assert_eq!(layout.item_list_height, 21);
        assert_eq!(layout.workspace_height, 40 - 1 - 3 - 2);
        assert_eq!(layout.detail_height, 37);
    }

    #[rstest]
    fn prompt_height_is_capped_at_half_the_screen() {
        let mut tall_prompt = inputs(FocusState::InstantPrompt, ZoomState::Normal, 80, 20);
        tall_prompt.prompt_lines = 50;

        assert_eq!(LayoutContext::compute(&tall_prompt).prompt_height, 10);
    }

    #[rstest]
    #[case::empty(0, 1)]
    #[case::short(3, 3)]
    #[case::full(5, 5)]
    #[case::paged(9, 6)]
    fn short_lists_cap_and_page(#[case] len: usize, #[case] expected: usize) {
        assert_eq!(short_list_height(len), expected);
    }

    #[rstest]
    #[case::fits(5, 3, 5)]
    #[case::pages(5, 9, 4)]
    #[case::tiny(1, 9, 1)]
    fn page_rows_reserve_pager(#[case] height: usize, #[case] len: usize, #[case] expected: usize) {
        assert_eq!(list_page_rows(height, len), expected);
    }

    #[rstest]
    fn dimensions_stay_positive_from_minimum_size() {
        let focuses = [
            FocusState::ItemList,
            FocusState::Content,
            FocusState::Review,
            FocusState::ReviewQueue,
            FocusState::InstantPrompt,
            FocusState::ConfigSummary,
            FocusState::State,
            FocusState::Context,
            FocusState::SourceList,
            FocusState::Message,
        ];
        let zooms = [ZoomState::Normal, ZoomState::Middle, ZoomState::Max];

        for width in 20..=60_u16 {
            for height in 10..=30_u16 {
                for focus in focuses {
                    for zoom in zooms {
                        let mut frame = inputs(focus, zoom, width, height);
                        frame.context_len = usize::from(height);
                        frame.source_len = usize::from(width);
                        frame.prompt_lines = usize::from(height);
                        let layout = LayoutContext::compute(&frame);
                        for dimension in [
                            layout.primary_width,
                            layout.secondary_width,
                            layout.content_width,
                            layout.review_width,
                            layout.summary_height,
                            layout.context_height,
                            layout.source_height,
                            layout.item_list_height,
                            layout.workspace_height,
                            layout.prompt_height,
                            layout.detail_height,
                            layout.message_width,
                        ] {
                            assert!(dimension >= 1, "{width}x{height} {focus:?} {zoom:?}");
                        }
                    }
                }
            }
        }
    }
}
