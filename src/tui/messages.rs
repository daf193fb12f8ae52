//! Message types for the TUI update loop.
//!
//! Key presses are translated into these messages by the focused keymap.
//! Deferred commands (review requests, collectors, editor sessions) report
//! back with the completion variants.

use crate::ai::ReviewOutcome;
use crate::items::{Item, ItemIdentity};

/// Messages for the review workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMsg {
    // Lifecycle
    /// Synthetic startup message that triggers the first frame.
    Initialized,
    /// Quit the application.
    Quit,
    /// Advance the zoom cycle.
    CycleZoom,
    /// Terminal window was resized.
    WindowResized {
        /// New width in columns.
        width: u16,
        /// New height in rows.
        height: u16,
    },

    // Focus
    /// Focus the next primary panel.
    FocusNextPrimary,
    /// Focus the previous primary panel.
    FocusPreviousPrimary,
    /// Focus the item list.
    FocusItemList,
    /// Focus the content preview.
    FocusContent,
    /// Focus the review text.
    FocusReview,
    /// Focus the instant prompt.
    FocusPrompt,
    /// Leave the instant prompt for the content preview.
    BlurPrompt,
    /// Close the message overlay.
    DismissMessage,

    // Navigation
    /// Move the focused list cursor up.
    CursorUp,
    /// Move the focused list cursor down.
    CursorDown,
    /// Scroll the focused text panel down one line.
    ScrollDown,
    /// Scroll the focused text panel up one line.
    ScrollUp,
    /// Scroll the focused text panel down half a page.
    HalfPageDown,
    /// Scroll the focused text panel up half a page.
    HalfPageUp,
    /// Scroll the review panel down one line from the item list.
    ReviewScrollDown,
    /// Scroll the review panel up one line from the item list.
    ReviewScrollUp,
    /// Scroll the review panel down half a page from the item list.
    ReviewHalfPageDown,
    /// Scroll the review panel up half a page from the item list.
    ReviewHalfPageUp,

    // Filter
    /// Start editing the item list filter.
    StartFilter,
    /// Append a character to the filter.
    FilterInput(char),
    /// Remove the last filter character.
    FilterBackspace,
    /// Accept the filter text.
    ApplyFilter,
    /// Drop the filter.
    CancelFilter,

    // Reviews
    /// Queue a review for the selected item.
    RequestReview,
    /// A queued review finished, successfully or not.
    ReviewCompleted {
        /// Identity of the reviewed item.
        identity: ItemIdentity,
        /// Locator of the reviewed item.
        locator: String,
        /// Review text or folded failure.
        outcome: ReviewOutcome,
    },
    /// Animation frame for the spinner and progress bar.
    AnimationTick,
    /// Remove the selected item's stored review.
    DeleteReview,
    /// Open the selected item's review in the opener.
    OpenReview,

    // Items and sources
    /// Re-collect items from the current plan.
    ReloadItems,
    /// Items collected after a reload.
    ItemsReloaded(Vec<Item>),
    /// Toggle the selected source's enabled flag.
    ToggleSource,
    /// Items collected after the source list changed.
    SourceListUpdated(Vec<Item>),
    /// Show or hide locators under item titles.
    ToggleViewStyle,
    /// An item preview finished loading on the blocking pool.
    PreviewLoaded {
        /// Item the preview belongs to.
        identity: ItemIdentity,
        /// Item list generation the load was issued for.
        generation: u64,
        /// Previewer output.
        text: String,
    },

    // Context
    /// Add or remove the selected item from the context set.
    ToggleContext,
    /// Remove the selected context entry.
    RemoveContext,
    /// Edit the selected context entry in the editor.
    EditContext,
    /// The editor returned new text for a context entry.
    ContextEdited {
        /// Entry that was edited.
        identity: ItemIdentity,
        /// Saved text.
        text: String,
    },

    // Prompt
    /// Insert a character into the instant prompt.
    PromptInput(char),
    /// Delete the character before the prompt cursor.
    PromptBackspace,
    /// Delete the character under the prompt cursor.
    PromptDelete,
    /// Move the prompt cursor left.
    PromptLeft,
    /// Move the prompt cursor right.
    PromptRight,
    /// Move the prompt cursor to the start.
    PromptHome,
    /// Move the prompt cursor to the end.
    PromptEnd,
    /// Show the previous prompt from history.
    PromptHistoryPrev,
    /// Show the next prompt from history.
    PromptHistoryNext,
    /// Edit the instant prompt in the editor.
    EditPrompt,
    /// Replace the instant prompt text.
    SetPromptText(String),

    // Overlay
    /// Show text in the message overlay.
    ShowMessage(String),
    /// An editor or opener session ended.
    EditorClosed {
        /// Failure description, when the session failed.
        error: Option<String>,
    },
}

impl AppMsg {
    /// Returns true for messages that move focus between panels.
    #[must_use]
    pub const fn is_focus(&self) -> bool {
        matches!(
            self,
            Self::FocusNextPrimary
                | Self::FocusPreviousPrimary
                | Self::FocusItemList
                | Self::FocusContent
                | Self::FocusReview
                | Self::FocusPrompt
                | Self::BlurPrompt
                | Self::DismissMessage
        )
    }

    /// Returns true for cursor and scrolling messages.
    #[must_use]
    pub const fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::CursorUp
                | Self::CursorDown
                | Self::ScrollDown
                | Self::ScrollUp
                | Self::HalfPageDown
                | Self::HalfPageUp
                | Self::ReviewScrollDown
                | Self::ReviewScrollUp
                | Self::ReviewHalfPageDown
                | Self::ReviewHalfPageUp
        )
    }

    /// Returns true for item list filter messages.
    #[must_use]
    pub const fn is_filter(&self) -> bool {
        matches!(
            self,
            Self::StartFilter
                | Self::FilterInput(_)
                | Self::FilterBackspace
                | Self::ApplyFilter
                | Self::CancelFilter
        )
    }

    /// Returns true for review queue and review store messages.
    #[must_use]
    pub const fn is_review(&self) -> bool {
        matches!(
            self,
            Self::RequestReview
                | Self::ReviewCompleted { .. }
                | Self::AnimationTick
                | Self::DeleteReview
                | Self::OpenReview
        )
    }

    /// Returns true for item collection and source messages.
    #[must_use]
    pub const fn is_items(&self) -> bool {
        matches!(
            self,
            Self::ReloadItems
                | Self::ItemsReloaded(_)
                | Self::ToggleSource
                | Self::SourceListUpdated(_)
                | Self::ToggleViewStyle
                | Self::PreviewLoaded { .. }
        )
    }

    /// Returns true for context set messages.
    #[must_use]
    pub const fn is_context(&self) -> bool {
        matches!(
            self,
            Self::ToggleContext
                | Self::RemoveContext
                | Self::EditContext
                | Self::ContextEdited { .. }
        )
    }

    /// Returns true for instant prompt messages.
    #[must_use]
    pub const fn is_prompt(&self) -> bool {
        matches!(
            self,
            Self::PromptInput(_)
                | Self::PromptBackspace
                | Self::PromptDelete
                | Self::PromptLeft
                | Self::PromptRight
                | Self::PromptHome
                | Self::PromptEnd
                | Self::PromptHistoryPrev
                | Self::PromptHistoryNext
                | Self::EditPrompt
                | Self::SetPromptText(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::focus(AppMsg::FocusReview, true, false)]
    #[case::navigation(AppMsg::CursorDown, false, true)]
    #[case::lifecycle(AppMsg::Quit, false, false)]
    fn categories_are_disjoint(
        #[case] msg: AppMsg,
        #[case] focus: bool,
        #[case] navigation: bool,
    ) {
        assert_eq!(msg.is_focus(), focus);
        assert_eq!(msg.is_navigation(), navigation);
        assert!(!msg.is_filter() && !msg.is_review() && !msg.is_prompt());
    }
}
