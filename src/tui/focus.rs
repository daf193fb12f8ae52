//! Focus and zoom state machine.
//!
//! Every focus state maps to one [`FocusBehaviour`] row: the keymap that handles
//! its keys, the panel drawn highlighted, and the layout variant composing
//! the frame. Keymap dispatch, highlighting, layout and help all read the
//! same row.

/// Panel that owns keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FocusState {
    /// The item list.
    #[default]
    ItemList,
    /// The content preview.
    Content,
    /// The review text.
    Review,
    /// The review queue and progress panel.
    ReviewQueue,
    /// The instant prompt editor.
    InstantPrompt,
    /// The configuration summary.
    ConfigSummary,
    /// The session state summary.
    State,
    /// The context list.
    Context,
    /// The source list.
    SourceList,
    /// The modal message overlay.
    Message,
}

/// Layout density; advanced by the global zoom key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoomState {
    /// Primary column and secondary panels side by side.
    #[default]
    Normal,
    /// The primary column only takes space while it has focus.
    Middle,
    /// The focused side takes the whole width.
    Max,
}

impl ZoomState {
    /// Next zoom level in the `Normal → Middle → Max` cycle.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Normal => Self::Middle,
            Self::Middle => Self::Max,
            Self::Max => Self::Normal,
        }
    }
}

/// Identifies one rendered panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelId {
    /// Session state summary.
    State,
    /// Item list.
    ItemList,
    /// Context list.
    Context,
    /// Source list.
    SourceList,
    /// Configuration summary.
    ConfigSummary,
    /// Review queue progress.
    ReviewQueue,
    /// Content preview.
    Content,
    /// Review text.
    Review,
    /// Instant prompt.
    InstantPrompt,
    /// Configuration detail.
    ConfigDetail,
    /// Session state detail.
    StateDetail,
    /// Context entry detail.
    ContextDetail,
    /// Source detail.
    SourceDetail,
    /// Queued review locators.
    ReviewStack,
    /// Message overlay.
    Message,
}

/// Named set of key bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapKind {
    /// Item list bindings.
    ItemList,
    /// Content preview bindings.
    Content,
    /// Review text bindings.
    Review,
    /// Instant prompt bindings.
    InstantPrompt,
    /// Context list bindings.
    Context,
    /// Source list bindings.
    SourceList,
    /// Bindings shared by the summary panels.
    Summary,
    /// Message overlay bindings.
    Message,
}

/// How the frame is composed for a focus state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutVariant {
    /// Primary column beside one detail panel.
    Detail(PanelId),
    /// Primary column beside content, review and prompt.
    Workspace,
    /// Full-screen message.
    MessageOverlay,
}

/// One row of the focus table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusBehaviour {
    /// Keymap consulted after the global keymap.
    pub keymap: KeymapKind,
    /// Panel drawn with the highlight border.
    pub highlight: PanelId,
    /// Frame composition.
    pub layout: LayoutVariant,
    /// Whether the focused panel lives in the primary column.
    pub primary: bool,
}

/// Primary column panels in stacking order; also the `h`/`l` cycle.
pub const PRIMARY_ORDER: [FocusState; 6] = [
    FocusState::State,
    FocusState::ItemList,
    FocusState::Context,
    FocusState::SourceList,
    FocusState::ConfigSummary,
    FocusState::ReviewQueue,
];

impl FocusState {
    /// The table row for this focus state.
    #[must_use]
    pub const fn behaviour(self) -> FocusBehaviour {
        const fn row(
            keymap: KeymapKind,
            highlight: PanelId,
            layout: LayoutVariant,
            primary: bool,
        ) -> FocusBehaviour {
            FocusBehaviour {
                keymap,
                highlight,
                layout,
                primary,
            }
        }

        match self {
            Self::ItemList => row(
                KeymapKind::ItemList,
                PanelId::ItemList,
                LayoutVariant::Workspace,
                true,
            ),
            Self::Content => row(
                KeymapKind::Content,
                PanelId::Content,
                LayoutVariant::Workspace,
                false,
            ),
            Self::Review => row(
                KeymapKind::Review,
                PanelId::Review,
                LayoutVariant::Workspace,
                false,
            ),
            Self::InstantPrompt => row(
                KeymapKind::InstantPrompt,
                PanelId::InstantPrompt,
                LayoutVariant::Workspace,
                false,
            ),
            Self::ReviewQueue => row(
                KeymapKind::Summary,
                PanelId::ReviewQueue,
                LayoutVariant::Detail(PanelId::ReviewStack),
                true,
            ),
            Self::ConfigSummary => row(
                KeymapKind::Summary,
                PanelId::ConfigSummary,
                LayoutVariant::Detail(PanelId::ConfigDetail),
                true,
            ),
            Self::State => row(
                KeymapKind::Summary,
                PanelId::State,
                LayoutVariant::Detail(PanelId::StateDetail),
                true,
            ),
            Self::Context => row(
                KeymapKind::Context,
                PanelId::Context,
                LayoutVariant::Detail(PanelId::ContextDetail),
                true,
            ),
            Self::SourceList => row(
                KeymapKind::SourceList,
                PanelId::SourceList,
                LayoutVariant::Detail(PanelId::SourceDetail),
                true,
            ),
            Self::Message => row(
                KeymapKind::Message,
                PanelId::Message,
                LayoutVariant::MessageOverlay,
                false,
            ),
        }
    }

    /// Returns true for panels in the primary column.
    #[must_use]
    pub const fn is_primary(self) -> bool {
        self.behaviour().primary
    }

    /// Next primary panel in stacking order, wrapping.
    ///
    /// Non-primary states move to the item list.
    #[must_use]
    pub fn next_primary(self) -> Self {
        self.step_primary(1)
    }

    /// Previous primary panel in stacking order, wrapping.
    ///
    /// Non-primary states move to the item list.
    #[must_use]
    pub fn previous_primary(self) -> Self {
        self.step_primary(PRIMARY_ORDER.len().saturating_sub(1))
    }

    fn step_primary(self, offset: usize) -> Self {
        let Some(position) = PRIMARY_ORDER.iter().position(|state| *state == self) else {
            return Self::ItemList;
        };
        let target = position
            .saturating_add(offset)
            .checked_rem(PRIMARY_ORDER.len())
            .unwrap_or(0);
        PRIMARY_ORDER.get(target).copied().unwrap_or(Self::ItemList)
    }
}
