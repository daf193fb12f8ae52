//! Key-to-message mapping for every keymap.
//!
//! Resolution order: the global keymap, then the item list filter when it
//! is being edited, then the focused keymap, then raw text input for the
//! instant prompt. Each keymap also declares the short help shown on the
//! bottom line.

use bubbletea_rs::event::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

use super::focus::KeymapKind;
use super::messages::AppMsg;

/// What the key mapper needs to know about the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputContext {
    /// Keymap of the focused panel.
    pub keymap: KeymapKind,
    /// Whether the item list filter is being typed.
    pub filter_editing: bool,
}

/// One entry of a keymap's short help.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelpEntry {
    /// Key label.
    pub key: &'static str,
    /// Action description.
    pub description: &'static str,
}

const fn help(key: &'static str, description: &'static str) -> HelpEntry {
    HelpEntry { key, description }
}

/// Normalised key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chord {
    Char(char),
    Ctrl(char),
    Key(KeyCode),
}

const fn chord(key: &KeyMsg) -> Chord {
    match key.key {
        KeyCode::Char(ch) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Chord::Ctrl(ch.to_ascii_lowercase())
        }
        KeyCode::Char(ch) => Chord::Char(ch),
        other => Chord::Key(other),
    }
}

/// Maps a key press to an application message for the given context.
///
/// Returns `None` for keys no keymap binds.
#[must_use]
pub fn map_key_to_message(key: &KeyMsg, context: InputContext) -> Option<AppMsg> {
    let pressed = chord(key);
    if let Some(msg) = global_key(pressed) {
        return Some(msg);
    }
    if context.filter_editing {
        return filter_key(pressed);
    }

    match context.keymap {
        KeymapKind::ItemList => item_list_key(pressed),
        KeymapKind::Content => content_key(pressed),
        KeymapKind::Review => review_key(pressed),
        KeymapKind::InstantPrompt => prompt_key(pressed).or_else(|| prompt_text_key(pressed)),
        KeymapKind::Context => context_key(pressed),
        KeymapKind::SourceList => source_list_key(pressed),
        KeymapKind::Summary => summary_key(pressed),
        KeymapKind::Message => message_key(pressed),
    }
}

/// Help entries that apply in every state.
pub const GLOBAL_HELP: &[HelpEntry] = &[help("ctrl+c", "quit"), help("+", "zoom")];

const FILTER_HELP: &[HelpEntry] = &[help("enter", "apply filter"), help("esc", "cancel")];
const ITEM_LIST_HELP: &[HelpEntry] = &[
    help("j/k", "move"),
    help("h/l", "panel"),
    help("/", "filter"),
    help("r", "review"),
    help("ctrl+r", "reload"),
    help("enter", "content"),
    help("J/K", "scroll review"),
    help("o", "open"),
    help("i", "prompt"),
    help("a", "context"),
    help("d", "delete"),
    help("v", "view"),
];
const CONTENT_HELP: &[HelpEntry] = &[
    help("j/k", "scroll"),
    help("ctrl+d/u", "half page"),
    help("r", "review"),
    help("i", "prompt"),
    help("tab", "review panel"),
    help("esc", "list"),
];
const REVIEW_HELP: &[HelpEntry] = &[
    help("j/k", "scroll"),
    help("ctrl+d/u", "half page"),
    help("r", "review"),
    help("o", "open"),
    help("i", "prompt"),
    help("tab", "content panel"),
    help("esc", "list"),
];
const PROMPT_HELP: &[HelpEntry] = &[
    help("ctrl+s", "review"),
    help("ctrl+p/n", "history"),
    help("ctrl+e", "editor"),
    help("esc", "blur"),
];
const CONTEXT_HELP: &[HelpEntry] = &[
    help("j/k", "move"),
    help("h/l", "panel"),
    help("x", "remove"),
    help("e", "edit"),
];
const SOURCE_LIST_HELP: &[HelpEntry] = &[
    help("j/k", "move"),
    help("h/l", "panel"),
    help("space", "toggle"),
];
const SUMMARY_HELP: &[HelpEntry] = &[help("h/l", "panel"), help("j/k", "scroll detail")];
const MESSAGE_HELP: &[HelpEntry] = &[help("enter", "return")];

/// Short help for the active keymap.
#[must_use]
pub const fn short_help(context: InputContext) -> &'static [HelpEntry] {
    if context.filter_editing {
        return FILTER_HELP;
    }
    match context.keymap {
        KeymapKind::ItemList => ITEM_LIST_HELP,
        KeymapKind::Content => CONTENT_HELP,
        KeymapKind::Review => REVIEW_HELP,
        KeymapKind::InstantPrompt => PROMPT_HELP,
        KeymapKind::Context => CONTEXT_HELP,
        KeymapKind::SourceList => SOURCE_LIST_HELP,
        KeymapKind::Summary => SUMMARY_HELP,
        KeymapKind::Message => MESSAGE_HELP,
    }
}

/// Formats help entries as `key desc • key desc`.
#[must_use]
pub fn format_help(entries: &[HelpEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("{} {}", entry.key, entry.description))
        .collect::<Vec<_>>()
        .join(" • ")
}

const fn global_key(pressed: Chord) -> Option<AppMsg> {
    match pressed {
        Chord::Ctrl('c') => Some(AppMsg::Quit),
        Chord::Char('+') => Some(AppMsg::CycleZoom),
        _ => None,
    }
}

const fn filter_key(pressed: Chord) -> Option<AppMsg> {
    match pressed {
        Chord::Key(KeyCode::Esc) => Some(AppMsg::CancelFilter),
        Chord::Key(KeyCode::Enter) => Some(AppMsg::ApplyFilter),
        Chord::Key(KeyCode::Backspace) => Some(AppMsg::FilterBackspace),
        Chord::Char(ch) => Some(AppMsg::FilterInput(ch)),
        _ => None,
    }
}

const fn primary_column_key(pressed: Chord) -> Option<AppMsg> {
    match pressed {
        Chord::Char('h') | Chord::Key(KeyCode::Left) => Some(AppMsg::FocusPreviousPrimary),
        Chord::Char('l') | Chord::Key(KeyCode::Right) => Some(AppMsg::FocusNextPrimary),
        _ => None,
    }
}

const fn list_cursor_key(pressed: Chord) -> Option<AppMsg> {
    match pressed {
        Chord::Char('j') | Chord::Key(KeyCode::Down) => Some(AppMsg::CursorDown),
        Chord::Char('k') | Chord::Key(KeyCode::Up) => Some(AppMsg::CursorUp),
        _ => primary_column_key(pressed),
    }
}

const fn scroll_key(pressed: Chord) -> Option<AppMsg> {
    match pressed {
        Chord::Char('j') | Chord::Key(KeyCode::Down) => Some(AppMsg::ScrollDown),
        Chord::Char('k') | Chord::Key(KeyCode::Up) => Some(AppMsg::ScrollUp),
        Chord::Ctrl('d') => Some(AppMsg::HalfPageDown),
        Chord::Ctrl('u') => Some(AppMsg::HalfPageUp),
        _ => None,
    }
}

const fn item_list_key(pressed: Chord) -> Option<AppMsg> {
    match pressed {
        Chord::Char('/') => Some(AppMsg::StartFilter),
        Chord::Ctrl('r') => Some(AppMsg::ReloadItems),
        Chord::Char('r') => Some(AppMsg::RequestReview),
        Chord::Key(KeyCode::Enter) => Some(AppMsg::FocusContent),
        Chord::Char('J') => Some(AppMsg::ReviewScrollDown),
        Chord::Char('K') => Some(AppMsg::ReviewScrollUp),
        Chord::Ctrl('d') => Some(AppMsg::ReviewHalfPageDown),
        Chord::Ctrl('u') => Some(AppMsg::ReviewHalfPageUp),
        Chord::Char('o') => Some(AppMsg::OpenReview),
        Chord::Char('i') => Some(AppMsg::FocusPrompt),
        Chord::Char('a' | 'x') => Some(AppMsg::ToggleContext),
        Chord::Char('d') => Some(AppMsg::DeleteReview),
        Chord::Char('v') => Some(AppMsg::ToggleViewStyle),
        _ => list_cursor_key(pressed),
    }
}

const fn workspace_key(pressed: Chord) -> Option<AppMsg> {
    match pressed {
        Chord::Char('r') => Some(AppMsg::RequestReview),
        Chord::Char('i') => Some(AppMsg::FocusPrompt),
        Chord::Key(KeyCode::Esc) => Some(AppMsg::FocusItemList),
        _ => scroll_key(pressed),
    }
}

const fn content_key(pressed: Chord) -> Option<AppMsg> {
    match pressed {
        Chord::Key(KeyCode::Tab) => Some(AppMsg::FocusReview),
        _ => workspace_key(pressed),
    }
}

const fn review_key(pressed: Chord) -> Option<AppMsg> {
    match pressed {
        Chord::Key(KeyCode::Tab) => Some(AppMsg::FocusContent),
        Chord::Char('o') => Some(AppMsg::OpenReview),
        _ => workspace_key(pressed),
    }
}

const fn prompt_key(pressed: Chord) -> Option<AppMsg> {
    match pressed {
        Chord::Key(KeyCode::Esc) => Some(AppMsg::BlurPrompt),
        Chord::Ctrl('p') => Some(AppMsg::PromptHistoryPrev),
        Chord::Ctrl('n') => Some(AppMsg::PromptHistoryNext),
        Chord::Ctrl('s') => Some(AppMsg::RequestReview),
        Chord::Ctrl('e') => Some(AppMsg::EditPrompt),
        _ => None,
    }
}

const fn prompt_text_key(pressed: Chord) -> Option<AppMsg> {
    match pressed {
        Chord::Char(ch) => Some(AppMsg::PromptInput(ch)),
        Chord::Key(KeyCode::Backspace) => Some(AppMsg::PromptBackspace),
        Chord::Key(KeyCode::Delete) => Some(AppMsg::PromptDelete),
        Chord::Key(KeyCode::Left) => Some(AppMsg::PromptLeft),
        Chord::Key(KeyCode::Right) => Some(AppMsg::PromptRight),
        Chord::Key(KeyCode::Home) | Chord::Ctrl('a') => Some(AppMsg::PromptHome),
        Chord::Key(KeyCode::End) => Some(AppMsg::PromptEnd),
        _ => None,
    }
}

const fn context_key(pressed: Chord) -> Option<AppMsg> {
    match pressed {
        Chord::Char('x') => Some(AppMsg::RemoveContext),
        Chord::Char('e') => Some(AppMsg::EditContext),
        _ => list_cursor_key(pressed),
    }
}

const fn source_list_key(pressed: Chord) -> Option<AppMsg> {
    match pressed {
        Chord::Char(' ') | Chord::Key(KeyCode::Enter) => Some(AppMsg::ToggleSource),
        _ => list_cursor_key(pressed),
    }
}

fn summary_key(pressed: Chord) -> Option<AppMsg> {
    primary_column_key(pressed).or_else(|| scroll_key(pressed))
}

const fn message_key(pressed: Chord) -> Option<AppMsg> {
    match pressed {
        Chord::Key(KeyCode::Enter) => Some(AppMsg::DismissMessage),
        _ => None,
    }
}
