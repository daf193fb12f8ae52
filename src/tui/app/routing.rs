//! Message routing and dispatch logic.
//!
//! Messages are dispatched by category to the handler modules. Every
//! message, handled or not, ends with the scrollable panels being
//! re-synchronised so panel-local state follows the core state. Preview
//! loads requested by that synchronisation are batched with the handler's
//! own command.

use bubbletea_rs::Cmd;

use super::App;
use crate::tui::focus::FocusState;
use crate::tui::messages::AppMsg;

impl App {
    /// Handles a message and updates state accordingly.
    ///
    /// This is the core update function: it mutates state for `msg` and
    /// returns the follow-up command, if any.
    #[doc(hidden)]
    pub fn handle_message(&mut self, msg: &AppMsg) -> Option<Cmd> {
        let cmd = self.dispatch_by_message_category(msg);
        let loads = self.sync_viewports();
        join_cmds(cmd.into_iter().chain(loads).collect())
    }

    fn dispatch_by_message_category(&mut self, msg: &AppMsg) -> Option<Cmd> {
        if msg.is_focus() {
            return self.handle_focus_msg(msg);
        }
        if msg.is_navigation() {
            return self.handle_navigation_msg(msg);
        }
        if msg.is_filter() {
            return self.handle_filter_msg(msg);
        }
        if msg.is_review() {
            return self.handle_review_msg(msg);
        }
        if msg.is_items() {
            return self.handle_items_msg(msg);
        }
        if msg.is_context() {
            return self.handle_context_msg(msg);
        }
        if msg.is_prompt() {
            return self.handle_prompt_msg(msg);
        }
        self.handle_lifecycle_msg(msg)
    }

    /// Dispatches lifecycle, window and overlay messages.
    fn handle_lifecycle_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::Initialized => None,
            AppMsg::Quit => Some(bubbletea_rs::quit()),
            AppMsg::CycleZoom => {
                self.zoom = self.zoom.next();
                None
            }
            AppMsg::WindowResized { width, height } => {
                self.width = *width;
                self.height = *height;
                None
            }
            AppMsg::ShowMessage(text) => {
                self.open_message(text);
                None
            }
            AppMsg::EditorClosed { error } => {
                if let Some(error) = error {
                    self.show_error("err", error);
                }
                None
            }
            _ => {
                // Unreachable: caller filters to lifecycle messages.
                None
            }
        }
    }

    /// Dispatches focus messages.
    fn handle_focus_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        self.focus = match msg {
            AppMsg::FocusNextPrimary => self.focus.next_primary(),
            AppMsg::FocusPreviousPrimary => self.focus.previous_primary(),
            AppMsg::FocusItemList => FocusState::ItemList,
            AppMsg::FocusContent | AppMsg::BlurPrompt => FocusState::Content,
            AppMsg::FocusReview => FocusState::Review,
            AppMsg::FocusPrompt => FocusState::InstantPrompt,
            AppMsg::DismissMessage => {
                self.message = None;
                FocusState::ItemList
            }
            _ => {
                // Unreachable: caller filters to focus messages.
                self.focus
            }
        };
        None
    }

    /// Dispatches cursor and scrolling messages.
    fn handle_navigation_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::CursorUp => self.handle_cursor_up(),
            AppMsg::CursorDown => self.handle_cursor_down(),
            AppMsg::ScrollDown => self.handle_scroll_down(),
            AppMsg::ScrollUp => self.handle_scroll_up(),
            AppMsg::HalfPageDown => self.handle_half_page_down(),
            AppMsg::HalfPageUp => self.handle_half_page_up(),
            AppMsg::ReviewScrollDown => self.handle_review_scroll(1, true),
            AppMsg::ReviewScrollUp => self.handle_review_scroll(1, false),
            AppMsg::ReviewHalfPageDown => self.handle_review_half_page(true),
            AppMsg::ReviewHalfPageUp => self.handle_review_half_page(false),
            _ => {
                // Unreachable: caller filters to navigation messages.
                None
            }
        }
    }

    /// Dispatches item list filter messages.
    fn handle_filter_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::StartFilter => self.handle_start_filter(),
            AppMsg::FilterInput(ch) => self.handle_filter_input(*ch),
            AppMsg::FilterBackspace => self.handle_filter_backspace(),
            AppMsg::ApplyFilter => self.handle_apply_filter(),
            AppMsg::CancelFilter => self.handle_cancel_filter(),
            _ => {
                // Unreachable: caller filters to filter messages.
                None
            }
        }
    }

    /// Dispatches review queue and store messages.
    fn handle_review_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::RequestReview => self.handle_request_review(),
            AppMsg::ReviewCompleted {
                identity,
                locator,
                outcome,
            } => self.handle_review_completed(identity, locator, outcome),
            AppMsg::AnimationTick => self.handle_animation_tick(),
            AppMsg::DeleteReview => self.handle_delete_review(),
            AppMsg::OpenReview => self.handle_open_review(),
            _ => {
                // Unreachable: caller filters to review messages.
                None
            }
        }
    }

    /// Dispatches collection and source messages.
    fn handle_items_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::ReloadItems => self.handle_reload_items(),
            AppMsg::ItemsReloaded(items) | AppMsg::SourceListUpdated(items) => {
                self.handle_items_collected(items.clone())
            }
            AppMsg::ToggleSource => self.handle_toggle_source(),
            AppMsg::ToggleViewStyle => {
                self.show_locators = !self.show_locators;
                None
            }
            AppMsg::PreviewLoaded {
                identity,
                generation,
                text,
            } => self.handle_preview_loaded(identity, *generation, text),
            _ => {
                // Unreachable: caller filters to item messages.
                None
            }
        }
    }

    /// Dispatches context set messages.
    fn handle_context_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::ToggleContext => self.handle_toggle_context(),
            AppMsg::RemoveContext => self.handle_remove_context(),
            AppMsg::EditContext => self.handle_edit_context(),
            AppMsg::ContextEdited { identity, text } => self.handle_context_edited(identity, text),
            _ => {
                // Unreachable: caller filters to context messages.
                None
            }
        }
    }

    /// Dispatches instant prompt messages.
    fn handle_prompt_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        match msg {
            AppMsg::PromptInput(ch) => self.prompt.insert_char(*ch),
            AppMsg::PromptBackspace => self.prompt.backspace(),
            AppMsg::PromptDelete => self.prompt.delete(),
            AppMsg::PromptLeft => self.prompt.move_left(),
            AppMsg::PromptRight => self.prompt.move_right(),
            AppMsg::PromptHome => self.prompt.move_home(),
            AppMsg::PromptEnd => self.prompt.move_end(),
            AppMsg::PromptHistoryPrev => self.prompt.history_prev(&self.session.prompt_history),
            AppMsg::PromptHistoryNext => self.prompt.history_next(&self.session.prompt_history),
            AppMsg::SetPromptText(text) => self.prompt.set_value(text.clone()),
            AppMsg::EditPrompt => return self.handle_edit_prompt(),
            _ => {
                // Unreachable: caller filters to prompt messages.
            }
        }
        None
    }
}

/// Collapses follow-up commands into at most one, batching when several.
pub(super) fn join_cmds(mut cmds: Vec<Cmd>) -> Option<Cmd> {
    if cmds.len() > 1 {
        return Some(bubbletea_rs::batch(cmds));
    }
    cmds.pop()
}
