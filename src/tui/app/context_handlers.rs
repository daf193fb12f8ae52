//! Context set handlers.

use bubbletea_rs::Cmd;
use tracing::debug;

use super::App;
use crate::items::ItemIdentity;

impl App {
    /// Adds or removes the selected item from the context set.
    pub(super) fn handle_toggle_context(&mut self) -> Option<Cmd> {
        let item = self.selected_item()?.clone();
        let added = self.context.toggle(&item);
        debug!(identity = %item.identity(), added, "context toggled");
        self.refresh_context_list();
        None
    }

    /// Removes the context entry under the context list cursor.
    pub(super) fn handle_remove_context(&mut self) -> Option<Cmd> {
        let identity = self.selected_context_identity()?;
        self.context.remove(&identity);
        self.refresh_context_list();
        None
    }

    /// Stores edited text for a context entry.
    pub(super) fn handle_context_edited(&mut self, identity: &ItemIdentity, text: &str) -> Option<Cmd> {
        if !self.context.set_edited_text(identity, text) {
            debug!(%identity, "edited context entry was removed meanwhile");
        }
        self.refresh_context_list();
        None
    }

    pub(super) fn selected_context_identity(&self) -> Option<ItemIdentity> {
        self.context_list
            .selected()
            .and_then(|index| self.context.get(index))
            .map(|entry| entry.item().identity().clone())
    }

    fn refresh_context_list(&mut self) {
        self.context_list.refresh(&self.context.labels());
    }
}
