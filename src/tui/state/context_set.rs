//! Ordered, de-duplicated context entries prepended to review requests.

use crate::items::{Item, ItemIdentity};

/// An item placed into the context set.
///
/// Edited text is sticky: once set it is used instead of the item's preview
/// until the entry is removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextEntry {
    item: Item,
    edited_text: Option<String>,
}

impl ContextEntry {
    /// The item snapshot taken when the entry was added.
    #[must_use]
    pub const fn item(&self) -> &Item {
        &self.item
    }

    /// Returns true once the entry text was edited by hand.
    #[must_use]
    pub const fn is_edited(&self) -> bool {
        self.edited_text.is_some()
    }

    /// Text contributed by this entry: the edited text, or the preview.
    #[must_use]
    pub fn effective_text<F>(&self, preview: F) -> String
    where
        F: Fn(&Item) -> String,
    {
        self.edited_text
            .clone()
            .unwrap_or_else(|| preview(&self.item))
    }

    /// Label shown in the context list.
    #[must_use]
    pub fn label(&self) -> String {
        if self.is_edited() {
            format!("{} (edited)", self.item.title())
        } else {
            self.item.title().to_owned()
        }
    }
}

/// Insertion-ordered set of context entries keyed by item identity.
#[derive(Debug, Clone, Default)]
pub struct ContextSet {
    entries: Vec<ContextEntry>,
}

impl ContextSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `item` unless an entry with the same identity exists.
    ///
    /// Returns true when the set grew.
    pub fn add(&mut self, item: &Item) -> bool {
        if self.contains(item.identity()) {
            return false;
        }
        self.entries.push(ContextEntry {
            item: item.clone(),
            edited_text: None,
        });
        true
    }

    /// Removes the entry for `identity`.
    ///
    /// Returns true when an entry was removed; removing a non-member is a
    /// no-op.
    pub fn remove(&mut self, identity: &ItemIdentity) -> bool {
        let Some(position) = self.position(identity) else {
            return false;
        };
        self.entries.remove(position);
        true
    }

    /// Adds the item when absent and removes it when present.
    ///
    /// Returns true when the item is a member afterwards.
    pub fn toggle(&mut self, item: &Item) -> bool {
        if self.remove(item.identity()) {
            return false;
        }
        self.add(item)
    }

    /// Returns true when `identity` is a member.
    #[must_use]
    pub fn contains(&self, identity: &ItemIdentity) -> bool {
        self.position(identity).is_some()
    }

    /// Replaces the entry's text with hand-edited content.
    ///
    /// Returns false when `identity` is not a member.
    pub fn set_edited_text(&mut self, identity: &ItemIdentity, text: impl Into<String>) -> bool {
        let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.item.identity() == identity)
        else {
            return false;
        };
        entry.edited_text = Some(text.into());
        true
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[ContextEntry] {
        &self.entries
    }

    /// Entry at `index` in insertion order.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ContextEntry> {
        self.entries.get(index)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the set has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels of every entry, in insertion order.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(ContextEntry::label).collect()
    }

    /// Builds the block prepended to review requests.
    ///
    /// Each entry contributes `locator + "\n" + text`; entries are joined by
    /// a blank line in insertion order. An empty set yields an empty string.
    #[must_use]
    pub fn build_context_string<F>(&self, preview: F) -> String
    where
        F: Fn(&Item) -> String,
    {
        self.entries
            .iter()
            .map(|entry| format!("{}\n{}", entry.item.locator(), entry.effective_text(&preview)))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn position(&self, identity: &ItemIdentity) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.item.identity() == identity)
    }
}
