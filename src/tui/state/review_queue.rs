//! Pending review requests and the progress derived from them.
//!
//! The denominator counts every identity enqueued since the queue last
//! drained. Completions only ever raise the percentage; it resets once the
//! queue is empty again.

use crate::items::ItemIdentity;

/// Whether any review request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewState {
    /// No request is pending.
    #[default]
    Idle,
    /// At least one request awaits its completion message.
    Reviewing,
}

/// Multiset of identities awaiting a review result.
#[derive(Debug, Clone, Default)]
pub struct ReviewQueue {
    pending: Vec<ItemIdentity>,
    denominator: usize,
}

impl ReviewQueue {
    /// Creates an empty, idle queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a request for `identity`.
    ///
    /// Returns true when this entry moved the queue from idle to reviewing.
    pub fn enqueue(&mut self, identity: ItemIdentity) -> bool {
        let was_idle = self.pending.is_empty();
        self.pending.push(identity);
        self.denominator = self.denominator.saturating_add(1);
        was_idle
    }

    /// Clears one pending entry for `identity`.
    ///
    /// Only the first match is removed. Draining the queue resets the
    /// denominator. Returns false when `identity` was not pending.
    pub fn complete(&mut self, identity: &ItemIdentity) -> bool {
        let Some(position) = self.pending.iter().position(|pending| pending == identity) else {
            return false;
        };
        self.pending.remove(position);
        if self.pending.is_empty() {
            self.denominator = 0;
        }
        true
    }

    /// Current review state, derived from the pending entries.
    #[must_use]
    pub fn state(&self) -> ReviewState {
        if self.pending.is_empty() {
            ReviewState::Idle
        } else {
            ReviewState::Reviewing
        }
    }

    /// Completion percentage of the current episode, `0..=100`.
    ///
    /// Exactly 100 when and only when nothing is pending.
    #[must_use]
    pub fn percent(&self) -> u8 {
        let done = self.denominator.saturating_sub(self.pending.len());
        let scaled = done
            .saturating_mul(100)
            .checked_div(self.denominator)
            .unwrap_or(100);
        u8::try_from(scaled).unwrap_or(100)
    }

    /// Identities awaiting results, oldest first.
    #[must_use]
    pub fn pending(&self) -> &[ItemIdentity] {
        &self.pending
    }

    /// Returns true when `identity` has a request in flight.
    #[must_use]
    pub fn contains(&self, identity: &ItemIdentity) -> bool {
        self.pending.contains(identity)
    }

    /// Number of pending entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns true when nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Entries enqueued since the queue last drained.
    #[must_use]
    pub const fn denominator(&self) -> usize {
        self.denominator
    }
}
