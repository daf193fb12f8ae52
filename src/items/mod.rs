//! Reviewable items and the collectors and previewers that produce them.
//!
//! An [`Item`] is recreated on every collection pass. Its [`ItemIdentity`] is
//! derived from the locator and source name only, so reviews, context entries
//! and queued requests keep matching the same item across reloads.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

mod collector;
mod preview;

pub use collector::{
    CollectionPlan, CommandCollector, DirectoryCollector, ItemCollector, collect_items,
};
pub use preview::{NOT_TEXT_MARKER, Previewer, preview_item};

/// Stable identity of an item: the hex SHA-256 of its locator and source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemIdentity(String);

impl ItemIdentity {
    /// Derives the identity for a locator collected from `source_name`.
    ///
    /// Items collected without a named source use an empty source name.
    #[must_use]
    pub fn derive(locator: &str, source_name: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(locator.as_bytes());
        hasher.update(source_name.as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    /// Returns the identity as a hex string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemIdentity {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// A collected, reviewable unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    title: String,
    locator: String,
    source_name: String,
    identity: ItemIdentity,
}

impl Item {
    /// Creates an item, deriving its identity from locator and source.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        locator: impl Into<String>,
        source_name: impl Into<String>,
    ) -> Self {
        let owned_locator = locator.into();
        let owned_source = source_name.into();
        let identity = ItemIdentity::derive(&owned_locator, &owned_source);
        Self {
            title: title.into(),
            locator: owned_locator,
            source_name: owned_source,
            identity,
        }
    }

    /// Creates an item whose title is the final path component of `locator`.
    #[must_use]
    pub fn from_locator(locator: impl Into<String>, source_name: impl Into<String>) -> Self {
        let owned_locator = locator.into();
        let title = title_for_locator(&owned_locator);
        Self::new(title, owned_locator, source_name)
    }

    /// Display title without any review-status prefix.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Path or command argument identifying the item.
    #[must_use]
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Name of the source that produced the item, or empty for the default.
    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Stable identity used as the key for reviews, context and queue.
    #[must_use]
    pub const fn identity(&self) -> &ItemIdentity {
        &self.identity
    }
}

fn title_for_locator(locator: &str) -> String {
    let trimmed = locator.trim_end_matches(['/', '\\']);
    trimmed
        .rsplit(['/', '\\'])
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or(locator)
        .to_owned()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn identity_is_stable_across_recreation() {
        let first = Item::from_locator("src/main.rs", "");
        let second = Item::from_locator("src/main.rs", "");

        assert_eq!(first.identity(), second.identity());
    }

    #[rstest]
    fn identity_depends_on_source_name() {
        let default_source = Item::from_locator("src/main.rs", "");
        let named_source = Item::from_locator("src/main.rs", "lint");

        assert_ne!(default_source.identity(), named_source.identity());
    }

    #[rstest]
    fn identity_ignores_title() {
        let first = Item::new("one", "src/main.rs", "");
        let second = Item::new("two", "src/main.rs", "");

        assert_eq!(first.identity(), second.identity());
    }

    #[rstest]
    fn identity_is_lowercase_hex_sha256() {
        let identity = ItemIdentity::derive("a", "");

        assert_eq!(identity.as_str().len(), 64);
        assert!(
            identity
                .as_str()
                .chars()
                .all(|ch| ch.is_ascii_digit() || ('a'..='f').contains(&ch))
        );
    }

    #[rstest]
    #[case::nested("src/tui/app.rs", "app.rs")]
    #[case::bare("Cargo.toml", "Cargo.toml")]
    #[case::trailing_slash("docs/", "docs")]
    #[case::windows("src\\lib.rs", "lib.rs")]
    fn from_locator_uses_final_path_component(#[case] locator: &str, #[case] expected: &str) {
        assert_eq!(Item::from_locator(locator, "").title(), expected);
    }
}
