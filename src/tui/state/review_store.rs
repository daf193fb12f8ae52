//! In-memory reviews mirrored to the reviews file on every change.
//!
//! The in-memory records stay authoritative when a write fails; the caller
//! reports the error and the next successful write catches the file up.

use camino::{Utf8Path, Utf8PathBuf};

use crate::items::{Item, ItemIdentity};
use crate::persistence::{PersistenceError, ReviewRecord, save_reviews};

/// Text shown for items without a stored review.
pub const NO_REVIEW_TEXT: &str = "No review";

/// Reviews keyed by item identity, with write-through persistence.
#[derive(Debug, Clone)]
pub struct ReviewStore {
    path: Utf8PathBuf,
    records: Vec<ReviewRecord>,
}

impl ReviewStore {
    /// Wraps records loaded from `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>, records: Vec<ReviewRecord>) -> Self {
        Self {
            path: path.into(),
            records,
        }
    }

    /// File the store writes to.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// All records in file order.
    #[must_use]
    pub fn records(&self) -> &[ReviewRecord] {
        &self.records
    }

    /// Record for `identity`, if any.
    #[must_use]
    pub fn get(&self, identity: &ItemIdentity) -> Option<&ReviewRecord> {
        self.records
            .iter()
            .find(|record| &record.identity == identity)
    }

    /// Returns true when `identity` has a finished review.
    #[must_use]
    pub fn is_finished(&self, identity: &ItemIdentity) -> bool {
        self.get(identity).is_some_and(ReviewRecord::is_finished)
    }

    /// Review text for `identity`, or [`NO_REVIEW_TEXT`].
    #[must_use]
    pub fn text_for(&self, identity: &ItemIdentity) -> &str {
        self.get(identity)
            .map_or(NO_REVIEW_TEXT, |record| record.text.as_str())
    }

    /// List label for `item`: `☑ title` once reviewed, else `☐ title`.
    #[must_use]
    pub fn label_for(&self, item: &Item) -> String {
        let mark = if self.is_finished(item.identity()) {
            "☑"
        } else {
            "☐"
        };
        format!("{mark} {}", item.title())
    }

    /// Inserts or replaces the record for its identity, then saves.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the file cannot be written; the
    /// record is kept in memory regardless.
    pub fn upsert(&mut self, record: ReviewRecord) -> Result<(), PersistenceError> {
        match self
            .records
            .iter_mut()
            .find(|existing| existing.identity == record.identity)
        {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
        self.save()
    }

    /// Removes the record for `identity`, saving when one was removed.
    ///
    /// Returns whether a record existed.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the file cannot be written.
    pub fn remove(&mut self, identity: &ItemIdentity) -> Result<bool, PersistenceError> {
        let before = self.records.len();
        self.records.retain(|record| &record.identity != identity);
        if self.records.len() == before {
            return Ok(false);
        }
        self.save().map(|()| true)
    }

    fn save(&self) -> Result<(), PersistenceError> {
        save_reviews(&self.path, &self.records)
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    use super::*;
    use crate::persistence::load_reviews;

    struct StoreFixture {
        _dir: TempDir,
        store: ReviewStore,
    }

    #[fixture]
    fn store_fixture() -> StoreFixture {
        let dir = TempDir::new().expect("temp dir should be created");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .expect("temp dir path should be UTF-8");
        StoreFixture {
            store: ReviewStore::new(root.join("reviews.json"), Vec::new()),
            _dir: dir,
        }
    }

    #[rstest]
    fn upsert_writes_through(store_fixture: StoreFixture) -> Result<(), PersistenceError> {
        let StoreFixture { _dir, mut store } = store_fixture;
        let item = Item::from_locator("src/main.rs", "");

        store.upsert(ReviewRecord::finished(
            item.identity().clone(),
            item.locator(),
            "LGTM",
        ))?;

        let loaded = load_reviews(store.path())?;
        assert_eq!(loaded, store.records());
        assert_eq!(store.text_for(item.identity()), "LGTM");
        Ok(())
    }

    #[rstest]
    fn upsert_replaces_existing_record(store_fixture: StoreFixture) -> Result<(), PersistenceError> {
        let StoreFixture { _dir, mut store } = store_fixture;
        let item = Item::from_locator("a.rs", "");
        let identity = item.identity().clone();

        store.upsert(ReviewRecord::finished(identity.clone(), "a.rs", "first"))?;
        store.upsert(ReviewRecord::finished(identity.clone(), "a.rs", "second"))?;

        assert_eq!(store.records().len(), 1);
        assert_eq!(store.text_for(&identity), "second");
        Ok(())
    }

    #[rstest]
    fn remove_reverts_label(store_fixture: StoreFixture) -> Result<(), PersistenceError> {
        let StoreFixture { _dir, mut store } = store_fixture;
        let item = Item::from_locator("docs/guide.md", "");
        store.upsert(ReviewRecord::finished(
            item.identity().clone(),
            item.locator(),
            "ok",
        ))?;
        assert_eq!(store.label_for(&item), "☑ guide.md");

        assert!(store.remove(item.identity())?);

        assert_eq!(store.label_for(&item), "☐ guide.md");
        assert_eq!(store.text_for(item.identity()), NO_REVIEW_TEXT);
        assert!(load_reviews(store.path())?.is_empty());
        Ok(())
    }

    #[rstest]
    fn removing_unknown_identity_reports_false(
        store_fixture: StoreFixture,
    ) -> Result<(), PersistenceError> {
        let StoreFixture { _dir, mut store } = store_fixture;

        assert!(!store.remove(&ItemIdentity::derive("missing", ""))?);
        Ok(())
    }

    #[rstest]
    fn failed_write_keeps_record_in_memory() -> Result<(), Box<dyn std::error::Error>> {
        let dir = TempDir::new()?;
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file, not a directory")?;
        let path = Utf8PathBuf::from_path_buf(blocker.join("reviews.json"))
            .map_err(|_| "temp path must be UTF-8")?;
        let mut store = ReviewStore::new(path, Vec::new());
        let identity = ItemIdentity::derive("x", "");

        let result = store.upsert(ReviewRecord::finished(identity.clone(), "x", "kept"));

        assert!(result.is_err());
        assert_eq!(store.text_for(&identity), "kept");
        Ok(())
    }
}
