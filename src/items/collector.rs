//! Item collectors: directory walks and external commands.
//!
//! Collection never fails from the caller's point of view. A collector that
//! cannot run logs a warning and contributes no items.

use std::fmt::Debug;

use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::SourceConfig;
use crate::process::CommandLine;

use super::Item;

/// Produces the items shown in the item list.
pub trait ItemCollector: Send + Sync + Debug {
    /// Collects items, returning an empty list on any failure.
    fn collect(&self) -> Vec<Item>;
}

/// Walks a directory tree and yields one item per regular file.
#[derive(Debug, Clone)]
pub struct DirectoryCollector {
    root: Utf8PathBuf,
    ignores: Vec<Regex>,
}

impl DirectoryCollector {
    /// Creates a collector rooted at `root` that skips paths matching any of
    /// `ignores`.
    #[must_use]
    pub fn new(root: impl Into<Utf8PathBuf>, ignores: Vec<Regex>) -> Self {
        Self {
            root: root.into(),
            ignores,
        }
    }

    fn is_ignored(&self, locator: &str) -> bool {
        self.ignores.iter().any(|pattern| pattern.is_match(locator))
    }

    fn locator_for(&self, entry: &DirEntry) -> Option<String> {
        let path = Utf8Path::from_path(entry.path())?;
        let locator = if self.root == Utf8Path::new(".") {
            path.strip_prefix("./").unwrap_or(path)
        } else {
            path
        };
        Some(locator.as_str().to_owned())
    }
}

impl ItemCollector for DirectoryCollector {
    fn collect(&self) -> Vec<Item> {
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.file_name() != ".git");

        let mut items = Vec::new();
        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(error) => {
                    warn!(root = %self.root, %error, "skipping unreadable path");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(locator) = self.locator_for(&entry) else {
                debug!(path = ?entry.path(), "skipping non UTF-8 path");
                continue;
            };
            if self.is_ignored(&locator) {
                continue;
            }
            items.push(Item::from_locator(locator, ""));
        }
        items
    }
}

/// Runs a command and treats each non-empty stdout line as a locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCollector {
    command: CommandLine,
    source_name: String,
}

impl CommandCollector {
    /// Creates a collector for `command`, tagging items with `source_name`.
    #[must_use]
    pub fn new(command: CommandLine, source_name: impl Into<String>) -> Self {
        Self {
            command,
            source_name: source_name.into(),
        }
    }

    /// Name attached to every collected item.
    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }
}

impl ItemCollector for CommandCollector {
    fn collect(&self) -> Vec<Item> {
        let output = match self.command.capture(None) {
            Ok(output) => output,
            Err(error) => {
                warn!(source = %self.source_name, %error, "collector failed to start");
                return Vec::new();
            }
        };
        if !output.success {
            warn!(
                source = %self.source_name,
                stderr = %output.stderr.trim(),
                "collector exited unsuccessfully"
            );
            return Vec::new();
        }

        output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| Item::from_locator(line, self.source_name.as_str()))
            .collect()
    }
}

/// Which collectors feed the item list.
#[derive(Debug, Clone)]
pub enum CollectionPlan {
    /// Every enabled source's collector, in configuration order.
    Sources(Vec<CommandCollector>),
    /// The globally configured collector command.
    Command(CommandCollector),
    /// A walk of the target directory.
    Directory(DirectoryCollector),
}

impl CollectionPlan {
    /// Chooses the collectors for the current source configuration.
    ///
    /// Enabled sources win; when no source is enabled the global collector
    /// command is used, and without one the target directory is walked.
    #[must_use]
    pub fn resolve(
        sources: &[SourceConfig],
        collector: Option<&str>,
        directory: DirectoryCollector,
    ) -> Self {
        let enabled: Vec<CommandCollector> = sources
            .iter()
            .filter(|source| source.enabled)
            .filter_map(|source| {
                let parsed = source.collector.as_deref().and_then(CommandLine::parse);
                if parsed.is_none() {
                    warn!(source = %source.name, "source has no collector command");
                }
                parsed.map(|command| CommandCollector::new(command, source.name.as_str()))
            })
            .collect();

        if sources.iter().any(|source| source.enabled) {
            return Self::Sources(enabled);
        }

        collector
            .and_then(CommandLine::parse)
            .map_or_else(
                || Self::Directory(directory),
                |command| Self::Command(CommandCollector::new(command, "")),
            )
    }
}

impl ItemCollector for CollectionPlan {
    fn collect(&self) -> Vec<Item> {
        match self {
            Self::Sources(collectors) => collectors
                .iter()
                .flat_map(ItemCollector::collect)
                .collect(),
            Self::Command(collector) => collector.collect(),
            Self::Directory(collector) => collector.collect(),
        }
    }
}

/// Collects items for `plan`, logging the resulting count.
#[must_use]
pub fn collect_items(plan: &CollectionPlan) -> Vec<Item> {
    let items = plan.collect();
    debug!(count = items.len(), "collected items");
    items
}

#[cfg(test)]
#[path = "collector_tests.rs"]
mod tests;
