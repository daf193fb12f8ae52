//! Item collection and source handlers.
//!
//! Collection runs on the blocking pool and reports back with the new item
//! list. Items are recreated wholesale; the selection follows the
//! previously selected identity when it survives.
//!
//! Previews run on the blocking pool too, at most one load per identity at
//! a time. Every collection starts a new preview generation: cached text is
//! dropped and loads issued for an older generation are discarded.

use std::any::Any;

use bubbletea_rs::Cmd;
use tracing::{debug, warn};

use super::App;
use crate::config::SourceConfig;
use crate::items::{
    CollectionPlan, DirectoryCollector, Item, ItemIdentity, Previewer, collect_items, preview_item,
};
use crate::telemetry::TelemetryEvent;
use crate::tui::messages::AppMsg;
use crate::tui::record_telemetry;

impl App {
    /// Collection plan for the current source flags.
    pub(crate) fn collection_plan(&self) -> CollectionPlan {
        let config = &self.environment.config;
        CollectionPlan::resolve(
            &self.sources,
            config.collector.as_deref(),
            DirectoryCollector::new(config.target.as_str(), self.environment.ignores.clone()),
        )
    }

    /// Re-collects items; ignored while the list is filtered.
    pub(super) fn handle_reload_items(&mut self) -> Option<Cmd> {
        if !self.item_list.is_unfiltered() {
            debug!("reload ignored while the item list is filtered");
            return None;
        }
        Some(spawn_collection(self.collection_plan(), AppMsg::ItemsReloaded))
    }

    /// Flips the selected source's enabled flag and re-collects.
    pub(super) fn handle_toggle_source(&mut self) -> Option<Cmd> {
        let index = self.source_list.selected()?;
        let source = self.sources.get_mut(index)?;
        source.enabled = !source.enabled;
        debug!(source = %source.name, enabled = source.enabled, "source toggled");
        Some(spawn_collection(
            self.collection_plan(),
            AppMsg::SourceListUpdated,
        ))
    }

    /// Replaces the item list with freshly collected items.
    pub(super) fn handle_items_collected(&mut self, items: Vec<Item>) -> Option<Cmd> {
        let previous = self.selected_item().map(|item| item.identity().clone());

        record_telemetry(TelemetryEvent::ItemsCollected { count: items.len() });
        self.item_titles = items.iter().map(|item| item.title().to_owned()).collect();
        self.items = items;
        self.item_list.refresh(&self.item_titles);
        self.forget_previews();

        let restored = previous.and_then(|identity| {
            self.items
                .iter()
                .position(|item| item.identity() == &identity)
        });
        if let Some(index) = restored {
            self.item_list.select(index);
        }
        None
    }

    /// Caches a loaded preview unless the item list has since been replaced.
    pub(super) fn handle_preview_loaded(
        &mut self,
        identity: &ItemIdentity,
        generation: u64,
        text: &str,
    ) -> Option<Cmd> {
        if generation != self.preview_generation {
            debug!(%identity, generation, "stale preview discarded");
            return None;
        }
        self.pending_previews.remove(identity);
        self.previews.insert(identity.clone(), text.to_owned());
        None
    }

    /// Cached preview text for `identity`.
    pub(super) fn cached_preview(&self, identity: &ItemIdentity) -> Option<&str> {
        self.previews.get(identity).map(String::as_str)
    }

    /// Issues a preview load for `item` unless one is cached or in flight.
    pub(super) fn request_preview(&mut self, item: &Item) -> Option<Cmd> {
        let identity = item.identity();
        if self.previews.contains_key(identity) || self.pending_previews.contains(identity) {
            return None;
        }
        self.pending_previews.insert(identity.clone());
        Some(spawn_preview(PreviewJob {
            item: item.clone(),
            sources: self.sources.clone(),
            previewer: self.environment.previewer.clone(),
            generation: self.preview_generation,
        }))
    }

    fn forget_previews(&mut self) {
        self.previews.clear();
        self.pending_previews.clear();
        self.preview_generation = self.preview_generation.wrapping_add(1);
        self.content_cache = None;
        self.detail_key = None;
    }
}

/// One preview load, detached from the app.
struct PreviewJob {
    item: Item,
    sources: Vec<SourceConfig>,
    previewer: Previewer,
    generation: u64,
}

impl PreviewJob {
    fn run(self) -> AppMsg {
        let text = preview_item(&self.item, &self.sources, &self.previewer);
        AppMsg::PreviewLoaded {
            identity: self.item.identity().clone(),
            generation: self.generation,
            text,
        }
    }
}

fn spawn_preview(job: PreviewJob) -> Cmd {
    let identity = job.item.identity().clone();
    let generation = job.generation;
    Box::pin(async move {
        let msg = tokio::task::spawn_blocking(move || job.run())
            .await
            .unwrap_or_else(|error| {
                warn!(%error, "preview task failed");
                AppMsg::PreviewLoaded {
                    identity,
                    generation,
                    text: format!("Error: preview task failed: {error}"),
                }
            });

        Some(Box::new(msg) as Box<dyn Any + Send>)
    })
}

fn spawn_collection(plan: CollectionPlan, wrap: fn(Vec<Item>) -> AppMsg) -> Cmd {
    Box::pin(async move {
        let items = tokio::task::spawn_blocking(move || collect_items(&plan))
            .await
            .unwrap_or_else(|error| {
                warn!(%error, "item collection task failed");
                Vec::new()
            });

        Some(Box::new(wrap(items)) as Box<dyn Any + Send>)
    })
}
