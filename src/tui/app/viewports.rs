//! Synchronisation of the scrollable panels after every message.
//!
//! The content, review and detail viewports cache rendered lines. They are
//! rebuilt from core state here and scroll back to the top whenever the
//! thing they show changes. Item previews come from the preview cache; a
//! placeholder stands in while a load is in flight.

use bubbletea_rs::Cmd;

use crate::items::ItemIdentity;
use crate::tui::components::wrap_text;
use crate::tui::focus::{LayoutVariant, PanelId};
use crate::tui::state::NO_REVIEW_TEXT;

use super::routing::join_cmds;
use super::{App, ContentCache};

const LOADING_PREVIEW_TEXT: &str = "Loading preview...";
const NO_CONTEXT_TEXT: &str = "No context selected";
const NO_SOURCE_TEXT: &str = "No source selected";
const NO_PENDING_TEXT: &str = "No pending reviews";

/// What the detail panel currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct DetailKey {
    panel: PanelId,
    selection: Option<ItemIdentity>,
    index: Option<usize>,
    edited: bool,
}

impl App {
    /// Rebuilds viewport contents for the current state and layout.
    ///
    /// Returns the preview loads the visible panels are waiting on.
    pub(super) fn sync_viewports(&mut self) -> Option<Cmd> {
        let content = self.sync_content_view();
        self.sync_review_view();
        let detail = self.sync_detail_view();
        join_cmds(content.into_iter().chain(detail).collect())
    }

    fn sync_content_view(&mut self) -> Option<Cmd> {
        let layout = self.layout();
        let width = layout.content_width;
        let Some(item) = self.selected_item().cloned() else {
            self.content_cache = None;
            self.content_view.reset(Vec::new());
            return None;
        };
        let load = self.request_preview(&item);
        let loaded = self.cached_preview(item.identity()).is_some();

        let changed_item = self
            .content_cache
            .as_ref()
            .is_none_or(|cache| cache.identity != *item.identity());
        let unchanged = self
            .content_cache
            .as_ref()
            .is_some_and(|cache| cache.width == width && cache.loaded == loaded);
        if !changed_item && unchanged {
            return load;
        }

        let lines = self.cached_preview(item.identity()).map_or_else(
            || wrap_text(LOADING_PREVIEW_TEXT, width),
            |preview| {
                self.highlighter
                    .highlight_or_plain(preview, item.locator(), width)
            },
        );
        if changed_item {
            self.content_view.reset(lines);
        } else {
            self.content_view.set_lines(lines, layout.workspace_height);
        }
        self.content_cache = Some(ContentCache {
            identity: item.identity().clone(),
            width,
            loaded,
        });
        load
    }

    pub(super) fn sync_review_view(&mut self) {
        let layout = self.layout();
        let identity = self.selected_item().map(|item| item.identity().clone());
        let text = identity
            .as_ref()
            .map_or(NO_REVIEW_TEXT, |identity| self.store.text_for(identity));
        let lines = wrap_text(text, layout.review_width);

        if identity == self.review_identity {
            self.review_view.set_lines(lines, layout.workspace_height);
        } else {
            self.review_view.reset(lines);
            self.review_identity = identity;
        }
    }

    fn sync_detail_view(&mut self) -> Option<Cmd> {
        let LayoutVariant::Detail(panel) = self.focus.behaviour().layout else {
            return None;
        };
        let layout = self.layout();
        let key = self.detail_key_for(panel);
        let load = if panel == PanelId::ContextDetail {
            self.request_context_preview()
        } else {
            None
        };

        let lines = self
            .detail_text(panel)
            .lines()
            .flat_map(|line| wrap_text(line, layout.secondary_width))
            .collect();
        if self.detail_key.as_ref() == Some(&key) {
            self.detail_view.set_lines(lines, layout.detail_height);
        } else {
            self.detail_view.reset(lines);
            self.detail_key = Some(key);
        }
        load
    }

    /// Loads the selected context entry's preview when its text is needed.
    fn request_context_preview(&mut self) -> Option<Cmd> {
        let item = self
            .context_list
            .selected()
            .and_then(|index| self.context.get(index))
            .filter(|entry| !entry.is_edited())
            .map(|entry| entry.item().clone())?;
        self.request_preview(&item)
    }

    fn detail_key_for(&self, panel: PanelId) -> DetailKey {
        let (selection, index, edited) = match panel {
            PanelId::ContextDetail => {
                let entry = self
                    .context_list
                    .selected()
                    .and_then(|index| self.context.get(index));
                (
                    entry.map(|entry| entry.item().identity().clone()),
                    None,
                    entry.is_some_and(|entry| entry.is_edited()),
                )
            }
            PanelId::SourceDetail => (None, self.source_list.selected(), false),
            _ => (None, None, false),
        };
        DetailKey {
            panel,
            selection,
            index,
            edited,
        }
    }

    /// Full text of a detail panel.
    pub(super) fn detail_text(&self, panel: PanelId) -> String {
        match panel {
            PanelId::StateDetail => self.state_detail_text(),
            PanelId::ConfigDetail => self.environment.config.summary_lines().join("\n"),
            PanelId::ContextDetail => self.context_detail_text(),
            PanelId::SourceDetail => self.source_detail_text(),
            PanelId::ReviewStack => self.review_stack_text(),
            _ => String::new(),
        }
    }

    fn state_detail_text(&self) -> String {
        let usage = self.session.usage;
        let tokens = format!(
            "Used tokens:\n  Input: {}\n  Output: {}",
            usage.prompt_tokens, usage.completion_tokens
        );
        let rates = self.environment.config.cost_rates();
        if rates.is_zero() {
            return tokens;
        }
        let cost = rates.estimate(usage.prompt_tokens, usage.completion_tokens);
        format!("{tokens}\nCost: ${cost:.6}")
    }

    fn context_detail_text(&self) -> String {
        self.context_list
            .selected()
            .and_then(|index| self.context.get(index))
            .map_or_else(
                || NO_CONTEXT_TEXT.to_owned(),
                |entry| {
                    entry.effective_text(|item| {
                        self.cached_preview(item.identity())
                            .unwrap_or(LOADING_PREVIEW_TEXT)
                            .to_owned()
                    })
                },
            )
    }

    fn source_detail_text(&self) -> String {
        let Some(source) = self
            .source_list
            .selected()
            .and_then(|index| self.sources.get(index))
        else {
            return NO_SOURCE_TEXT.to_owned();
        };
        let show = |value: Option<&str>| value.unwrap_or_default().to_owned();
        [
            format!("name={}", source.name),
            format!("enabled={}", source.enabled),
            format!("collector={}", show(source.collector.as_deref())),
            format!("previewer={}", show(source.previewer.as_deref())),
            format!("prompt={}", show(source.prompt.as_deref())),
        ]
        .join("\n")
    }

    fn review_stack_text(&self) -> String {
        if self.queue.is_empty() {
            return NO_PENDING_TEXT.to_owned();
        }
        self.queue
            .pending()
            .iter()
            .map(|identity| {
                self.items
                    .iter()
                    .find(|item| item.identity() == identity)
                    .map_or_else(|| identity.to_string(), |item| item.locator().to_owned())
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
