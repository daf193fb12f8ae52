//! Frame composition.
//!
//! These are pure query methods: they read state and the viewports synced
//! by the last update and return the frame's rows. The primary column
//! stacks the summary and list panels; the right-hand side is either the
//! workspace (content, review, prompt) or a detail panel for the focused
//! summary or list.

use crate::tui::components::{Block, ListViewContext, Panel, render_list, wrap_text};
use crate::tui::focus::{FocusState, LayoutVariant, PanelId};
use crate::tui::input::{GLOBAL_HELP, format_help, short_help};
use crate::tui::layout::LayoutContext;
use crate::tui::state::{ListState, ReviewState};

use super::App;

const PROMPT_CURSOR: char = '▏';

/// Data for one list panel in the primary column.
struct ListPanel<'a> {
    title: &'a str,
    panel: PanelId,
    labels: &'a [String],
    descriptions: Option<&'a [String]>,
    state: &'a ListState,
    height: usize,
    empty_message: &'a str,
}

impl App {
    /// Renders every row of the current frame, footer included.
    pub(super) fn render_frame(&self) -> Vec<String> {
        let layout = self.layout();
        let body = match self.focus.behaviour().layout {
            LayoutVariant::MessageOverlay => self.render_message(&layout),
            LayoutVariant::Workspace => self.render_columns(&layout, self.render_workspace(&layout)),
            LayoutVariant::Detail(panel) => {
                let detail = self.render_detail(&layout, panel);
                self.render_columns(&layout, detail)
            }
        };

        let mut rows = body.into_lines();
        rows.push(self.render_footer());
        rows
    }

    /// Help line: spinner, global keys and the focused panel's keys.
    pub(super) fn render_footer(&self) -> String {
        let reviewing = self.queue.state() == ReviewState::Reviewing;
        format!(
            "{} {} | {}",
            self.spinner.view(reviewing),
            format_help(GLOBAL_HELP),
            format_help(short_help(self.input_context()))
        )
    }

    fn render_columns(&self, layout: &LayoutContext, secondary: Block) -> Block {
        let mut columns = Vec::with_capacity(2);
        if layout.show_primary {
            columns.push(self.render_primary_column(layout));
        }
        if layout.show_secondary() {
            columns.push(secondary);
        }
        Block::beside(columns)
    }

    fn render_primary_column(&self, layout: &LayoutContext) -> Block {
        let width = layout.primary_width;
        let item_labels = self.item_labels();
        let locators: Vec<String> = self
            .items
            .iter()
            .map(|item| item.locator().to_owned())
            .collect();
        let context_labels = self.context.labels();
        let source_labels: Vec<String> = self.sources.iter().map(|source| source.label()).collect();

        let usage = self.session.usage;
        let state_line = format!(
            "Tokens: {}/{}",
            usage.prompt_tokens, usage.completion_tokens
        );
        let config = &self.environment.config;
        let config_line = format!("{} {}", config.provider, config.model);

        Block::stack(vec![
            self.render_summary("State", PanelId::State, layout, state_line),
            self.render_list_panel(
                width,
                &ListPanel {
                    title: "Items",
                    panel: PanelId::ItemList,
                    labels: &item_labels,
                    descriptions: self.show_locators.then_some(locators.as_slice()),
                    state: &self.item_list,
                    height: layout.item_list_height,
                    empty_message: "No items",
                },
            ),
            self.render_list_panel(
                width,
                &ListPanel {
                    title: "Context",
                    panel: PanelId::Context,
                    labels: &context_labels,
                    descriptions: None,
                    state: &self.context_list,
                    height: layout.context_height,
                    empty_message: "No context",
                },
            ),
            self.render_list_panel(
                width,
                &ListPanel {
                    title: "Source list",
                    panel: PanelId::SourceList,
                    labels: &source_labels,
                    descriptions: None,
                    state: &self.source_list,
                    height: layout.source_height,
                    empty_message: "No sources",
                },
            ),
            self.render_summary("Config", PanelId::ConfigSummary, layout, config_line),
            self.render_summary(
                "Review progress",
                PanelId::ReviewQueue,
                layout,
                self.progress.render(width),
            ),
        ])
    }

    fn render_summary(
        &self,
        title: &str,
        panel: PanelId,
        layout: &LayoutContext,
        line: String,
    ) -> Block {
        Panel::new(title, layout.primary_width, layout.summary_height)
            .highlighted(self.is_highlighted(panel))
            .render(&[line])
    }

    fn render_list_panel(&self, width: usize, list: &ListPanel<'_>) -> Block {
        let focused = self.is_highlighted(list.panel);
        let rows = render_list(&ListViewContext {
            labels: list.labels,
            descriptions: list.descriptions,
            state: list.state,
            height: list.height,
            focused,
            empty_message: list.empty_message,
        });
        Panel::new(list.title, width, list.height)
            .highlighted(focused)
            .render(&rows)
    }

    fn render_workspace(&self, layout: &LayoutContext) -> Block {
        let height = layout.workspace_height;
        let mut panes = Vec::with_capacity(2);
        if layout.show_content {
            panes.push(
                Panel::new("Content", layout.content_width, height)
                    .highlighted(self.is_highlighted(PanelId::Content))
                    .render(self.content_view.visible(height)),
            );
        }
        if layout.show_review {
            panes.push(
                Panel::new("Review", layout.review_width, height)
                    .highlighted(self.is_highlighted(PanelId::Review))
                    .render(self.review_view.visible(height)),
            );
        }

        let prompt = Panel::new("Instant prompt", layout.secondary_width, layout.prompt_height)
            .highlighted(self.is_highlighted(PanelId::InstantPrompt))
            .render(&self.prompt_rows(layout.prompt_height));
        Block::stack(vec![Block::beside(panes), prompt])
    }

    fn prompt_rows(&self, height: usize) -> Vec<String> {
        let mut text = self.prompt.value().to_owned();
        if self.focus == FocusState::InstantPrompt {
            let byte_index = text
                .char_indices()
                .nth(self.prompt.cursor())
                .map_or(text.len(), |(index, _)| index);
            text.insert(byte_index, PROMPT_CURSOR);
        }
        let rows: Vec<String> = text.lines().map(str::to_owned).collect();
        let skip = rows.len().saturating_sub(height);
        rows.into_iter().skip(skip).collect()
    }

    fn render_detail(&self, layout: &LayoutContext, panel: PanelId) -> Block {
        let title = match panel {
            PanelId::StateDetail => "State detail",
            PanelId::ConfigDetail => "Config content",
            PanelId::ContextDetail => "Context detail",
            PanelId::SourceDetail => "Source detail",
            _ => "Review stack",
        };
        Panel::new(title, layout.secondary_width, layout.detail_height)
            .render(self.detail_view.visible(layout.detail_height))
    }

    fn render_message(&self, layout: &LayoutContext) -> Block {
        let rows = self
            .message
            .as_deref()
            .map(|text| wrap_text(text, layout.message_width))
            .unwrap_or_default();
        Panel::new("Message", layout.message_width, layout.detail_height)
            .highlighted(true)
            .render(&rows)
    }

    fn is_highlighted(&self, panel: PanelId) -> bool {
        self.focus.behaviour().highlight == panel
    }
}
