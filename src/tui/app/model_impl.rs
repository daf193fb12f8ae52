//! `Model` trait implementation for the review workspace.
//!
//! Handles initialisation from startup storage, update dispatch for app,
//! key and resize messages, and frame normalisation.

use std::any::Any;

use bubbletea_rs::{Cmd, Model};

use super::{App, AppEnvironment};
use crate::tui::components::fit_line;
use crate::tui::get_startup_context;
use crate::tui::input::map_key_to_message;
use crate::tui::messages::AppMsg;

impl Model for App {
    fn init() -> (Self, Option<Cmd>) {
        let model = get_startup_context().map_or_else(
            || {
                Self::new(
                    AppEnvironment::default(),
                    Vec::new(),
                    Vec::new(),
                    Vec::new(),
                    crate::persistence::SessionState::default(),
                )
            },
            |context| {
                let app = Self::new(
                    context.environment,
                    context.items,
                    context.sources,
                    context.reviews,
                    context.session,
                );
                match context.review_service {
                    Some(service) => app.with_review_service(service),
                    None => app,
                }
            },
        );

        // The first frame is drawn once `AppMsg::Initialized` round-trips.
        (model, Some(Self::immediate_init_cmd()))
    }

    fn update(&mut self, msg: Box<dyn Any + Send>) -> Option<Cmd> {
        if let Some(app_msg) = msg.downcast_ref::<AppMsg>() {
            return self.handle_message(app_msg);
        }

        if let Some(key_msg) = msg.downcast_ref::<bubbletea_rs::event::KeyMsg>() {
            let mapped = map_key_to_message(key_msg, self.input_context());
            return mapped.and_then(|app_msg| self.handle_message(&app_msg));
        }

        if let Some(size_msg) = msg.downcast_ref::<bubbletea_rs::event::WindowSizeMsg>() {
            return self.handle_message(&AppMsg::WindowResized {
                width: size_msg.width,
                height: size_msg.height,
            });
        }

        None
    }

    fn view(&self) -> String {
        self.normalise_viewport(&self.render_frame())
    }
}

impl App {
    /// Command that delivers [`AppMsg::Initialized`] immediately.
    fn immediate_init_cmd() -> Cmd {
        Box::pin(async { Some(Box::new(AppMsg::Initialized) as Box<dyn Any + Send>) })
    }

    /// Normalises the frame to the terminal size.
    ///
    /// Rows are clamped to one column less than the terminal width so the
    /// last column never triggers autowrap, and padded so stale cells from
    /// a wider previous frame are cleared.
    fn normalise_viewport(&self, rows: &[String]) -> String {
        let width = usize::from(self.width.max(1));
        let safe_width = width.saturating_sub(1).max(1);
        let height = usize::from(self.height.max(1));

        let mut lines: Vec<String> = rows
            .iter()
            .take(height)
            .map(|row| fit_line(row, safe_width))
            .collect();
        let blank = " ".repeat(safe_width);
        let missing = height.saturating_sub(lines.len());
        lines.extend(std::iter::repeat_with(|| blank.clone()).take(missing));

        let mut normalised = lines.join("\n");
        normalised.push('\n');
        normalised
    }
}
