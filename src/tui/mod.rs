//! Terminal user interface for the review workspace.
//!
//! The TUI follows the Model-View-Update pattern of bubbletea-rs:
//!
//! - **Model**: all session state in [`app::App`]
//! - **View**: frame composition from [`components`] and [`layout`]
//! - **Update**: key presses mapped by [`input`] into [`messages::AppMsg`],
//!   dispatched to handlers that may issue deferred commands
//!
//! # Modules
//!
//! - [`app`]: application model and handlers
//! - [`components`]: panels, lists, viewports and text helpers
//! - [`focus`]: focus and zoom state machine
//! - [`input`]: per-panel keymaps and help text
//! - [`layout`]: per-frame panel sizes
//! - [`messages`]: message types for the update loop
//! - [`state`]: lists, context set, review queue and store, instant prompt
//!
//! # Startup data
//!
//! `Model::init()` is static, so data loaded by the CLI is handed over
//! through module-level storage: call [`set_startup_context`] (and
//! optionally [`set_initial_terminal_size`] and [`set_telemetry_sink`])
//! before starting the program.

pub mod app;
pub mod components;
pub mod focus;
pub mod input;
pub mod layout;
pub mod messages;
pub mod state;

mod storage;

pub use app::{App, AppEnvironment};
pub(crate) use storage::{get_initial_terminal_size, get_startup_context, record_telemetry};
pub use storage::{
    StartupContext, set_initial_terminal_size, set_startup_context, set_telemetry_sink,
};

#[cfg(test)]
mod tests;
