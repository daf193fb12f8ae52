//! Rendering building blocks for the review workspace.
//!
//! Components are plain values drawn into lines of text. They hold no
//! application state beyond what they need to draw, such as a scroll offset
//! or animation frame, and know nothing about messages or focus.

pub mod code_highlight;
pub mod list_view;
pub mod panel;
pub mod progress_bar;
pub mod spinner;
pub mod text_fit;
pub mod text_wrap;
pub mod viewport;

pub use code_highlight::CodeHighlighter;
pub use list_view::{ListViewContext, render_list};
pub use panel::{Block, Panel};
pub use progress_bar::ProgressBar;
pub use spinner::Spinner;
pub use text_fit::{display_width, fit_line};
pub use text_wrap::wrap_text;
pub use viewport::ScrollViewport;
