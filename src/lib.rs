//! lazyreview library crate: a terminal workspace for AI code review.
//!
//! Items are collected from a directory walk, a collector command, or named
//! sources. Each item can be previewed, queued for review by a
//! chat-completions provider, and combined with other items as context.
//! Reviews and session state are persisted as JSON between runs.

pub mod ai;
pub mod config;
pub mod error;
pub mod items;
pub mod logging;
pub mod persistence;
pub mod process;
pub mod telemetry;
pub mod tui;

pub use ai::{OpenAiReviewConfig, OpenAiReviewService, ReviewService};
pub use config::{LazyReviewConfig, SourceConfig};
pub use error::LazyReviewError;
pub use items::{Item, ItemIdentity};
