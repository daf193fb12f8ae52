//! CLI operation mode handlers.
//!
//! - [`review_tui`]: load startup data and run the review workspace

pub mod review_tui;
