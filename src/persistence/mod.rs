//! Local JSON persistence for reviews and session state.
//!
//! Reviews and session state are small JSON documents that are read once at
//! startup and fully rewritten on every change. Scratch files carry text to
//! and from external editors.

mod error;
mod files;
mod reviews;
mod scratch;
mod session;

pub use error::PersistenceError;
pub(crate) use files::{read_bytes, read_required};
pub use reviews::{ReviewRecord, ReviewStatus, load_reviews, save_reviews};
pub use scratch::{read_scratch_file, write_scratch_file};
pub use session::{SessionState, Usage, load_session_state, save_session_state};
