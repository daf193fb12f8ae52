//! State owned by the event loop: list cursors, the context set, the review
//! queue, stored reviews and the instant prompt.

mod context_set;
mod list_state;
mod prompt_input;
mod review_queue;
mod review_store;

pub use context_set::{ContextEntry, ContextSet};
pub use list_state::{FilterMode, ListState};
pub use prompt_input::PromptInput;
pub use review_queue::{ReviewQueue, ReviewState};
pub use review_store::{NO_REVIEW_TEXT, ReviewStore};
