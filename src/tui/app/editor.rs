//! Opener sessions for reviews, the instant prompt and context entries.
//!
//! Text is written to a scratch file and the configured opener runs on it in
//! the foreground. Editable targets are read back once the opener exits and
//! re-enter the loop as the matching update message; any failure arrives as
//! [`AppMsg::EditorClosed`] carrying the error.

use std::any::Any;

use bubbletea_rs::Cmd;
use camino::{Utf8Path, Utf8PathBuf};

use super::App;
use crate::config::SourceConfig;
use crate::error::LazyReviewError;
use crate::items::{Item, ItemIdentity, Previewer, preview_item};
use crate::persistence::{read_scratch_file, write_scratch_file};
use crate::process::CommandLine;
use crate::tui::messages::AppMsg;

/// What the opener session edits and where its result goes.
#[derive(Debug, Clone, PartialEq, Eq)]
enum EditorTarget {
    /// Read-only view of a stored review.
    Review,
    /// The instant prompt text.
    Prompt,
    /// The edited text of a context entry.
    Context(ItemIdentity),
}

/// Initial scratch file contents.
#[derive(Debug, Clone)]
enum ScratchText {
    Ready(String),
    /// Preview not cached yet; resolved on the blocking pool.
    Preview {
        item: Item,
        sources: Vec<SourceConfig>,
        previewer: Previewer,
    },
}

impl ScratchText {
    fn resolve(self) -> String {
        match self {
            Self::Ready(text) => text,
            Self::Preview {
                item,
                sources,
                previewer,
            } => preview_item(&item, &sources, &previewer),
        }
    }
}

/// One opener run against a scratch file.
#[derive(Debug, Clone)]
struct EditorSession {
    opener: CommandLine,
    path: Utf8PathBuf,
    text: ScratchText,
    target: EditorTarget,
}

impl EditorSession {
    fn run(self) -> AppMsg {
        match self.edit() {
            Ok(msg) => msg,
            Err(error) => AppMsg::EditorClosed {
                error: Some(error.to_string()),
            },
        }
    }

    fn edit(self) -> Result<AppMsg, LazyReviewError> {
        write_scratch_file(&self.path, &self.text.resolve())?;
        self.opener.run_in_foreground(self.path.as_str())?;
        match self.target {
            EditorTarget::Review => Ok(AppMsg::EditorClosed { error: None }),
            EditorTarget::Prompt => Ok(AppMsg::SetPromptText(read_back(&self.path)?)),
            EditorTarget::Context(identity) => Ok(AppMsg::ContextEdited {
                identity,
                text: read_back(&self.path)?,
            }),
        }
    }
}

fn read_back(path: &Utf8Path) -> Result<String, LazyReviewError> {
    Ok(read_scratch_file(path)?)
}

impl App {
    /// Opens the selected item's review in the opener.
    ///
    /// Items without a stored review are ignored.
    pub(super) fn handle_open_review(&mut self) -> Option<Cmd> {
        let identity = self.selected_item()?.identity().clone();
        let text = ScratchText::Ready(self.store.get(&identity)?.text.clone());
        let path = self.environment.tmp_review_path.clone();
        self.start_editor(path, text, EditorTarget::Review)
    }

    /// Opens the instant prompt in the opener.
    pub(super) fn handle_edit_prompt(&mut self) -> Option<Cmd> {
        let text = ScratchText::Ready(self.prompt.value().to_owned());
        let path = self.environment.tmp_prompt_path.clone();
        self.start_editor(path, text, EditorTarget::Prompt)
    }

    /// Opens the selected context entry's effective text in the opener.
    pub(super) fn handle_edit_context(&mut self) -> Option<Cmd> {
        let identity = self.selected_context_identity()?;
        let entry = self
            .context
            .entries()
            .iter()
            .find(|entry| entry.item().identity() == &identity)?;
        let text = match self.cached_preview(&identity) {
            Some(preview) => ScratchText::Ready(entry.effective_text(|_| preview.to_owned())),
            None if entry.is_edited() => {
                ScratchText::Ready(entry.effective_text(|_| String::new()))
            }
            None => ScratchText::Preview {
                item: entry.item().clone(),
                sources: self.sources.clone(),
                previewer: self.environment.previewer.clone(),
            },
        };
        let path = self.environment.tmp_prompt_path.clone();
        self.start_editor(path, text, EditorTarget::Context(identity))
    }

    fn start_editor(
        &mut self,
        path: Utf8PathBuf,
        text: ScratchText,
        target: EditorTarget,
    ) -> Option<Cmd> {
        let Some(opener) = self
            .environment
            .config
            .opener
            .as_deref()
            .and_then(CommandLine::parse)
        else {
            self.show_error("err", "opener is not configured");
            return None;
        };

        let session = EditorSession {
            opener,
            path,
            text,
            target,
        };
        Some(spawn_editor_session(session))
    }
}

fn spawn_editor_session(session: EditorSession) -> Cmd {
    Box::pin(async move {
        let msg = tokio::task::spawn_blocking(move || session.run())
            .await
            .unwrap_or_else(|error| AppMsg::EditorClosed {
                error: Some(format!("editor task failed: {error}")),
            });

        Some(Box::new(msg) as Box<dyn Any + Send>)
    })
}
