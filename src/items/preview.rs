//! Item previewers: file reads and external commands.
//!
//! Previewing never fails; problems are reported inside the returned text so
//! the content panel always has something to show.

use camino::Utf8Path;
use tracing::warn;

use crate::config::SourceConfig;
use crate::persistence::read_bytes;
use crate::process::CommandLine;

use super::Item;

/// Text shown for items whose bytes are not UTF-8 text.
pub const NOT_TEXT_MARKER: &str = "This item is not text";

const SNIFF_LEN: usize = 512;

/// How an item's content is produced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Previewer {
    /// Read the locator as a file path.
    #[default]
    File,
    /// Run a command with the locator appended as the last argument.
    Command(CommandLine),
}

impl Previewer {
    /// Builds a previewer from an optional configured command line.
    #[must_use]
    pub fn from_command(command: Option<&str>) -> Self {
        command
            .and_then(CommandLine::parse)
            .map_or(Self::File, Self::Command)
    }

    /// Chooses the previewer for `item`: its source's previewer when the
    /// source defines one, otherwise `fallback`.
    #[must_use]
    pub fn for_item(item: &Item, sources: &[SourceConfig], fallback: &Self) -> Self {
        if item.source_name().is_empty() {
            return fallback.clone();
        }

        sources
            .iter()
            .find(|source| source.name == item.source_name())
            .and_then(|source| source.previewer.as_deref())
            .and_then(CommandLine::parse)
            .map_or_else(|| fallback.clone(), Self::Command)
    }

    /// Produces the preview text for a locator.
    #[must_use]
    pub fn preview(&self, locator: &str) -> String {
        if locator.is_empty() {
            return "Error: No param".to_owned();
        }

        match self {
            Self::File => preview_file(locator),
            Self::Command(command) => preview_command(command, locator),
        }
    }
}

/// Produces the preview for `item` using the previewer its source selects.
#[must_use]
pub fn preview_item(item: &Item, sources: &[SourceConfig], fallback: &Previewer) -> String {
    Previewer::for_item(item, sources, fallback).preview(item.locator())
}

fn preview_file(locator: &str) -> String {
    let bytes = match read_bytes(Utf8Path::new(locator)) {
        Ok(bytes) => bytes,
        Err(error) => {
            warn!(locator, %error, "preview read failed");
            return format!("Error: {error}");
        }
    };

    let sniffed = bytes.get(..SNIFF_LEN).unwrap_or(&bytes);
    if sniffed.contains(&0) {
        return NOT_TEXT_MARKER.to_owned();
    }

    String::from_utf8(bytes).unwrap_or_else(|_| NOT_TEXT_MARKER.to_owned())
}

fn preview_command(command: &CommandLine, locator: &str) -> String {
    match command.capture(Some(locator)) {
        Ok(output) if output.stderr.is_empty() => output.stdout,
        Ok(output) => format!("{}\n{}", output.stdout, output.stderr),
        Err(error) => {
            warn!(locator, %error, "previewer failed");
            format!("Error: {error}")
        }
    }
}
