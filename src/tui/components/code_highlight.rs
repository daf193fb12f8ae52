//! Syntax highlighting for the content preview using syntect.
//!
//! Highlighting falls back to plain wrapped text whenever the locator has no
//! known syntax or syntect fails. Lines are wrapped before highlighting so
//! escape codes never need to be measured.

use std::path::Path;

use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;
use thiserror::Error;

use super::text_wrap::hard_wrap;

const THEME_NAME: &str = "base16-ocean.dark";

/// Errors that can occur during syntax highlighting.
#[derive(Debug, Error)]
pub enum HighlightError {
    /// No syntax definition matches the locator's extension.
    #[error("no syntax found for extension: {extension}")]
    NoSyntaxFound {
        /// The unmatched extension.
        extension: String,
    },
    /// Syntect failed while highlighting.
    #[error("highlighting failed: {message}")]
    HighlightFailed {
        /// Description of the failure.
        message: String,
    },
}

/// Highlighter holding syntect's default syntaxes and themes.
#[derive(Debug)]
pub struct CodeHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl Default for CodeHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeHighlighter {
    /// Loads the default syntax and theme sets.
    #[must_use]
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    /// Highlights `text`, falling back to plain wrapped lines.
    #[must_use]
    pub fn highlight_or_plain(&self, text: &str, locator: &str, max_width: usize) -> Vec<String> {
        self.highlight(text, locator, max_width)
            .unwrap_or_else(|_| wrap_plain(text, max_width))
    }

    /// Highlights `text` using the syntax chosen by the locator's extension.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightError::NoSyntaxFound`] for unknown extensions and
    /// [`HighlightError::HighlightFailed`] when syntect reports an error.
    pub fn highlight(
        &self,
        text: &str,
        locator: &str,
        max_width: usize,
    ) -> Result<Vec<String>, HighlightError> {
        let extension = Path::new(locator)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        let syntax = self
            .syntax_set
            .find_syntax_by_extension(extension)
            .ok_or_else(|| HighlightError::NoSyntaxFound {
                extension: extension.to_owned(),
            })?;

        let theme = self
            .theme_set
            .themes
            .get(THEME_NAME)
            .or_else(|| self.theme_set.themes.values().next())
            .ok_or_else(|| HighlightError::HighlightFailed {
                message: "no theme available".to_owned(),
            })?;

        let mut highlighter = HighlightLines::new(syntax, theme);
        wrap_plain(text, max_width)
            .iter()
            .map(|line| {
                let ranges = highlighter
                    .highlight_line(line, &self.syntax_set)
                    .map_err(|error| HighlightError::HighlightFailed {
                        message: error.to_string(),
                    })?;
                Ok::<_, HighlightError>(format!(
                    "{}\x1b[0m",
                    as_24_bit_terminal_escaped(&ranges, false)
                ))
            })
            .collect()
    }
}

/// Hard-wraps every line of `text` to `max_width` columns.
#[must_use]
pub fn wrap_plain(text: &str, max_width: usize) -> Vec<String> {
    text.lines()
        .flat_map(|line| hard_wrap(line, max_width))
        .collect()
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::tui::components::text_fit::display_width;

    #[fixture]
    fn highlighter() -> CodeHighlighter {
        CodeHighlighter::new()
    }

    #[rstest]
    fn rust_source_is_coloured(highlighter: CodeHighlighter) {
        let lines = highlighter.highlight_or_plain("fn main() {}\n", "src/main.rs", 80);

        assert_eq!(lines.len(), 1);
        assert!(lines.first().is_some_and(|line| line.contains('\x1b')));
    }

    #[rstest]
    fn unknown_extension_falls_back_to_plain(highlighter: CodeHighlighter) {
        let lines = highlighter.highlight_or_plain("plain words", "notes.zzz-unknown", 80);

        assert_eq!(lines, vec!["plain words"]);
    }

    #[rstest]
    fn unknown_extension_is_reported(highlighter: CodeHighlighter) {
        let result = highlighter.highlight("x", "file.zzz-unknown", 80);

        assert!(matches!(result, Err(HighlightError::NoSyntaxFound { .. })));
    }

    #[rstest]
    fn highlighted_lines_respect_width(highlighter: CodeHighlighter) {
        let source = format!("let value = \"{}\";", "x".repeat(60));

        let lines = highlighter.highlight_or_plain(&source, "lib.rs", 20);

        assert!(lines.len() > 1);
        assert!(lines.iter().all(|line| display_width(line) <= 20));
    }
}
