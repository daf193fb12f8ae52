//! Named item sources loaded from a TOML file.
//!
//! ```toml
//! [[sources]]
//! name = "changed"
//! collector = "git diff --name-only"
//! previewer = "git diff"
//! prompt = "Review only the changed lines."
//! enabled = true
//! ```

use std::collections::HashSet;

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

use crate::error::LazyReviewError;

/// A named bundle of collector, previewer and prompt.
///
/// `enabled` is the only field changed at runtime and is never written back.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Unique display name; also part of every collected item's identity.
    pub name: String,
    /// Command whose stdout lines are the source's item locators.
    pub collector: Option<String>,
    /// Command run with the locator appended to preview an item.
    pub previewer: Option<String>,
    /// System prompt used for the source's items.
    pub prompt: Option<String>,
    /// Whether the source contributes items.
    pub enabled: bool,
}

impl SourceConfig {
    /// Label shown in the source list.
    #[must_use]
    pub fn label(&self) -> String {
        let mark = if self.enabled { "☑" } else { "☐" };
        format!("{mark} {}", self.name)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SourcesFile {
    sources: Vec<SourceConfig>,
}

/// Parses TOML text holding `[[sources]]` tables.
///
/// # Errors
///
/// Returns [`LazyReviewError::Configuration`] when the text is not valid
/// TOML, a source has a blank name, or two sources share a name.
pub fn parse_sources(text: &str) -> Result<Vec<SourceConfig>, LazyReviewError> {
    let file: SourcesFile = toml::from_str(text).map_err(|error| LazyReviewError::Configuration {
        message: format!("invalid sources file: {error}"),
    })?;

    let mut seen = HashSet::new();
    for source in &file.sources {
        if source.name.trim().is_empty() {
            return Err(LazyReviewError::Configuration {
                message: "every source needs a name".to_owned(),
            });
        }
        if !seen.insert(source.name.as_str()) {
            return Err(LazyReviewError::Configuration {
                message: format!("duplicate source name '{}'", source.name),
            });
        }
    }

    Ok(file.sources)
}

/// Reads and parses a sources file.
///
/// # Errors
///
/// Returns [`LazyReviewError::Configuration`] when the file cannot be read
/// or fails [`parse_sources`].
pub fn load_sources(path: &Utf8Path) -> Result<Vec<SourceConfig>, LazyReviewError> {
    let text = crate::persistence::read_required(path).map_err(|error| {
        LazyReviewError::Configuration {
            message: format!("failed to load sources: {error}"),
        }
    })?;
    parse_sources(&text)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn parses_sources_with_defaults() -> Result<(), LazyReviewError> {
        let sources = parse_sources(
            r#"
            [[sources]]
            name = "changed"
            collector = "git diff --name-only"
            enabled = true

            [[sources]]
            name = "docs"
            collector = "find docs -name *.md"
            previewer = "glow"
            "#,
        )?;

        assert_eq!(sources.len(), 2);
        assert_eq!(sources.first().map(|s| s.enabled), Some(true));
        assert_eq!(sources.get(1).map(|s| s.enabled), Some(false));
        assert_eq!(
            sources.get(1).and_then(|s| s.previewer.as_deref()),
            Some("glow")
        );
        Ok(())
    }

    #[rstest]
    fn empty_file_has_no_sources() -> Result<(), LazyReviewError> {
        assert!(parse_sources("")?.is_empty());
        Ok(())
    }

    #[rstest]
    #[case::duplicate("[[sources]]\nname = \"a\"\n[[sources]]\nname = \"a\"\n")]
    #[case::blank_name("[[sources]]\nname = \"\"\n")]
    #[case::invalid_toml("[[sources]\n")]
    fn rejects_invalid_files(#[case] text: &str) {
        assert!(matches!(
            parse_sources(text),
            Err(LazyReviewError::Configuration { .. })
        ));
    }

    #[rstest]
    #[case::enabled(true, "☑ lint")]
    #[case::disabled(false, "☐ lint")]
    fn label_reflects_enabled_flag(#[case] enabled: bool, #[case] expected: &str) {
        let source = SourceConfig {
            name: "lint".to_owned(),
            enabled,
            ..SourceConfig::default()
        };

        assert_eq!(source.label(), expected);
    }
}
