//! XDG base-directory resolution for default file locations.

use camino::Utf8PathBuf;

use crate::error::LazyReviewError;

/// XDG base directory kinds used by lazyreview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XdgBase {
    /// `$XDG_STATE_HOME`, falling back to `~/.local/state`.
    State,
    /// `$XDG_CACHE_HOME`, falling back to `~/.cache`.
    Cache,
}

impl XdgBase {
    /// Environment variable naming this base directory.
    #[must_use]
    pub const fn variable(self) -> &'static str {
        match self {
            Self::State => "XDG_STATE_HOME",
            Self::Cache => "XDG_CACHE_HOME",
        }
    }

    const fn home_fallback(self) -> &'static [&'static str] {
        match self {
            Self::State => &[".local", "state"],
            Self::Cache => &[".cache"],
        }
    }
}

/// Resolves `<base>/<app_dir>/<file_name>` from optional environment values.
///
/// Takes the environment values as arguments so callers and tests do not
/// need to mutate the process environment.
///
/// # Errors
///
/// Returns [`LazyReviewError::Configuration`] when neither the XDG variable
/// nor `HOME` is available.
pub fn resolve_xdg_path(
    base: XdgBase,
    xdg_value: Option<&str>,
    home: Option<&str>,
    app_dir: &str,
    file_name: &str,
) -> Result<Utf8PathBuf, LazyReviewError> {
    if let Some(root) = xdg_value {
        return Ok(Utf8PathBuf::from(root).join(app_dir).join(file_name));
    }

    if let Some(home_dir) = home {
        let mut path = Utf8PathBuf::from(home_dir);
        for segment in base.home_fallback() {
            path.push(segment);
        }
        return Ok(path.join(app_dir).join(file_name));
    }

    Err(LazyReviewError::Configuration {
        message: format!(
            "unable to resolve default path for {file_name}: neither {} nor HOME is set",
            base.variable()
        ),
    })
}
