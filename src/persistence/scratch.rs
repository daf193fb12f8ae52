//! Scratch files handed to external editors and openers.

use camino::Utf8Path;

use super::PersistenceError;
use super::files::{read_required, write_with_parents};

/// Writes `content` to a scratch file, creating parent directories.
///
/// # Errors
///
/// Returns [`PersistenceError::WriteFailed`] when the file cannot be written.
pub fn write_scratch_file(path: &Utf8Path, content: &str) -> Result<(), PersistenceError> {
    write_with_parents(path, content)
}

/// Reads a scratch file back with trailing newlines removed.
///
/// Editors usually append a final newline on save; it is not part of the
/// text the user meant to keep.
///
/// # Errors
///
/// Returns [`PersistenceError::ReadFailed`] when the file is missing or
/// unreadable.
pub fn read_scratch_file(path: &Utf8Path) -> Result<String, PersistenceError> {
    let content = read_required(path)?;
    Ok(content.trim_end_matches(['\n', '\r']).to_owned())
}

#[cfg(test)]
mod tests {
    use camino::Utf8PathBuf;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    fn scratch_round_trip_trims_trailing_newlines() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let root = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf())
            .map_err(|_| "temp directory path must be UTF-8")?;
        let path = root.join("cache").join("tmp_prompt.md");

        write_scratch_file(&path, "review this\nline two\n\n")?;

        assert_eq!(read_scratch_file(&path)?, "review this\nline two");
        Ok(())
    }

    #[rstest]
    fn reading_missing_scratch_file_fails() -> Result<(), Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let root = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf())
            .map_err(|_| "temp directory path must be UTF-8")?;

        let result = read_scratch_file(&root.join("absent.md"));

        assert!(matches!(result, Err(PersistenceError::ReadFailed { .. })));
        Ok(())
    }
}
