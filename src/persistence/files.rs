//! Capability-scoped file helpers shared by the persistence modules.
//!
//! Every path is split into a parent directory opened through `cap_std`
//! and a bare file name, so reads and writes never escape the directory the
//! caller named.

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;

use super::PersistenceError;

/// Reads a file, returning `None` when it does not exist.
pub(crate) fn read_optional(path: &Utf8Path) -> Result<Option<String>, PersistenceError> {
    let file_name = file_name_of(path)?;
    let parent = parent_of(path);

    let dir = match Dir::open_ambient_dir(parent, ambient_authority()) {
        Ok(dir) => dir,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(error) => return Err(read_failed(path, &error)),
    };

    match dir.read_to_string(file_name) {
        Ok(content) => Ok(Some(content)),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(read_failed(path, &error)),
    }
}

/// Reads raw bytes from a file that must exist.
pub(crate) fn read_bytes(path: &Utf8Path) -> Result<Vec<u8>, PersistenceError> {
    let file_name = file_name_of(path)?;
    let dir = Dir::open_ambient_dir(parent_of(path), ambient_authority())
        .map_err(|error| read_failed(path, &error))?;
    dir.read(file_name).map_err(|error| read_failed(path, &error))
}

/// Reads a file that must exist.
pub(crate) fn read_required(path: &Utf8Path) -> Result<String, PersistenceError> {
    read_optional(path)?.ok_or_else(|| PersistenceError::ReadFailed {
        path: path.to_string(),
        message: "file does not exist".to_owned(),
    })
}

/// Replaces the file contents, creating parent directories first.
pub(crate) fn write_with_parents(path: &Utf8Path, content: &str) -> Result<(), PersistenceError> {
    let file_name = file_name_of(path)?;
    let dir = open_or_create_parent(path)?;

    dir.write(file_name, content)
        .map_err(|error| write_failed(path, &error))
}

fn open_or_create_parent(path: &Utf8Path) -> Result<Dir, PersistenceError> {
    let parent = parent_of(path);

    let (root, relative) = if parent.is_absolute() {
        let relative = parent
            .strip_prefix("/")
            .map_err(|_| PersistenceError::InvalidPath {
                path: path.to_string(),
            })?;
        (
            Dir::open_ambient_dir("/", ambient_authority())
                .map_err(|error| write_failed(path, &error))?,
            relative,
        )
    } else {
        (
            Dir::open_ambient_dir(".", ambient_authority())
                .map_err(|error| write_failed(path, &error))?,
            parent,
        )
    };

    if relative.as_str().is_empty() || relative == Utf8Path::new(".") {
        return Ok(root);
    }

    root.create_dir_all(relative)
        .map_err(|error| write_failed(path, &error))?;
    root.open_dir(relative)
        .map_err(|error| write_failed(path, &error))
}

fn parent_of(path: &Utf8Path) -> &Utf8Path {
    path.parent()
        .filter(|parent| !parent.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."))
}

fn file_name_of(path: &Utf8Path) -> Result<&str, PersistenceError> {
    path.file_name().ok_or_else(|| PersistenceError::InvalidPath {
        path: path.to_string(),
    })
}

fn read_failed(path: &Utf8Path, error: &std::io::Error) -> PersistenceError {
    PersistenceError::ReadFailed {
        path: path.to_string(),
        message: error.to_string(),
    }
}

fn write_failed(path: &Utf8Path, error: &std::io::Error) -> PersistenceError {
    PersistenceError::WriteFailed {
        path: path.to_string(),
        message: error.to_string(),
    }
}
