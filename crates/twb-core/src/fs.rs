//! File-system helpers used by the operations.

use std::ffi::{OsStr, OsString};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::OperationError;

/// Read a whole file as UTF-8 text.
pub fn read_text(path: &Path) -> Result<String, OperationError> {
    fs::read_to_string(path).map_err(|source| OperationError::io("read", path, source))
}

/// Write `content` to `path`, creating parent directories as needed.
///
/// The content goes to a sibling temporary file which is synced and then
/// renamed over `path`. On failure the temporary file is removed, so the
/// target is either fully written or untouched.
pub fn write_text(path: &Path, content: &str) -> Result<(), OperationError> {
    let Some(file_name) = path.file_name() else {
        return Err(OperationError::io(
            "write",
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
        ));
    };

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|source| OperationError::io("create directory", parent, source))?;
    }

    let temp_path = temp_path_for(path, file_name);
    let result = write_synced(&temp_path, content).and_then(|()| {
        fs::rename(&temp_path, path).map_err(|source| OperationError::io("rename", path, source))
    });
    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result?;

    debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}

/// Fail with [`OperationError::InvalidFileType`] unless `path` ends in
/// `.extension` (case-insensitive).
pub fn require_extension(
    path: &Path,
    extension: &'static str,
    expected: &'static str,
) -> Result<(), OperationError> {
    let matches = path
        .extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
    if matches {
        Ok(())
    } else {
        Err(OperationError::InvalidFileType {
            expected,
            path: path.to_path_buf(),
        })
    }
}

fn write_synced(path: &Path, content: &str) -> Result<(), OperationError> {
    let mut file = File::create(path).map_err(|source| OperationError::io("create", path, source))?;
    file.write_all(content.as_bytes())
        .map_err(|source| OperationError::io("write", path, source))?;
    file.sync_all()
        .map_err(|source| OperationError::io("sync", path, source))
}

fn temp_path_for(path: &Path, file_name: &OsStr) -> PathBuf {
    let mut temp_name = OsString::from(".");
    temp_name.push(file_name);
    temp_name.push(".tmp");
    path.with_file_name(temp_name)
}
