//! File writing and copying utilities.
//!
//! Every write goes to a temporary file in the target's directory which is
//! then renamed over the target, so a failed write never leaves a partially
//! written file behind.

use std::fs::{self, FileTimes};
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::{Error, Result};

/// Atomically replace (or create) `path` with `contents`.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let mut temp = temp_sibling(path)?;
    temp.write_all(contents.as_bytes())
        .map_err(|e| Error::io_with_path(e, path))?;
    temp.persist(path)
        .map_err(|e| Error::io_with_path(e.error, path))?;
    Ok(())
}

/// Write `contents` to `path`, refusing to replace an existing file unless
/// `overwrite` is set.
///
/// Returns [`Error::WriteConflict`] when the target exists and `overwrite`
/// is false, including when another process creates it mid-write.
pub fn write_new(path: &Path, contents: &str, overwrite: bool) -> Result<()> {
    if overwrite {
        return write_atomic(path, contents);
    }
    if path.exists() {
        return Err(Error::write_conflict(path));
    }

    let mut temp = temp_sibling(path)?;
    temp.write_all(contents.as_bytes())
        .map_err(|e| Error::io_with_path(e, path))?;
    temp.persist_noclobber(path).map_err(|e| {
        if e.error.kind() == std::io::ErrorKind::AlreadyExists {
            Error::write_conflict(path)
        } else {
            Error::io_with_path(e.error, path)
        }
    })?;
    Ok(())
}

/// Copy `source` to `target` with its permissions and timestamps.
///
/// Parent directories of `target` are created as needed. Returns
/// [`Error::WriteConflict`] when the target exists and `overwrite` is false.
pub fn copy_with_metadata(source: &Path, target: &Path, overwrite: bool) -> Result<()> {
    if !overwrite && target.exists() {
        return Err(Error::write_conflict(target));
    }
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let metadata = fs::metadata(source).map_err(|e| Error::io_with_path(e, source))?;
    let mut input = fs::File::open(source).map_err(|e| Error::io_with_path(e, source))?;
    let mut temp = temp_sibling(target)?;
    std::io::copy(&mut input, temp.as_file_mut()).map_err(|e| Error::io_with_path(e, target))?;

    let mut times = FileTimes::new();
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    temp.as_file()
        .set_times(times)
        .map_err(|e| Error::io_with_path(e, target))?;
    temp.as_file()
        .set_permissions(metadata.permissions())
        .map_err(|e| Error::io_with_path(e, target))?;

    let persisted = if overwrite {
        temp.persist(target)
    } else {
        temp.persist_noclobber(target)
    };
    persisted.map_err(|e| {
        if e.error.kind() == std::io::ErrorKind::AlreadyExists {
            Error::write_conflict(target)
        } else {
            Error::io_with_path(e.error, target)
        }
    })?;
    Ok(())
}

fn temp_sibling(path: &Path) -> Result<NamedTempFile> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    NamedTempFile::new_in(dir).map_err(|e| Error::io_with_path(e, dir))
}
