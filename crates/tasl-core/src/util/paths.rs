//! Generic path utilities.
//!
//! - Tilde expansion for user-supplied paths
//! - Walking up a directory tree to find a marker (e.g. a `.git` directory)
//! - Computing the layout of a file relative to a root

use std::path::{Component, Path, PathBuf};

/// Marker that identifies a version-control root.
pub const VCS_MARKER: &str = ".git";

/// Expand a leading `~` to the user's home directory.
///
/// # Example
///
/// ```
/// use tasl_core::util::paths::expand_tilde;
///
/// let plain = expand_tilde("/etc/tasl.toml");
/// assert_eq!(plain.to_str(), Some("/etc/tasl.toml"));
/// ```
pub fn expand_tilde(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}

/// Walk up from `start` until a directory containing `marker` is found.
///
/// Returns the directory that contains the marker, not the marker itself.
pub fn find_dir_with_marker(start: &Path, marker: &str) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir.join(marker).exists() {
            return Some(dir.to_path_buf());
        }
        current = dir.parent();
    }
    None
}

/// Find the version-control root that contains `path`.
///
/// `path` may be a file or a directory; relative paths are resolved against
/// the current directory first.
pub fn find_vcs_root(path: &Path) -> Option<PathBuf> {
    let absolute = absolutize(path).ok()?;
    let start = if absolute.is_dir() {
        absolute.as_path()
    } else {
        absolute.parent()?
    };
    find_dir_with_marker(start, VCS_MARKER)
}

/// Path of `path` relative to its version-control root, `/`-separated.
///
/// Returns `None` when no root can be found; callers omit the metadata
/// rather than failing.
pub fn vcs_relative_path(path: &Path) -> Option<String> {
    let root = find_vcs_root(path)?;
    let absolute = absolutize(path).ok()?;
    let relative = absolute.strip_prefix(&root).ok()?;
    Some(
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/"),
    )
}

/// Make `path` absolute against the current directory and drop `.` and
/// `..` components lexically.
pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(normalize_lexically(&joined))
}

/// Compute where `path` lands inside `destination` when its layout relative
/// to `root` is preserved.
///
/// Paths outside `root` keep only their file name.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use tasl_core::util::paths::relocate;
///
/// let target = relocate(Path::new("/deck/assets/img/a.png"), Path::new("/deck"), Path::new("out"));
/// assert_eq!(target, Path::new("out/assets/img/a.png"));
/// ```
pub fn relocate(path: &Path, root: &Path, destination: &Path) -> PathBuf {
    let path = normalize_lexically(path);
    let root = normalize_lexically(root);
    match path.strip_prefix(&root) {
        Ok(relative) => destination.join(relative),
        Err(_) => match path.file_name() {
            Some(name) => destination.join(name),
            None => destination.to_path_buf(),
        },
    }
}

fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}
