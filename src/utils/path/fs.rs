//! Lexical path normalization utilities.
//!
//! Nothing here touches the filesystem: output paths usually do not exist yet,
//! and resolving symlinks would make the "inside the output root" check
//! depend on the machine.

use std::path::{Component, Path, PathBuf};

/// Normalize a path to absolute form without touching the filesystem.
///
/// Relative paths are joined onto `base`. `.` components are dropped and `..`
/// pops the previous normal component (never above the root).
///
/// # Example
/// ```ignore
/// let abs = normalize_path(Path::new("./build/../out"), Path::new("/site"));
/// assert_eq!(abs, PathBuf::from("/site/out"));
/// ```
pub fn normalize_path(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Resolve a path that may be relative against the current directory.
///
/// Always returns an absolute path (falls back to the path as given if the
/// current directory cannot be determined).
#[inline]
pub fn absolutize(path: &Path) -> PathBuf {
    match std::env::current_dir() {
        Ok(cwd) => normalize_path(path, &cwd),
        Err(_) => path.to_path_buf(),
    }
}

/// Compute the relative path leading from directory `from` to `to`.
///
/// Both paths are expected to be absolute and normalized.
///
/// # Example
/// ```ignore
/// let rel = relative_path(Path::new("/build/css"), Path::new("/build/img/x.png"));
/// assert_eq!(rel, PathBuf::from("../img/x.png"));
/// ```
pub fn relative_path(from: &Path, to: &Path) -> PathBuf {
    let from: Vec<_> = from.components().collect();
    let to: Vec<_> = to.components().collect();

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..from.len() {
        rel.push("..");
    }
    for component in &to[common..] {
        rel.push(component.as_os_str());
    }
    rel
}

/// Render a path with forward slashes regardless of platform.
#[inline]
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
