//! Mtime-based freshness detection for written outputs.
//!
//! A failed stat never errors: it means "no information", and every
//! decision made from missing information is "not fresh", which leads to a
//! fresh write instead of possibly stale output.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Get the modification time of a file
///
/// Returns `None` if the file doesn't exist or mtime cannot be read
pub async fn get_mtime(path: &Path) -> Option<SystemTime> {
    tokio::fs::metadata(path).await.ok()?.modified().ok()
}

/// Newest modification time among `paths`.
///
/// Returns `None` for an empty list or if any path cannot be inspected.
pub async fn newest_mtime(paths: &[PathBuf]) -> Option<SystemTime> {
    let mut newest: Option<SystemTime> = None;
    for path in paths {
        let mtime = get_mtime(path).await?;
        newest = Some(newest.map_or(mtime, |n| n.max(mtime)));
    }
    newest
}

/// Check if output is fresh relative to its source
///
/// Fresh only when both times are known and the output is strictly newer.
#[inline]
pub fn is_output_fresh(source: Option<SystemTime>, output: Option<SystemTime>) -> bool {
    matches!((source, output), (Some(source), Some(output)) if output > source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::time::Duration;
    use tempfile::TempDir;

    fn touch(path: &Path, mtime: SystemTime) {
        fs::write(path, "x").unwrap();
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(mtime)
            .unwrap();
    }

    #[test]
    fn test_is_output_fresh() {
        let t0 = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000);
        let t1 = t0 + Duration::from_secs(1);

        assert!(is_output_fresh(Some(t0), Some(t1)));
        assert!(!is_output_fresh(Some(t1), Some(t0)));
        // Equal times are not strictly newer
        assert!(!is_output_fresh(Some(t0), Some(t0)));
        assert!(!is_output_fresh(None, Some(t1)));
        assert!(!is_output_fresh(Some(t0), None));
        assert!(!is_output_fresh(None, None));
    }

    #[tokio::test]
    async fn test_get_mtime_missing_file() {
        assert_eq!(get_mtime(Path::new("/nonexistent/file.txt")).await, None);
    }

    #[tokio::test]
    async fn test_newest_mtime() {
        let dir = TempDir::new().unwrap();
        let old = dir.path().join("old.js");
        let new = dir.path().join("new.js");
        let t0 = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
        let t1 = t0 + Duration::from_secs(60);
        touch(&old, t0);
        touch(&new, t1);

        assert_eq!(newest_mtime(&[old.clone(), new.clone()]).await, Some(t1));
        assert_eq!(newest_mtime(&[old.clone()]).await, Some(t0));
        assert_eq!(newest_mtime(&[]).await, None);

        // One missing source makes the aggregate unknown
        let missing = dir.path().join("missing.js");
        assert_eq!(newest_mtime(&[old, missing]).await, None);
    }
}
