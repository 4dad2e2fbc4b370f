//! Public url derivation for output files.
//!
//! The first applicable rule wins:
//!
//! | Rule              | Result for `/site/build/img/x.png`               |
//! |-------------------|--------------------------------------------------|
//! | stylesheet dir    | `../img/x.png` (from `/site/build/css`)          |
//! | url prefix        | `https://cdn.example.com/img/x.png`              |
//! | base path         | `build/img/x.png` (from `/site`)                 |
//! | output parent     | `/build/img/x.png`                               |

use std::path::{Component, Path};

use crate::config::WriterConfig;
use crate::error::{Result, WriteError};
use crate::utils::path::{relative_path, to_slash};

/// Directories urls may be made relative to, in priority order around the
/// configured url prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlBasis<'a> {
    /// Output directory of the stylesheet referencing the file. Beats the
    /// url prefix.
    pub stylesheet_dir: Option<&'a Path>,
    /// Base path for relative urls. Only used without a url prefix.
    pub base_path: Option<&'a Path>,
}

/// Derive the public url of `output_file`.
///
/// # Errors
///
/// `PreconditionViolation` if `output_file` is not inside the output root,
/// including paths that only appear inside it through `.` or `..` components.
pub fn url_for(config: &WriterConfig, output_file: &Path, basis: &UrlBasis<'_>) -> Result<String> {
    let output_dir = config.output_dir();
    let inside = output_file
        .strip_prefix(output_dir)
        .ok()
        .filter(|inside| inside.components().all(|c| matches!(c, Component::Normal(_))))
        .ok_or_else(|| WriteError::PreconditionViolation {
            path: output_file.to_path_buf(),
            root: output_dir.to_path_buf(),
        })?;

    if let Some(dir) = basis.stylesheet_dir {
        return Ok(to_slash(&relative_path(dir, output_file)));
    }

    if let Some(prefix) = config.url_prefix.as_deref() {
        let prefix = prefix.strip_suffix('/').unwrap_or(prefix);
        return Ok(format!("{prefix}{}", rooted(&to_slash(inside))));
    }

    if let Some(base) = basis.base_path {
        return Ok(to_slash(&relative_path(base, output_file)));
    }

    let parent = output_dir.parent().unwrap_or(output_dir);
    let mirrored = output_file.strip_prefix(parent).unwrap_or(inside);
    Ok(rooted(&to_slash(mirrored)))
}

/// Prepend `/` to a non-empty relative url path.
#[inline]
fn rooted(path: &str) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!("/{path}")
    }
}
