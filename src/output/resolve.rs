//! Output path resolution.
//!
//! Maps an artifact's logical identity to a file under the output root:
//!
//! ```text
//! name[-<checksum>][-<slot>][.<ext>][.<target_ext>]
//! ```
//!
//! Pure: no filesystem access, same identity always yields the same path.

use regex::Regex;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use crate::config::WriterConfig;
use crate::error::{Result, WriteError};

/// Characters that may appear in a sanitized file name.
static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.\-]").expect("static regex is valid"));

/// Logical identity of an artifact.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputIdentity<'a> {
    /// Path below the output root; takes precedence over `filename`.
    pub relative_path: Option<&'a Path>,
    /// Logical name, sanitized before use.
    pub filename: Option<&'a str>,
    /// Content digest, truncated to `checksum_length`.
    pub checksum: Option<&'a str>,
    /// Extension of the produced content type.
    pub target_ext: Option<&'a str>,
    /// Slot name, used when `include_slot_names` is set.
    pub slot: Option<&'a str>,
}

/// Replace every character outside `[A-Za-z0-9_.-]` with `-`, after
/// dropping one leading `/`.
///
/// # Example
/// ```ignore
/// assert_eq!(sanitize_filename("/a b:c.js"), "a-b-c.js");
/// ```
pub fn sanitize_filename(filename: &str) -> String {
    let trimmed = filename.strip_prefix('/').unwrap_or(filename);
    UNSAFE_CHARS.replace_all(trimmed, "-").into_owned()
}

/// Keep only the normal components of `relative`.
///
/// Root and prefix components are dropped so absolute inputs land under the
/// output root too. A `..` component would escape it and is rejected.
fn contained(relative: &Path) -> Result<PathBuf> {
    let mut out = PathBuf::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::ParentDir => {
                return Err(WriteError::invalid(format!(
                    "relative output path `{}` escapes the output directory",
                    relative.display()
                )));
            }
            Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
        }
    }
    Ok(out)
}

/// Split a base name at its last dot. No dot means an empty extension.
#[inline]
fn split_ext(basename: &str) -> (&str, &str) {
    basename.rsplit_once('.').unwrap_or((basename, ""))
}

/// Resolve the absolute output file for `identity`.
///
/// # Errors
///
/// `InvalidArgument` when neither a usable relative path nor a filename is
/// given, or when the relative path would leave the output root.
pub fn resolve_output_file(config: &WriterConfig, identity: &OutputIdentity<'_>) -> Result<PathBuf> {
    let relative = match identity.relative_path {
        Some(path) => Some(contained(path)?).filter(|p| !p.as_os_str().is_empty()),
        None => None,
    };

    let output_path = match relative {
        Some(relative) => config.output_dir().join(relative),
        None => {
            let filename = identity
                .filename
                .filter(|name| !name.is_empty())
                .ok_or_else(|| WriteError::invalid("\"filename\" or source file expected"))?;
            let sanitized = sanitize_filename(filename);
            if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
                return Err(WriteError::invalid(format!(
                    "filename `{filename}` does not name a file"
                )));
            }
            config.output_dir().join(sanitized)
        }
    };

    let dirname = output_path.parent().unwrap_or(config.output_dir());
    let basename = output_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (name, ext) = split_ext(&basename);
    let mut file_name = name.to_string();

    if let Some(checksum) = identity.checksum.filter(|c| !c.is_empty()) {
        file_name.push('-');
        file_name.extend(checksum.chars().take(config.checksum_length));
    }

    if config.include_slot_names
        && let Some(slot) = identity.slot
    {
        file_name.push('-');
        file_name.push_str(slot);
    }

    if !ext.is_empty() {
        file_name.push('.');
        file_name.push_str(ext);
    }

    // A differing target extension is appended, not substituted:
    // `template.marko` compiled to js becomes `template.marko.js`.
    if let Some(target_ext) = identity.target_ext.filter(|t| !t.is_empty())
        && target_ext != ext
    {
        file_name.push('.');
        file_name.push_str(target_ext);
    }

    Ok(dirname.join(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> WriterConfig {
        WriterConfig {
            output_dir: PathBuf::from("/site/build"),
            ..Default::default()
        }
    }

    fn named(filename: &str) -> OutputIdentity<'_> {
        OutputIdentity {
            filename: Some(filename),
            ..Default::default()
        }
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("/a b:c.js"), "a-b-c.js");
        assert_eq!(sanitize_filename("app_v1.2-beta.js"), "app_v1.2-beta.js");
        assert_eq!(sanitize_filename("css/main.css"), "css-main.css");
        assert_eq!(sanitize_filename("héllo.css"), "h-llo.css");
    }

    #[test]
    fn test_resolve_sanitizes_filename() {
        let path = resolve_output_file(&config(), &named("/a b:c.js")).unwrap();
        assert_eq!(path, PathBuf::from("/site/build/a-b-c.js"));
    }

    #[test]
    fn test_resolve_embeds_truncated_checksum() {
        let identity = OutputIdentity {
            checksum: Some("abcdef1234567890"),
            ..named("app.js")
        };
        let path = resolve_output_file(&config(), &identity).unwrap();
        assert_eq!(path, PathBuf::from("/site/build/app-abcdef12.js"));
    }

    #[test]
    fn test_resolve_checksum_length_configurable() {
        let config = WriterConfig {
            checksum_length: 4,
            ..config()
        };
        let identity = OutputIdentity {
            checksum: Some("abcdef1234567890"),
            ..named("app.js")
        };
        let path = resolve_output_file(&config, &identity).unwrap();
        assert_eq!(path, PathBuf::from("/site/build/app-abcd.js"));

        // Short checksums are kept whole
        let identity = OutputIdentity {
            checksum: Some("ab"),
            ..named("app.js")
        };
        let path = resolve_output_file(&config, &identity).unwrap();
        assert_eq!(path, PathBuf::from("/site/build/app-ab.js"));
    }

    #[test]
    fn test_resolve_double_extension() {
        let identity = OutputIdentity {
            target_ext: Some("js"),
            ..named("template.marko")
        };
        let path = resolve_output_file(&config(), &identity).unwrap();
        assert_eq!(path, PathBuf::from("/site/build/template.marko.js"));
    }

    #[test]
    fn test_resolve_same_target_extension_not_repeated() {
        let identity = OutputIdentity {
            target_ext: Some("js"),
            ..named("app.js")
        };
        let path = resolve_output_file(&config(), &identity).unwrap();
        assert_eq!(path, PathBuf::from("/site/build/app.js"));
    }

    #[test]
    fn test_resolve_name_without_extension() {
        let identity = OutputIdentity {
            checksum: Some("0123456789"),
            target_ext: Some("css"),
            ..named("main")
        };
        let path = resolve_output_file(&config(), &identity).unwrap();
        assert_eq!(path, PathBuf::from("/site/build/main-01234567.css"));
    }

    #[test]
    fn test_resolve_slot_names() {
        let identity = OutputIdentity {
            checksum: Some("abcdef1234"),
            target_ext: Some("js"),
            slot: Some("head"),
            ..named("app")
        };

        // Slot ignored unless enabled
        let path = resolve_output_file(&config(), &identity).unwrap();
        assert_eq!(path, PathBuf::from("/site/build/app-abcdef12.js"));

        let config = WriterConfig {
            include_slot_names: true,
            ..config()
        };
        let path = resolve_output_file(&config, &identity).unwrap();
        assert_eq!(path, PathBuf::from("/site/build/app-abcdef12-head.js"));

        // Enabled but no slot: nothing appended
        let path = resolve_output_file(&config, &named("app.js")).unwrap();
        assert_eq!(path, PathBuf::from("/site/build/app.js"));
    }

    #[test]
    fn test_resolve_relative_path_wins() {
        let identity = OutputIdentity {
            relative_path: Some(Path::new("src/pages/index.marko")),
            target_ext: Some("js"),
            ..named("ignored name")
        };
        let path = resolve_output_file(&config(), &identity).unwrap();
        assert_eq!(path, PathBuf::from("/site/build/src/pages/index.marko.js"));
    }

    #[test]
    fn test_resolve_relative_path_is_contained() {
        let identity = OutputIdentity {
            relative_path: Some(Path::new("/abs/img/logo.png")),
            ..Default::default()
        };
        let path = resolve_output_file(&config(), &identity).unwrap();
        assert_eq!(path, PathBuf::from("/site/build/abs/img/logo.png"));

        let identity = OutputIdentity {
            relative_path: Some(Path::new("../outside.png")),
            ..Default::default()
        };
        let err = resolve_output_file(&config(), &identity).unwrap_err();
        assert!(matches!(err, WriteError::InvalidArgument(_)));
    }

    #[test]
    fn test_resolve_empty_relative_path_falls_back_to_filename() {
        let identity = OutputIdentity {
            relative_path: Some(Path::new("/")),
            ..named("app.js")
        };
        let path = resolve_output_file(&config(), &identity).unwrap();
        assert_eq!(path, PathBuf::from("/site/build/app.js"));
    }

    #[test]
    fn test_resolve_requires_filename() {
        let err = resolve_output_file(&config(), &OutputIdentity::default()).unwrap_err();
        assert!(matches!(err, WriteError::InvalidArgument(_)));

        let err = resolve_output_file(&config(), &named("")).unwrap_err();
        assert!(matches!(err, WriteError::InvalidArgument(_)));

        let err = resolve_output_file(&config(), &named("..")).unwrap_err();
        assert!(matches!(err, WriteError::InvalidArgument(_)));
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let identity = OutputIdentity {
            checksum: Some("ffffeeeeddddcccc"),
            target_ext: Some("css"),
            slot: Some("body"),
            ..named("/styles/main.less")
        };
        let first = resolve_output_file(&config(), &identity).unwrap();
        let second = resolve_output_file(&config(), &identity).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, PathBuf::from("/site/build/styles-main-ffffeeee.less.css"));
    }

    #[test]
    fn test_resolve_dotfile_splits_at_last_dot() {
        let identity = OutputIdentity {
            checksum: Some("12345678"),
            ..named(".htaccess")
        };
        let path = resolve_output_file(&config(), &identity).unwrap();
        assert_eq!(path, PathBuf::from("/site/build/-12345678.htaccess"));
    }
}
