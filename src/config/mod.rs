//! Writer configuration, loaded from `asset-writer.toml`.
//!
//! # Keys
//!
//! | Key                  | Default   | Purpose                                        |
//! |----------------------|-----------|------------------------------------------------|
//! | `output_dir`         | `build`   | Root directory for every written file          |
//! | `checksums_enabled`  | (unset)   | Default checksum policy; unset means enabled   |
//! | `url_prefix`         | (unset)   | Fixed prefix for public urls                   |
//! | `base_path`          | (unset)   | Bundle urls are made relative to this path     |
//! | `include_slot_names` | `false`   | Append `-<slot>` to bundle file names          |
//! | `checksum_length`    | `8`       | Characters of the checksum kept in file names  |
//! | `bundling_enabled`   | `true`    | When false, resources keep their directory layout |
//! | `project_root`       | config dir| Root used for the unbundled resource layout    |
//!
//! # Example
//!
//! ```toml
//! output_dir = "static"
//! url_prefix = "https://cdn.example.com/static/"
//! checksum_length = 10
//! ```

mod error;
mod util;

pub use error::{ConfigError, FieldIssue};
pub use util::find_config_file;

use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::log;
use crate::utils::path::normalize_path;

/// Default config file name.
pub const CONFIG_FILE: &str = "asset-writer.toml";

/// Default number of checksum characters embedded into file names.
pub const DEFAULT_CHECKSUM_LENGTH: usize = 8;

// ============================================================================
// root configuration
// ============================================================================

/// Process-wide writer configuration, fixed for the lifetime of a build run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Output root. Absolute after [`WriterConfig::finalize`].
    pub output_dir: PathBuf,

    /// Default checksum policy for writes. `None` means enabled.
    pub checksums_enabled: Option<bool>,

    /// Fixed url prefix (e.g. a CDN origin).
    pub url_prefix: Option<String>,

    /// Bundle urls are computed relative to this path when no prefix is set.
    pub base_path: Option<PathBuf>,

    /// Append the slot name to bundle file names.
    pub include_slot_names: bool,

    /// Number of checksum characters kept in file names.
    pub checksum_length: usize,

    /// When false, resources keep their source directory structure.
    pub bundling_enabled: bool,

    /// Project root for the unbundled resource layout.
    pub project_root: Option<PathBuf>,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("build"),
            checksums_enabled: None,
            url_prefix: None,
            base_path: None,
            include_slot_names: false,
            checksum_length: DEFAULT_CHECKSUM_LENGTH,
            bundling_enabled: true,
            project_root: None,
        }
    }
}

impl WriterConfig {
    /// Load configuration by searching upward from cwd for `config_name`.
    ///
    /// Falls back to defaults rooted at the current directory when no file
    /// exists. The result is finalized and validated.
    pub fn load(config_name: &Path) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir()
            .map_err(|err| ConfigError::Io(PathBuf::from("."), err))?;

        let (mut config, root) = match find_config_file(config_name) {
            Some(path) => {
                let root = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| cwd.clone());
                (Self::from_path(&path)?, root)
            }
            None => (Self::default(), cwd),
        };

        config.finalize(&root);
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path, warning about unknown keys.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            let display_path = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_else(|| path.to_string_lossy());
            log!("warning"; "unknown fields in {}, ignoring: {}", display_path, ignored.join(", "));
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Resolve every relative path against `root`.
    pub fn finalize(&mut self, root: &Path) {
        self.output_dir = normalize_path(&self.output_dir, root);
        self.base_path = self.base_path.as_deref().map(|p| normalize_path(p, root));
        self.project_root = Some(match &self.project_root {
            Some(p) => normalize_path(p, root),
            None => normalize_path(root, root),
        });
    }

    /// Check invariants the writer relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.checksum_length == 0 {
            return Err(FieldIssue::new("checksum_length", "must be at least 1")
                .with_hint("remove the key to use the default of 8")
                .into());
        }
        if !self.output_dir.is_absolute() {
            return Err(FieldIssue::new(
                "output_dir",
                format!("`{}` is not absolute", self.output_dir.display()),
            )
            .into());
        }
        if let Some(prefix) = &self.url_prefix
            && prefix.trim().is_empty()
        {
            return Err(FieldIssue::new("url_prefix", "must not be blank")
                .with_hint("remove the key to derive urls from the output directory")
                .into());
        }
        Ok(())
    }

    /// Output root directory.
    #[inline]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writer-level checksum policy (absent means enabled).
    #[inline]
    pub fn checksums_by_default(&self) -> bool {
        self.checksums_enabled.unwrap_or(true)
    }

    /// Project root, defaulting to the parent of the output root.
    pub fn project_root(&self) -> &Path {
        match &self.project_root {
            Some(root) => root,
            None => self.output_dir.parent().unwrap_or(&self.output_dir),
        }
    }
}
