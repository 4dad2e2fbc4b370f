//! Bundle artifact: aggregated output with a logical name and content type.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::freshness::mtime::newest_mtime;
use crate::utils::mime;

/// Per-bundle overrides of writer-level settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BundleConfig {
    /// Overrides the writer's checksum policy when set.
    pub checksums_enabled: Option<bool>,
}

/// The dependency a bundle was produced from (single-dependency bundles).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dependency {
    /// Source file of the dependency, if it has one.
    pub source_file: Option<PathBuf>,
}

impl Dependency {
    pub fn from_source(path: impl Into<PathBuf>) -> Self {
        Self {
            source_file: Some(path.into()),
        }
    }
}

/// An aggregated build artifact (combined scripts, styles, compiled templates).
///
/// Created upstream, passed once through the writer which fills in
/// [`Bundle::output_file`] and [`Bundle::url`]. The caller keeps ownership.
#[derive(Debug, Clone, Default)]
pub struct Bundle {
    name: String,
    content_type: String,
    dependency: Option<Dependency>,
    relative_output_path: Option<PathBuf>,
    checksum: Option<String>,
    slot: Option<String>,
    config: BundleConfig,
    sources: Vec<PathBuf>,
    output_file: Option<PathBuf>,
    url: Option<String>,
}

impl Bundle {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            ..Default::default()
        }
    }

    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = Some(slot.into());
        self
    }

    pub fn with_dependency(mut self, dependency: Dependency) -> Self {
        self.dependency = Some(dependency);
        self
    }

    pub fn with_relative_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.relative_output_path = Some(path.into());
        self
    }

    pub fn with_checksum(mut self, checksum: impl Into<String>) -> Self {
        self.checksum = Some(checksum.into());
        self
    }

    pub fn with_checksums_enabled(mut self, enabled: bool) -> Self {
        self.config.checksums_enabled = Some(enabled);
        self
    }

    /// Source files aggregated into this bundle (used for last-modified).
    pub fn with_sources<I, P>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.sources = sources.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    #[inline]
    pub fn dependency(&self) -> Option<&Dependency> {
        self.dependency.as_ref()
    }

    #[inline]
    pub fn relative_output_path(&self) -> Option<&Path> {
        self.relative_output_path.as_deref()
    }

    #[inline]
    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    pub fn set_checksum(&mut self, checksum: impl Into<String>) {
        self.checksum = Some(checksum.into());
    }

    #[inline]
    pub fn slot(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    #[inline]
    pub fn config(&self) -> &BundleConfig {
        &self.config
    }

    #[inline]
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    #[inline]
    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }

    pub fn set_output_file(&mut self, path: impl Into<PathBuf>) {
        self.output_file = Some(path.into());
    }

    #[inline]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = Some(url.into());
    }

    /// Whether this bundle holds CSS (resources referenced from it get
    /// urls relative to its output directory).
    pub fn is_stylesheet(&self) -> bool {
        mime::is_stylesheet(&self.content_type)
    }

    /// Newest modification time across the bundle's sources.
    ///
    /// `None` when the bundle has no sources or any of them cannot be
    /// inspected.
    pub async fn last_modified(&self) -> Option<SystemTime> {
        newest_mtime(&self.sources).await
    }
}
