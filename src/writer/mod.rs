//! File writer: decides where artifacts go, whether existing output can be
//! reused, and which url callers should reference.
//!
//! # Flow
//!
//! ```text
//! input ─▶ [checksum] ─▶ resolve output path ─▶ mkdir + create ─▶ copy ─▶ close ─▶ url
//! ```
//!
//! Each write yields exactly one outcome: the [`OutputRoute`] after the
//! output file has been closed, or the first error. Writes to distinct output
//! paths are independent and may run concurrently on one runtime.

mod check;
mod write;

use std::path::{Path, PathBuf};

use crate::artifact::{Bundle, OutputRoute, RequestContext};
use crate::checksum::{Blake3Checksum, ChecksumCalculator};
use crate::config::WriterConfig;
use crate::error::{Result, WriteError};
use crate::output::{OutputIdentity, UrlBasis, resolve_output_file, unbundled_relative_path, url_for};
use crate::utils::mime;
use crate::utils::path::absolutize;

/// Writes bundles and resources below the configured output root.
#[derive(Debug)]
pub struct FileWriter<C = Blake3Checksum> {
    config: WriterConfig,
    calculator: C,
}

impl FileWriter<Blake3Checksum> {
    /// Create a writer using blake3 checksums.
    ///
    /// A relative output root is resolved against the current directory.
    pub fn new(config: WriterConfig) -> Result<Self> {
        Self::with_calculator(config, Blake3Checksum)
    }
}

impl<C: ChecksumCalculator> FileWriter<C> {
    /// Create a writer with a custom checksum calculator.
    pub fn with_calculator(mut config: WriterConfig, calculator: C) -> Result<Self> {
        config.output_dir = absolutize(&config.output_dir);
        config.base_path = config.base_path.as_deref().map(absolutize);
        config.project_root = config.project_root.as_deref().map(absolutize);
        config.validate()?;
        Ok(Self { config, calculator })
    }

    #[inline]
    pub fn config(&self) -> &WriterConfig {
        &self.config
    }

    #[inline]
    pub fn output_dir(&self) -> &Path {
        self.config.output_dir()
    }

    /// Effective checksum policy: bundle override, then writer default.
    pub fn checksums_enabled_for(&self, bundle: &Bundle) -> bool {
        bundle
            .config()
            .checksums_enabled
            .unwrap_or_else(|| self.config.checksums_by_default())
    }

    /// Output file for `bundle`, using its current checksum.
    ///
    /// The relative path comes from the bundle's dependency source file
    /// (taken relative to the project root when inside it), then from its
    /// explicit relative output path; otherwise the bundle name is used.
    pub fn output_file_for_bundle(&self, bundle: &Bundle) -> Result<PathBuf> {
        let project_root = self.config.project_root();
        let relative_path = bundle
            .dependency()
            .and_then(|dep| dep.source_file.as_deref())
            .map(|source| source.strip_prefix(project_root).unwrap_or(source))
            .or_else(|| bundle.relative_output_path());

        let identity = OutputIdentity {
            relative_path,
            filename: Some(bundle.name()),
            checksum: bundle.checksum(),
            target_ext: mime::extension_for(bundle.content_type()),
            slot: bundle.slot(),
        };
        resolve_output_file(&self.config, &identity)
    }

    /// Output file for the resource at `path`.
    ///
    /// With bundling disabled the resource keeps its directory structure
    /// (see [`unbundled_relative_path`]); otherwise only its file name is used.
    pub async fn output_file_for_resource(
        &self,
        path: &Path,
        checksum: Option<&str>,
    ) -> Result<PathBuf> {
        if path.as_os_str().is_empty() {
            return Err(WriteError::invalid("\"path\" is required"));
        }

        let relative_path = if self.config.bundling_enabled {
            None
        } else {
            Some(unbundled_relative_path(path, self.config.project_root()).await)
        };
        let filename = path.file_name().map(|n| n.to_string_lossy());

        let identity = OutputIdentity {
            relative_path: relative_path.as_deref(),
            filename: filename.as_deref(),
            checksum,
            ..Default::default()
        };
        resolve_output_file(&self.config, &identity)
    }

    /// Url of a bundle that already has an output file.
    ///
    /// Prefix first, then the context's (or configured) base path, then the
    /// output root's parent.
    pub fn bundle_url(&self, bundle: &Bundle, ctx: &RequestContext<'_>) -> Result<String> {
        let output_file = bundle
            .output_file()
            .ok_or_else(|| WriteError::invalid(format!("bundle `{}` has no output file", bundle.name())))?;
        self.bundle_url_for(output_file, ctx)
    }

    fn bundle_url_for(&self, output_file: &Path, ctx: &RequestContext<'_>) -> Result<String> {
        let basis = UrlBasis {
            stylesheet_dir: None,
            base_path: ctx.base_path.or(self.config.base_path.as_deref()),
        };
        url_for(&self.config, output_file, &basis)
    }

    /// Url of a resource output file.
    ///
    /// When the context names a stylesheet bundle the url is relative to that
    /// bundle's output directory; otherwise prefix, then the output root's
    /// parent.
    pub fn resource_url(&self, output_file: &Path, ctx: &RequestContext<'_>) -> Result<String> {
        let stylesheet_file = match ctx.stylesheet() {
            Some(bundle) => Some(match bundle.output_file() {
                Some(file) => file.to_path_buf(),
                None => self.output_file_for_bundle(bundle)?,
            }),
            None => None,
        };

        let basis = UrlBasis {
            stylesheet_dir: stylesheet_file.as_deref().and_then(Path::parent),
            base_path: None,
        };
        url_for(&self.config, output_file, &basis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::Dependency;
    use crate::utils::mime::types;

    fn writer(config: WriterConfig) -> FileWriter {
        FileWriter::new(config).unwrap()
    }

    fn config(output_dir: &str) -> WriterConfig {
        WriterConfig {
            output_dir: PathBuf::from(output_dir),
            project_root: Some(PathBuf::from("/proj")),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = WriterConfig {
            checksum_length: 0,
            ..config("/build")
        };
        assert!(matches!(FileWriter::new(config), Err(WriteError::Config(_))));
    }

    #[test]
    fn test_new_absolutizes_output_dir() {
        let writer = writer(WriterConfig::default());
        assert!(writer.output_dir().is_absolute());
        assert!(writer.output_dir().ends_with("build"));
    }

    #[test]
    fn test_checksum_policy_precedence() {
        let writer_default = writer(config("/build"));
        let writer_off = writer(WriterConfig {
            checksums_enabled: Some(false),
            ..config("/build")
        });

        let plain = Bundle::new("app", types::JAVASCRIPT);
        let forced_on = plain.clone().with_checksums_enabled(true);
        let forced_off = plain.clone().with_checksums_enabled(false);

        assert!(writer_default.checksums_enabled_for(&plain));
        assert!(!writer_default.checksums_enabled_for(&forced_off));
        assert!(!writer_off.checksums_enabled_for(&plain));
        assert!(writer_off.checksums_enabled_for(&forced_on));
    }

    #[test]
    fn test_output_file_for_bundle_by_name() {
        let writer = writer(config("/proj/build"));
        let bundle = Bundle::new("vendor/app", types::JAVASCRIPT).with_checksum("0123456789abcdef");
        assert_eq!(
            writer.output_file_for_bundle(&bundle).unwrap(),
            PathBuf::from("/proj/build/vendor-app-01234567.js")
        );
    }

    #[test]
    fn test_output_file_for_bundle_from_dependency() {
        let writer = writer(config("/proj/build"));
        let bundle = Bundle::new("ignored", "application/javascript")
            .with_dependency(Dependency::from_source("/proj/components/button.marko"));
        assert_eq!(
            writer.output_file_for_bundle(&bundle).unwrap(),
            PathBuf::from("/proj/build/components/button.marko.js")
        );

        let bundle = Bundle::new("ignored", types::CSS).with_relative_output_path("css/site.css");
        assert_eq!(
            writer.output_file_for_bundle(&bundle).unwrap(),
            PathBuf::from("/proj/build/css/site.css")
        );
    }

    #[test]
    fn test_output_file_for_bundle_requires_name() {
        let writer = writer(config("/proj/build"));
        let err = writer
            .output_file_for_bundle(&Bundle::new("", types::CSS))
            .unwrap_err();
        assert!(matches!(err, WriteError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_output_file_for_resource() {
        let writer = writer(config("/proj/build"));
        assert_eq!(
            writer
                .output_file_for_resource(Path::new("/proj/img/logo.png"), Some("feedbeefcafe"))
                .await
                .unwrap(),
            PathBuf::from("/proj/build/logo-feedbeef.png")
        );
        assert!(matches!(
            writer.output_file_for_resource(Path::new(""), None).await,
            Err(WriteError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_bundle_url_requires_output_file() {
        let writer = writer(config("/build"));
        let bundle = Bundle::new("app", types::JAVASCRIPT);
        assert!(matches!(
            writer.bundle_url(&bundle, &RequestContext::default()),
            Err(WriteError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_bundle_url_uses_context_base_path() {
        let writer = writer(config("/site/build"));
        let mut bundle = Bundle::new("app", types::JAVASCRIPT);
        bundle.set_output_file("/site/build/app.js");

        let url = writer.bundle_url(&bundle, &RequestContext::default()).unwrap();
        assert_eq!(url, "/build/app.js");

        let base = Path::new("/site");
        let url = writer.bundle_url(&bundle, &RequestContext::relative_to(base)).unwrap();
        assert_eq!(url, "build/app.js");
    }

    #[test]
    fn test_resource_url_relative_to_stylesheet() {
        let writer = writer(WriterConfig {
            url_prefix: Some("https://cdn.example.com/".to_string()),
            ..config("/build")
        });
        let mut css = Bundle::new("main", types::CSS);
        css.set_output_file("/build/css/main.css");

        let ctx = RequestContext::referenced_from(&css);
        let url = writer.resource_url(Path::new("/build/img/x.png"), &ctx).unwrap();
        assert_eq!(url, "../img/x.png");

        // Non-stylesheet owners fall through to the prefix
        let js = Bundle::new("app", types::JAVASCRIPT);
        let ctx = RequestContext::referenced_from(&js);
        let url = writer.resource_url(Path::new("/build/img/x.png"), &ctx).unwrap();
        assert_eq!(url, "https://cdn.example.com/img/x.png");
    }

    #[test]
    fn test_resource_url_resolves_unwritten_stylesheet() {
        let writer = writer(config("/build"));
        let css = Bundle::new("main", types::CSS).with_relative_output_path("css/main.css");
        let ctx = RequestContext::referenced_from(&css);
        let url = writer.resource_url(Path::new("/build/fonts/a.woff"), &ctx).unwrap();
        assert_eq!(url, "../fonts/a.woff");
    }

    #[test]
    fn test_resource_url_outside_root() {
        let writer = writer(config("/build"));
        let err = writer
            .resource_url(Path::new("/elsewhere/x.png"), &RequestContext::default())
            .unwrap_err();
        assert!(matches!(err, WriteError::PreconditionViolation { .. }));

        let err = writer
            .resource_url(Path::new("/build/../etc/passwd"), &RequestContext::default())
            .unwrap_err();
        assert!(matches!(err, WriteError::PreconditionViolation { .. }));
    }
}
