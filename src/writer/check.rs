//! Staleness checks: reuse existing output instead of rewriting it.

use std::path::Path;

use super::FileWriter;
use crate::artifact::{Bundle, OutputRoute, RequestContext};
use crate::checksum::ChecksumCalculator;
use crate::debug;
use crate::error::{Result, WriteError};
use crate::freshness::{get_mtime, is_output_fresh};

impl<C: ChecksumCalculator> FileWriter<C> {
    /// Reuse the bundle's existing output if it is newer than its sources.
    ///
    /// On reuse the bundle's output file and url are assigned and `true` is
    /// returned; the caller skips the write. Checksummed bundles always return
    /// `false`: their file name is unknown until the content is hashed.
    ///
    /// Missing or unreadable files never fail the check, they just mean
    /// "rewrite".
    pub async fn check_bundle_up_to_date(
        &self,
        bundle: &mut Bundle,
        ctx: &RequestContext<'_>,
    ) -> Result<bool> {
        if self.checksums_enabled_for(bundle) {
            return Ok(false);
        }

        let output_file = self.output_file_for_bundle(bundle)?;
        let (source_mtime, output_mtime) =
            tokio::join!(bundle.last_modified(), get_mtime(&output_file));

        if !is_output_fresh(source_mtime, output_mtime) {
            return Ok(false);
        }

        let url = self.bundle_url_for(&output_file, ctx)?;
        debug!("fresh"; "bundle `{}` up to date at {}", bundle.name(), url);
        bundle.set_output_file(output_file);
        bundle.set_url(url);
        Ok(true)
    }

    /// Reuse the existing output of the resource at `path` if it is newer
    /// than the source file.
    ///
    /// Returns `None` when a write is needed, including whenever checksums
    /// are enabled for resources.
    pub async fn check_resource_up_to_date(
        &self,
        path: &Path,
        ctx: &RequestContext<'_>,
    ) -> Result<Option<OutputRoute>> {
        if path.as_os_str().is_empty() {
            return Err(WriteError::invalid("\"path\" is required"));
        }
        if self.config.checksums_by_default() {
            return Ok(None);
        }

        let output_file = self.output_file_for_resource(path, None).await?;
        let (input_mtime, output_mtime) = tokio::join!(get_mtime(path), get_mtime(&output_file));

        if !is_output_fresh(input_mtime, output_mtime) {
            return Ok(None);
        }

        let url = self.resource_url(&output_file, ctx)?;
        debug!("fresh"; "resource {} up to date at {}", path.display(), url);
        Ok(Some(OutputRoute { url, output_file }))
    }
}
