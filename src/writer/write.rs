//! Streaming writes of bundles and resources.

use std::path::Path;

use tokio::fs::{self, File};
use tokio::io::{self, AsyncRead, AsyncWriteExt};

use super::FileWriter;
use crate::artifact::{Bundle, OutputRoute, RequestContext};
use crate::checksum::{ChecksumCalculator, Checksummed};
use crate::debug;
use crate::error::{Result, WriteError};

impl<C: ChecksumCalculator> FileWriter<C> {
    /// Write `input` as the content of `bundle`.
    ///
    /// With checksums enabled and no checksum on the bundle yet, the input is
    /// hashed first and the digest assigned to the bundle before its output
    /// path is resolved. The output file and url are assigned only after the
    /// output file has been closed; on failure neither is touched.
    pub async fn write_bundle<R>(
        &self,
        input: R,
        bundle: &mut Bundle,
        ctx: &RequestContext<'_>,
    ) -> Result<OutputRoute>
    where
        R: AsyncRead + Unpin + Send,
    {
        let output_file = if self.checksums_enabled_for(bundle) && bundle.checksum().is_none() {
            let Checksummed { checksum, stream } = self
                .calculator
                .calculate(input)
                .await
                .map_err(|err| WriteError::stream(bundle.name(), err))?;
            bundle.set_checksum(checksum);

            let output_file = self.output_file_for_bundle(bundle)?;
            debug!("write"; "piping bundle `{}` to {}", bundle.name(), output_file.display());
            pipe_out(stream, &output_file).await?;
            output_file
        } else {
            let output_file = self.output_file_for_bundle(bundle)?;
            debug!("write"; "piping bundle `{}` to {}", bundle.name(), output_file.display());
            pipe_out(input, &output_file).await?;
            output_file
        };

        let url = self.bundle_url_for(&output_file, ctx)?;
        bundle.set_output_file(&output_file);
        bundle.set_url(&url);
        Ok(OutputRoute { url, output_file })
    }

    /// Write `input` as the output of the resource at `path`.
    ///
    /// The checksum, when enabled, is always computed from the input.
    pub async fn write_resource<R>(
        &self,
        input: R,
        path: &Path,
        ctx: &RequestContext<'_>,
    ) -> Result<OutputRoute>
    where
        R: AsyncRead + Unpin + Send,
    {
        if path.as_os_str().is_empty() {
            return Err(WriteError::invalid("\"path\" is required"));
        }

        let output_file = if self.config.checksums_by_default() {
            let Checksummed { checksum, stream } = self
                .calculator
                .calculate(input)
                .await
                .map_err(|err| WriteError::stream(path.display(), err))?;

            let output_file = self.output_file_for_resource(path, Some(&checksum)).await?;
            debug!("write"; "piping resource {} to {}", path.display(), output_file.display());
            pipe_out(stream, &output_file).await?;
            output_file
        } else {
            let output_file = self.output_file_for_resource(path, None).await?;
            debug!("write"; "piping resource {} to {}", path.display(), output_file.display());
            pipe_out(input, &output_file).await?;
            output_file
        };

        let url = self.resource_url(&output_file, ctx)?;
        Ok(OutputRoute { url, output_file })
    }

    /// Reuse the bundle's output if fresh, otherwise write `input`.
    ///
    /// `input` is dropped unread when the existing output is reused.
    pub async fn ensure_bundle<R>(
        &self,
        input: R,
        bundle: &mut Bundle,
        ctx: &RequestContext<'_>,
    ) -> Result<OutputRoute>
    where
        R: AsyncRead + Unpin + Send,
    {
        if self.check_bundle_up_to_date(bundle, ctx).await?
            && let (Some(url), Some(output_file)) = (bundle.url(), bundle.output_file())
        {
            return Ok(OutputRoute {
                url: url.to_string(),
                output_file: output_file.to_path_buf(),
            });
        }
        self.write_bundle(input, bundle, ctx).await
    }

    /// Reuse the resource's output if fresh, otherwise copy the file at
    /// `path` into the output root.
    pub async fn ensure_resource(&self, path: &Path, ctx: &RequestContext<'_>) -> Result<OutputRoute> {
        if let Some(route) = self.check_resource_up_to_date(path, ctx).await? {
            return Ok(route);
        }

        let input = File::open(path)
            .await
            .map_err(|err| WriteError::stream(path.display(), err))?;
        self.write_resource(input, path, ctx).await
    }
}

/// Copy `input` into a freshly created `output_file`.
///
/// Completes only after the file has been flushed and closed.
async fn pipe_out<R>(mut input: R, output_file: &Path) -> Result<()>
where
    R: AsyncRead + Unpin + Send,
{
    let fail = |err| WriteError::stream(output_file.display(), err);

    if let Some(parent) = output_file.parent() {
        fs::create_dir_all(parent).await.map_err(fail)?;
    }

    let mut file = File::create(output_file).await.map_err(fail)?;
    io::copy(&mut input, &mut file).await.map_err(fail)?;
    file.shutdown().await.map_err(fail)?;
    Ok(())
}
