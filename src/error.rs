//! Write error types.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by the writer.
///
/// Staleness probes never produce these: an unreadable or missing file during
/// a freshness check is treated as "no information" and leads to a rewrite.
#[derive(Debug, Error)]
pub enum WriteError {
    /// A required identity was missing (no filename, empty source path, ...).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading the input or writing the output failed.
    ///
    /// `artifact` is the output file once resolved, otherwise the bundle
    /// name or resource source path.
    #[error("stream failure while writing `{artifact}`")]
    StreamFailure {
        artifact: String,
        #[source]
        source: io::Error,
    },

    /// A path handed to URL derivation lies outside the output root.
    #[error("`{}` is not inside the output directory `{}`", path.display(), root.display())]
    PreconditionViolation { path: PathBuf, root: PathBuf },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl WriteError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn stream(artifact: impl fmt::Display, source: io::Error) -> Self {
        Self::StreamFailure {
            artifact: artifact.to_string(),
            source,
        }
    }
}

pub type Result<T, E = WriteError> = std::result::Result<T, E>;
