//! Output stage of an asset build pipeline.
//!
//! Decides where a bundle or static resource is written, whether a previous
//! build output can be reused, and which public url references the result.
//!
//! # Module Structure
//!
//! ```text
//! src/
//! ├── artifact/   # Bundle, RequestContext, OutputRoute
//! ├── checksum/   # ChecksumCalculator capability (blake3)
//! ├── config/     # WriterConfig (asset-writer.toml)
//! ├── freshness/  # mtime probes
//! ├── output/     # pure path resolution and url derivation
//! ├── writer/     # FileWriter: staleness checks and streamed writes
//! ├── cli/        # command line
//! └── utils/      # mime and path helpers
//! ```
//!
//! # Example
//!
//! ```no_run
//! use asset_writer::{Bundle, FileWriter, RequestContext, WriterConfig};
//!
//! # async fn demo() -> asset_writer::Result<()> {
//! let writer = FileWriter::new(WriterConfig::default())?;
//! let mut bundle = Bundle::new("app", "application/javascript");
//! let route = writer
//!     .write_bundle(&b"console.log(1)"[..], &mut bundle, &RequestContext::default())
//!     .await?;
//! println!("{} -> {}", route.url, route.output_file.display());
//! # Ok(())
//! # }
//! ```

pub mod artifact;
pub mod checksum;
pub mod cli;
pub mod config;
pub mod error;
pub mod freshness;
pub mod logger;
pub mod output;
pub mod utils;
pub mod writer;

pub use artifact::{Bundle, BundleConfig, Dependency, OutputRoute, RequestContext};
pub use checksum::{Blake3Checksum, ChecksumCalculator, Checksummed, ContentHash};
pub use config::{ConfigError, WriterConfig};
pub use error::{Result, WriteError};
pub use writer::FileWriter;
