//! Freshness detection: mtime for plain outputs, checksums decide otherwise.
//!
//! When checksums are enabled the output file name depends on the content
//! digest, so freshness cannot be known without reading the whole input.
//! Those writes always go through; only checksum-free outputs are compared
//! by modification time here.

pub mod mtime;

pub use mtime::{get_mtime, is_output_fresh, newest_mtime};
