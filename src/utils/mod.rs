//! Utility modules for the writer.

pub mod mime;
pub mod path;
