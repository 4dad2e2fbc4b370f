//! Path utilities.
//!
//! Pure functions for path manipulation. No side effects.
//!
//! - [`fs`]: Lexical normalization and relative paths (`normalize_path`, `relative_path`)

pub mod fs;

pub use fs::{absolutize, normalize_path, relative_path, to_slash};
