//! Output path and url mapping.
//!
//! Pure functions (plus a `package.json` lookup for the unbundled layout).
//! The writer composes them; nothing here writes to disk.

mod package;
mod resolve;
mod url;

pub use package::{ModulePackage, find_module_package, unbundled_relative_path};
pub use resolve::{OutputIdentity, resolve_output_file, sanitize_filename};
pub use url::{UrlBasis, url_for};
