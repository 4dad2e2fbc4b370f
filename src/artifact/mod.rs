//! Artifacts handed to the writer and what it hands back.

mod bundle;
mod context;

pub use bundle::{Bundle, BundleConfig, Dependency};
pub use context::{OutputRoute, RequestContext};
