//! Module package lookup for the unbundled resource layout.
//!
//! When bundling is disabled every resource keeps its directory structure.
//! Resources inside a third-party package are grouped under
//! `<name>-<version>/` so two versions of the same package never collide:
//!
//! ```text
//! /proj/node_modules/icons/img/x.png   (icons@1.2.0)  →  build/icons-1.2.0/img/x.png
//! /proj/img/logo.png                   (project)      →  build/img/logo.png
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;

const MANIFEST: &str = "package.json";

#[derive(Debug, Deserialize)]
struct PackageManifest {
    name: Option<String>,
    version: Option<String>,
}

/// The nearest package enclosing a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePackage {
    /// Directory containing `package.json`.
    pub dir: PathBuf,
    pub name: String,
    pub version: String,
}

impl ModulePackage {
    /// Directory name used for this package in the output tree.
    pub fn output_name(&self) -> String {
        format!("{}-{}", self.name, self.version)
    }
}

/// Find the nearest ancestor of `dir` (inclusive) holding a named package.
///
/// Manifests that cannot be read or lack a name are skipped.
pub async fn find_module_package(dir: &Path) -> Option<ModulePackage> {
    for candidate in dir.ancestors() {
        let Ok(content) = fs::read_to_string(candidate.join(MANIFEST)).await else {
            continue;
        };
        let Ok(manifest) = serde_json::from_str::<PackageManifest>(&content) else {
            continue;
        };
        if let Some(name) = manifest.name {
            return Some(ModulePackage {
                dir: candidate.to_path_buf(),
                name,
                version: manifest.version.unwrap_or_else(|| "0.0.0".to_string()),
            });
        }
    }
    None
}

/// Relative output path of a resource when bundling is disabled.
pub async fn unbundled_relative_path(path: &Path, project_root: &Path) -> PathBuf {
    let package = match path.parent() {
        Some(dir) => find_module_package(dir).await,
        None => None,
    };
    relative_to_package(path, package.as_ref(), project_root)
}

/// Place `path` below its enclosing package, or below the project root when
/// there is none.
fn relative_to_package(path: &Path, package: Option<&ModulePackage>, project_root: &Path) -> PathBuf {
    match package {
        Some(package) => {
            let inner = path.strip_prefix(&package.dir).unwrap_or(path);
            if package.dir == project_root {
                inner.to_path_buf()
            } else {
                PathBuf::from(package.output_name()).join(inner)
            }
        }
        None => path
            .strip_prefix(project_root)
            .unwrap_or(path)
            .to_path_buf(),
    }
}
