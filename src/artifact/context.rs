//! Per-call request context and write results.

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::Bundle;

/// Per-call context for url derivation.
///
/// Passed explicitly to every writer operation instead of living on the
/// writer, so concurrent writes for different pages never share it.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestContext<'a> {
    /// Bundle referencing the resource being written (e.g. a stylesheet
    /// pointing at an image).
    pub bundle: Option<&'a Bundle>,
    /// Bundle urls are made relative to this path. Overrides the configured
    /// `base_path`.
    pub base_path: Option<&'a Path>,
}

impl<'a> RequestContext<'a> {
    /// Context for a resource referenced from `bundle`.
    pub fn referenced_from(bundle: &'a Bundle) -> Self {
        Self {
            bundle: Some(bundle),
            base_path: None,
        }
    }

    /// Context making bundle urls relative to `base_path`.
    pub fn relative_to(base_path: &'a Path) -> Self {
        Self {
            bundle: None,
            base_path: Some(base_path),
        }
    }

    /// The owning bundle, if it is a stylesheet.
    pub fn stylesheet(&self) -> Option<&'a Bundle> {
        self.bundle.filter(|bundle| bundle.is_stylesheet())
    }
}

/// Where an artifact ended up and how to reference it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRoute {
    /// Public url of the output file.
    pub url: String,
    /// Absolute path of the output file.
    pub output_file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::mime::types;

    #[test]
    fn test_stylesheet_only_for_css_bundles() {
        let css = Bundle::new("main", types::CSS);
        let js = Bundle::new("app", types::JAVASCRIPT);

        assert!(RequestContext::referenced_from(&css).stylesheet().is_some());
        assert!(RequestContext::referenced_from(&js).stylesheet().is_none());
        assert!(RequestContext::default().stylesheet().is_none());
    }

    #[test]
    fn test_output_route_serializes_camel_case() {
        let route = OutputRoute {
            url: "/build/app.js".to_string(),
            output_file: PathBuf::from("/site/build/app.js"),
        };
        let json = serde_json::to_string(&route).unwrap();
        assert_eq!(
            json,
            r#"{"url":"/build/app.js","outputFile":"/site/build/app.js"}"#
        );
    }
}
