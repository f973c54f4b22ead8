//! Logical template identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical identifier of a template resource.
///
/// A path is an opaque string as far as the store is concerned; the configured
/// [`TemplateSource`](crate::template::TemplateSource) decides how to interpret
/// it. By convention paths use `/` separators for namespacing, so different
/// services can keep their templates in distinct directories without
/// collision, e.g. `"assistant/user-greeting"`.
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplatePath(String);

impl TemplatePath {
    pub fn new(path: impl Into<String>) -> Self {
        TemplatePath(path.into())
    }

    /// Build a path under a logical namespace: `namespaced("assistant", "greeting")`
    /// yields `"assistant/greeting"`.
    pub fn namespaced(namespace: &str, name: &str) -> Self {
        TemplatePath(format!("{}/{}", namespace, name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplatePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TemplatePath {
    fn from(path: &str) -> Self {
        TemplatePath::new(path)
    }
}

impl From<String> for TemplatePath {
    fn from(path: String) -> Self {
        TemplatePath(path)
    }
}
