//! Template source backends.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;

use crate::template::error::TemplateError;
use crate::template::path::TemplatePath;

/// Backing storage for template source text.
///
/// Implementations decide how a [`TemplatePath`] maps to a resource. The
/// trait is async so remote or database-backed sources stay possible; the
/// bundled backends read the local filesystem or an in-memory registry.
#[async_trait]
pub trait TemplateSource: Send + Sync {
    /// Load raw template source for `path`. Returns `Ok(None)` when the source
    /// has no resource at that path; the store turns that into
    /// [`TemplateError::NotFound`].
    async fn load(&self, path: &TemplatePath) -> Result<Option<String>, TemplateError>;

    /// Short backend name used in logs.
    fn name(&self) -> &'static str;
}

/// Filesystem-backed source rooted at a base directory.
///
/// Paths resolve relative to the base directory; absolute paths and `..`
/// segments never escape it. With a default extension configured, a path
/// whose final segment carries no extension is also tried with the extension
/// appended, so `"assistant/greeting"` can address `assistant/greeting.mustache`.
pub struct FsTemplateSource {
    base_dir: PathBuf,
    default_extension: Option<String>,
}

impl FsTemplateSource {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            default_extension: None,
        }
    }

    /// Extension (without the leading dot) tried when a path has none.
    pub fn with_default_extension(mut self, extension: impl Into<String>) -> Self {
        self.default_extension = Some(extension.into());
        self
    }

    fn candidates(&self, relative: &Path) -> Vec<PathBuf> {
        let primary = self.base_dir.join(relative);
        let mut candidates = vec![primary.clone()];
        if relative.extension().is_none() {
            if let Some(extension) = &self.default_extension {
                candidates.push(primary.with_extension(extension));
            }
        }
        candidates
    }
}

#[async_trait]
impl TemplateSource for FsTemplateSource {
    async fn load(&self, path: &TemplatePath) -> Result<Option<String>, TemplateError> {
        let relative = Path::new(path.as_str());
        let escapes_base = relative.is_absolute()
            || relative
                .components()
                .any(|component| matches!(component, Component::ParentDir));
        if escapes_base {
            tracing::warn!(path = %path, "template path escapes the base directory");
            return Ok(None);
        }

        for candidate in self.candidates(relative) {
            match tokio::fs::read_to_string(&candidate).await {
                Ok(content) => return Ok(Some(content)),
                Err(error) if error.kind() == ErrorKind::NotFound => continue,
                Err(error) => {
                    return Err(TemplateError::Io {
                        path: path.to_string(),
                        source: error,
                    })
                }
            }
        }
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "fs"
    }
}

/// In-memory source for embedded templates and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateSource {
    templates: HashMap<String, String>,
}

impl InMemoryTemplateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(
        mut self,
        path: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        self.insert(path, source);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, source: impl Into<String>) {
        self.templates.insert(path.into(), source.into());
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[async_trait]
impl TemplateSource for InMemoryTemplateSource {
    async fn load(&self, path: &TemplatePath) -> Result<Option<String>, TemplateError> {
        Ok(self.templates.get(path.as_str()).cloned())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_load_present_and_absent() {
        let source = InMemoryTemplateSource::new().with_template("greet", "Hello {{name}}");
        let found = source.load(&TemplatePath::new("greet")).await.unwrap();
        assert_eq!(found.as_deref(), Some("Hello {{name}}"));
        let missing = source.load(&TemplatePath::new("other")).await.unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_fs_candidates_respect_existing_extension() {
        let source = FsTemplateSource::new("/prompts").with_default_extension("mustache");
        let with_extension = source.candidates(Path::new("a/b.txt"));
        assert_eq!(with_extension, vec![PathBuf::from("/prompts/a/b.txt")]);
        let without_extension = source.candidates(Path::new("a/b"));
        assert_eq!(
            without_extension,
            vec![
                PathBuf::from("/prompts/a/b"),
                PathBuf::from("/prompts/a/b.mustache"),
            ]
        );
    }
}
