//! Template store: resolution plus a process-scoped compile cache.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use tokio::sync::Mutex;

use crate::template::ast::CompiledTemplate;
use crate::template::error::TemplateError;
use crate::template::path::TemplatePath;
use crate::template::source::TemplateSource;

/// Default number of compiled templates kept in the cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Resolves template paths through a [`TemplateSource`] and caches the
/// compiled result per path for the life of the process.
///
/// Concurrent first access to one path may load from the backing source more
/// than once; loads are idempotent (template content is deterministic) and the
/// cache converges on a single entry. Cached entries are only dropped under
/// LRU pressure, never invalidated — there is no hot-reload.
pub struct TemplateStore {
    source: Box<dyn TemplateSource>,
    cache: Mutex<LruCache<String, Arc<CompiledTemplate>>>,
}

impl TemplateStore {
    pub fn new(source: Box<dyn TemplateSource>) -> Self {
        Self::with_capacity(source, DEFAULT_CACHE_CAPACITY)
    }

    pub fn with_capacity(source: Box<dyn TemplateSource>, capacity: usize) -> Self {
        // Capacity is clamped so the NonZeroUsize conversion cannot fail.
        let capacity =
            NonZeroUsize::new(capacity.max(1)).expect("clamped capacity is non-zero");
        Self {
            source,
            cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Resolve `path` to its compiled template, loading and compiling on first
    /// access. Fails with [`TemplateError::NotFound`] when the source has no
    /// resource at that path and [`TemplateError::Syntax`] when the source
    /// text does not parse.
    pub async fn get(&self, path: &TemplatePath) -> Result<Arc<CompiledTemplate>, TemplateError> {
        {
            let mut cache = self.cache.lock().await;
            if let Some(template) = cache.get(path.as_str()) {
                tracing::debug!(path = %path, "template cache hit");
                return Ok(Arc::clone(template));
            }
        }

        let source_text = self
            .source
            .load(path)
            .await?
            .ok_or_else(|| TemplateError::not_found(path.as_str()))?;
        let compiled = Arc::new(CompiledTemplate::compile(&source_text)?);

        let mut cache = self.cache.lock().await;
        cache.put(path.as_str().to_string(), Arc::clone(&compiled));
        tracing::debug!(path = %path, backend = self.source.name(), "template loaded and cached");
        Ok(compiled)
    }

    /// Number of templates currently cached. Mostly useful in tests.
    pub async fn cached_len(&self) -> usize {
        self.cache.lock().await.len()
    }
}
