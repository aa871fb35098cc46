//! Template store whose first load may suspend.

use tokio::sync::OnceCell;

use super::model::VisualizationTemplates;
use super::source::AsyncTemplateSource;
use super::store::parse_or_empty;

/// Async counterpart of [`TemplateStore`](super::store::TemplateStore).
///
/// Callers racing on the first load all await the same read; later calls
/// return the cached mapping without suspending.
pub struct AsyncTemplateStore {
    source: Box<dyn AsyncTemplateSource>,
    templates: OnceCell<VisualizationTemplates>,
}

impl std::fmt::Debug for AsyncTemplateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncTemplateStore")
            .field("source", &self.source.describe())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl AsyncTemplateStore {
    pub fn new(source: impl AsyncTemplateSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            templates: OnceCell::new(),
        }
    }

    /// Return the template mapping, loading it on first access.
    ///
    /// Never fails; load errors are logged and cached as an empty mapping.
    pub async fn load_templates(&self) -> &VisualizationTemplates {
        self.templates
            .get_or_init(|| async {
                let name = self.source.describe();
                let raw = self.source.read().await;
                parse_or_empty(&name, raw)
            })
            .await
    }

    pub fn is_loaded(&self) -> bool {
        self.templates.initialized()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::templates::store::tests::{CountingSource, BATMAN_JSON};
    use crate::templates::TemplateError;

    /// Yields before answering so racing callers overlap.
    struct SlowSource {
        reads: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl AsyncTemplateSource for SlowSource {
        fn describe(&self) -> String {
            "slow test source".to_string()
        }

        async fn read(&self) -> Result<String, TemplateError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok(BATMAN_JSON.to_string())
        }
    }

    #[tokio::test]
    async fn test_concurrent_first_calls_share_one_load() {
        let reads = Arc::new(AtomicUsize::new(0));
        let store = AsyncTemplateStore::new(SlowSource {
            reads: Arc::clone(&reads),
        });

        let (a, b) = tokio::join!(store.load_templates(), store.load_templates());
        assert!(std::ptr::eq(a, b));
        assert_eq!(reads.load(Ordering::SeqCst), 1);
        assert!(a.contains("batman-effect"));
    }

    #[tokio::test]
    async fn test_failed_load_is_cached_empty() {
        let source = CountingSource::missing();
        let store = AsyncTemplateStore::new(source.clone());
        assert!(!store.is_loaded());
        assert!(store.load_templates().await.is_empty());
        assert!(store.load_templates().await.is_empty());
        assert!(store.is_loaded());
        assert_eq!(source.reads(), 1);
    }
}
