//! In-process template store with load-once semantics.

use std::sync::OnceLock;

use super::error::TemplateError;
use super::model::VisualizationTemplates;
use super::source::{EmbeddedSource, TemplateSource};

/// Lazily loads and caches the visualization template mapping.
///
/// The source is read at most once per store. A failed read or parse is
/// logged and cached as an empty mapping; there is no retry and no reset.
pub struct TemplateStore {
    source: Box<dyn TemplateSource>,
    templates: OnceLock<VisualizationTemplates>,
}

impl std::fmt::Debug for TemplateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateStore")
            .field("source", &self.source.describe())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::embedded()
    }
}

impl TemplateStore {
    /// Create a store over the given source. Nothing is read until the
    /// first call to [`load_templates`](Self::load_templates).
    pub fn new(source: impl TemplateSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            templates: OnceLock::new(),
        }
    }

    /// Create a store over the bundled template document.
    pub fn embedded() -> Self {
        Self::new(EmbeddedSource)
    }

    /// Return the template mapping, loading it on first access.
    ///
    /// Concurrent first callers block on a single load and all observe the
    /// same mapping.
    pub fn load_templates(&self) -> &VisualizationTemplates {
        self.templates.get_or_init(|| load_from(self.source.as_ref()))
    }

    /// Whether the first load has completed.
    pub fn is_loaded(&self) -> bool {
        self.templates.get().is_some()
    }
}

/// Parse a raw read result, degrading any failure to an empty mapping.
pub(crate) fn parse_or_empty(
    name: &str,
    raw: Result<String, TemplateError>,
) -> VisualizationTemplates {
    let parsed = raw.and_then(|json| VisualizationTemplates::from_json(&json));
    match parsed {
        Ok(templates) => {
            log::debug!(
                "Loaded templates for {} visualizations from {}",
                templates.len(),
                name
            );
            templates
        }
        Err(e) => {
            log::error!("Failed to load visualization templates from {}: {}", name, e);
            VisualizationTemplates::empty()
        }
    }
}

fn load_from(source: &dyn TemplateSource) -> VisualizationTemplates {
    parse_or_empty(&source.describe(), source.read())
}

/// Global store over the embedded templates.
static GLOBAL_STORE: OnceLock<TemplateStore> = OnceLock::new();

/// Get the process-wide template store.
pub fn global_store() -> &'static TemplateStore {
    GLOBAL_STORE.get_or_init(TemplateStore::embedded)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    /// Serves a fixed document and counts reads.
    #[derive(Clone)]
    pub(crate) struct CountingSource {
        pub(crate) raw: Option<String>,
        pub(crate) reads: Arc<AtomicUsize>,
    }

    impl CountingSource {
        pub(crate) fn new(raw: &str) -> Self {
            Self {
                raw: Some(raw.to_string()),
                reads: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub(crate) fn missing() -> Self {
            Self {
                raw: None,
                reads: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub(crate) fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }
    }

    impl TemplateSource for CountingSource {
        fn describe(&self) -> String {
            "counting test source".to_string()
        }

        fn read(&self) -> Result<String, TemplateError> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.raw.clone().ok_or_else(|| TemplateError::Io {
                source_name: self.describe(),
                error: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            })
        }
    }

    pub(crate) const BATMAN_JSON: &str =
        r#"{"batman-effect": [{"stepNumber": 0, "template": "Close your eyes and breathe."}]}"#;

    #[test]
    fn test_loads_lazily_and_once() {
        let source = CountingSource::new(BATMAN_JSON);
        let store = TemplateStore::new(source.clone());
        assert!(!store.is_loaded());
        assert_eq!(source.reads(), 0);

        let first = store.load_templates();
        let second = store.load_templates();
        assert!(store.is_loaded());
        assert_eq!(source.reads(), 1);
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.len(), 1);
    }

    #[test]
    fn test_missing_resource_degrades_to_empty_without_retry() {
        let _ = env_logger::builder().is_test(true).try_init();
        let source = CountingSource::missing();
        let store = TemplateStore::new(source.clone());
        assert!(store.load_templates().is_empty());
        assert!(store.load_templates().is_empty());
        assert_eq!(source.reads(), 1);
    }

    #[test]
    fn test_malformed_resource_degrades_to_empty() {
        let store = TemplateStore::new(CountingSource::new("{\"oops\": "));
        assert!(store.load_templates().is_empty());
    }

    #[test]
    fn test_concurrent_first_access_reads_once() {
        let source = CountingSource::new(BATMAN_JSON);
        let store = TemplateStore::new(source.clone());

        let addresses: Vec<usize> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    scope.spawn(|| store.load_templates() as *const VisualizationTemplates as usize)
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(source.reads(), 1);
        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_embedded_store_has_bundled_visualizations() {
        let store = TemplateStore::embedded();
        let templates = store.load_templates();
        assert!(templates.contains("batman-effect"));
        assert!(templates.contains("pre-game-focus"));
        assert_eq!(
            templates.get("batman-effect").unwrap()[0].template,
            "Close your eyes and breathe."
        );
    }

    #[test]
    fn test_global_store_is_shared() {
        assert!(std::ptr::eq(global_store(), global_store()));
        assert!(!global_store().load_templates().is_empty());
    }
}
