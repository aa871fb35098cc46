//! Expands visualization descriptors into timed narration steps.

use crate::templates::{global_store, AsyncTemplateStore, TemplateStore, VisualizationTemplates};
use crate::utilities::duration::{estimate_duration_at, WORDS_PER_MINUTE};
use crate::visualizations::{Visualization, VisualizationStep};

/// Fill in a visualization's steps from `templates`.
///
/// Existing non-empty steps always win and are returned untouched. A missing
/// template entry is logged and the input is returned as-is. Otherwise each
/// template entry becomes a step in template order; placeholders are kept
/// verbatim.
pub fn materialize(
    templates: &VisualizationTemplates,
    visualization: Visualization,
    words_per_minute: u32,
) -> Visualization {
    if visualization.has_steps() {
        return visualization;
    }
    materialize_missing(templates, visualization, words_per_minute)
}

fn materialize_missing(
    templates: &VisualizationTemplates,
    visualization: Visualization,
    words_per_minute: u32,
) -> Visualization {
    let Some(entries) = templates.get(&visualization.id) else {
        log::warn!("No templates found for visualization '{}'", visualization.id);
        return visualization;
    };

    let steps = entries
        .iter()
        .map(|entry| VisualizationStep {
            id: entry.step_number,
            content: entry.template.clone(),
            duration: estimate_duration_at(&entry.template, words_per_minute),
        })
        .collect();

    Visualization {
        steps: Some(steps),
        ..visualization
    }
}

/// Materializer bound to a template store and narration rate.
#[derive(Debug, Clone, Copy)]
pub struct StepMaterializer<'a> {
    store: &'a TemplateStore,
    words_per_minute: u32,
}

impl<'a> StepMaterializer<'a> {
    pub fn new(store: &'a TemplateStore) -> Self {
        Self {
            store,
            words_per_minute: WORDS_PER_MINUTE,
        }
    }

    /// Override the narration rate used for duration estimates.
    pub fn with_words_per_minute(mut self, words_per_minute: u32) -> Self {
        self.words_per_minute = words_per_minute;
        self
    }

    /// Return `visualization` with a populated step list.
    ///
    /// The store is not touched when steps are already present.
    pub fn materialize(&self, visualization: Visualization) -> Visualization {
        if visualization.has_steps() {
            return visualization;
        }
        materialize_missing(
            self.store.load_templates(),
            visualization,
            self.words_per_minute,
        )
    }
}

/// Populate a visualization's steps from the bundled templates.
///
/// Entry point for screens that display or play a visualization.
pub fn get_visualization_with_templates(visualization: Visualization) -> Visualization {
    StepMaterializer::new(global_store()).materialize(visualization)
}

/// Async variant over an [`AsyncTemplateStore`].
pub async fn materialize_async(
    store: &AsyncTemplateStore,
    visualization: Visualization,
    words_per_minute: u32,
) -> Visualization {
    if visualization.has_steps() {
        return visualization;
    }
    let templates = store.load_templates().await;
    materialize_missing(templates, visualization, words_per_minute)
}
