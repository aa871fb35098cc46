//! Visualization descriptors as supplied by the visualization catalog.

use serde::{Deserialize, Serialize};

/// A guided mental-rehearsal experience.
///
/// `steps` is authoritative when present and non-empty; otherwise the
/// materializer fills it from templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visualization {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<VisualizationStep>>,
}

/// One narrated step with its estimated spoken duration in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualizationStep {
    pub id: u32,
    pub content: String,
    pub duration: u32,
}

impl Visualization {
    /// A descriptor with only an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Builder: set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builder: set the steps.
    pub fn with_steps(mut self, steps: Vec<VisualizationStep>) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Whether a non-empty step list is present.
    pub fn has_steps(&self) -> bool {
        self.steps.as_ref().is_some_and(|steps| !steps.is_empty())
    }

    /// Steps as a slice; empty when absent.
    pub fn steps(&self) -> &[VisualizationStep] {
        self.steps.as_deref().unwrap_or_default()
    }

    /// Sum of all step durations, in seconds.
    pub fn total_duration(&self) -> u32 {
        self.steps().iter().map(|step| step.duration).sum()
    }
}
