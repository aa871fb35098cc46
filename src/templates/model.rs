//! Strongly-typed template mapping and its validating parser.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::TemplateError;

/// One raw narration step template, as stored in the bundled resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateEntry {
    /// Zero-based position of the step within its visualization.
    pub step_number: u32,
    /// Narration text; may contain `{placeholder}` markers.
    pub template: String,
}

/// Mapping of visualization id to its ordered template entries.
///
/// Built once per store and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisualizationTemplates {
    entries: HashMap<String, Vec<TemplateEntry>>,
}

impl VisualizationTemplates {
    /// An empty mapping.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse and validate a template document.
    ///
    /// The top level must be an object. Visualizations whose value is not an
    /// array and individual entries that fail to deserialize are skipped with
    /// a warning. Entry order is kept as written.
    pub fn from_json(json: &str) -> Result<Self, TemplateError> {
        let document: Value = serde_json::from_str(json)?;
        let map = match document {
            Value::Object(map) => map,
            other => {
                return Err(TemplateError::Format(format!(
                    "expected an object of visualization ids, found {}",
                    json_kind(&other)
                )));
            }
        };

        let mut entries = HashMap::with_capacity(map.len());
        for (id, value) in map {
            let raw_entries = match value {
                Value::Array(raw_entries) => raw_entries,
                other => {
                    log::warn!(
                        "Skipping templates for '{}': expected an array, found {}",
                        id,
                        json_kind(&other)
                    );
                    continue;
                }
            };

            let mut steps: Vec<TemplateEntry> = Vec::with_capacity(raw_entries.len());
            for (index, raw) in raw_entries.into_iter().enumerate() {
                match serde_json::from_value::<TemplateEntry>(raw) {
                    Ok(entry) => {
                        if let Some(prev) = steps.last() {
                            if entry.step_number <= prev.step_number {
                                log::warn!(
                                    "Templates for '{}' are out of order: step {} follows step {}",
                                    id,
                                    entry.step_number,
                                    prev.step_number
                                );
                            }
                        }
                        steps.push(entry);
                    }
                    Err(e) => {
                        log::warn!("Skipping template entry {} of '{}': {}", index, id, e);
                    }
                }
            }
            entries.insert(id, steps);
        }

        Ok(Self { entries })
    }

    /// Template entries for a visualization, in resource order.
    pub fn get(&self, id: &str) -> Option<&[TemplateEntry]> {
        self.entries.get(id).map(Vec::as_slice)
    }

    /// Whether a visualization has an entry (possibly an empty list).
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Number of visualizations in the mapping.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Visualization ids, sorted for stable output.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl From<HashMap<String, Vec<TemplateEntry>>> for VisualizationTemplates {
    fn from(entries: HashMap<String, Vec<TemplateEntry>>) -> Self {
        Self { entries }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
