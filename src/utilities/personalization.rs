//! Placeholder substitution for narration text.
//!
//! Templates carry `{placeholder}` markers (`{name}`, `{sport}`, ...) that are
//! replaced with an athlete's details before narration.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::utilities::duration::estimate_duration_at;
use crate::visualizations::{Visualization, VisualizationStep};

static PLACEHOLDER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_\-]*)\}").unwrap());

/// Values substituted into templates, keyed by placeholder name.
pub type PersonalizationContext = HashMap<String, String>;

/// Athlete details available to narration templates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AthleteProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sport: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

impl AthleteProfile {
    /// Substitution map for this profile. Unset or blank fields are omitted so
    /// their placeholders stay visible.
    pub fn context(&self) -> PersonalizationContext {
        [
            ("name", &self.name),
            ("sport", &self.sport),
            ("position", &self.position),
            ("goal", &self.goal),
            ("team", &self.team),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| (key.to_string(), v.to_string()))
        })
        .collect()
    }
}

/// Placeholder names in `text`, in first-appearance order without repeats.
pub fn placeholders(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for cap in PLACEHOLDER_PATTERN.captures_iter(text) {
        let name = &cap[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Replace known placeholders in `text`.
///
/// Placeholders without a value are left as written. Braces that do not form
/// a placeholder (for example JSON) are untouched.
pub fn personalize(text: &str, context: &PersonalizationContext) -> String {
    if !text.contains('{') {
        return text.to_string();
    }

    PLACEHOLDER_PATTERN
        .replace_all(text, |cap: &Captures<'_>| match context.get(&cap[1]) {
            Some(value) => value.clone(),
            None => {
                log::debug!("No value for placeholder '{}', leaving it in place", &cap[1]);
                cap[0].to_string()
            }
        })
        .into_owned()
}

/// Personalize every step of a visualization, re-estimating durations for
/// the substituted text.
pub fn personalize_visualization(
    visualization: &Visualization,
    context: &PersonalizationContext,
    words_per_minute: u32,
) -> Visualization {
    let steps = visualization.steps.as_ref().map(|steps| {
        steps
            .iter()
            .map(|step| {
                let content = personalize(&step.content, context);
                VisualizationStep {
                    id: step.id,
                    duration: estimate_duration_at(&content, words_per_minute),
                    content,
                }
            })
            .collect()
    });

    Visualization {
        steps,
        ..visualization.clone()
    }
}
