//! # Visualization Narration
//!
//! Turns guided-visualization descriptors into timed narration for athletes.
//!
//! Narration scripts live in a template document keyed by visualization id.
//! The pipeline loads that document once, expands a visualization into
//! ordered steps with estimated spoken durations, substitutes athlete
//! details into the text, and synthesizes and caches the narration audio.
//!
//! ```no_run
//! use visualization_narration::{get_visualization_with_templates, Visualization};
//!
//! let visualization = get_visualization_with_templates(Visualization::new("batman-effect"));
//! for step in visualization.steps() {
//!     println!("[{}s] {}", step.duration, step.content);
//! }
//! ```

pub mod config;
pub mod materializer;
pub mod narration;
pub mod templates;
pub mod utilities;
pub mod visualizations;

pub use config::{ConfigError, NarrationConfig, PipelineConfig};
pub use materializer::{
    get_visualization_with_templates, materialize, materialize_async, StepMaterializer,
};
pub use narration::{NarrationCache, NarrationError, OpenAiSpeech, SpeechSynthesizer};
pub use templates::{AsyncTemplateStore, TemplateError, TemplateStore, VisualizationTemplates};
pub use utilities::duration::{estimate_duration, WORDS_PER_MINUTE};
pub use utilities::personalization::{personalize, AthleteProfile};
pub use visualizations::{Visualization, VisualizationStep};
