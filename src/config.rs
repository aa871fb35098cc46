//! Pipeline configuration.
//!
//! Every field has a default, so an empty document yields the standard setup:
//! 150 words per minute and the bundled template resource.
//!
//! ```yaml
//! words_per_minute: 150
//! template_path: assets/visualization_templates.json
//! narration:
//!   model: tts-1
//!   voice: alloy
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::materializer::StepMaterializer;
use crate::templates::{FileSource, TemplateStore};
use crate::utilities::duration::WORDS_PER_MINUTE;

const MAX_SPEECH_SPEED: f32 = 4.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level settings for template loading, timing and narration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Narration rate used for duration estimates.
    pub words_per_minute: u32,
    /// Template document on disk; the bundled one is used when unset.
    pub template_path: Option<PathBuf>,
    pub narration: NarrationConfig,
}

/// Text-to-speech settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    pub model: String,
    pub voice: String,
    pub speed: f32,
    /// API base URL; the public OpenAI endpoint when unset.
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            words_per_minute: WORDS_PER_MINUTE,
            template_path: None,
            narration: NarrationConfig::default(),
        }
    }
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            model: "tts-1".to_string(),
            voice: "alloy".to_string(),
            speed: 1.0,
            base_url: None,
            timeout_secs: 60,
            max_retries: 2,
        }
    }
}

impl PipelineConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.words_per_minute == 0 {
            return Err(ConfigError::Invalid(
                "words_per_minute must be greater than zero".to_string(),
            ));
        }
        let speed = self.narration.speed;
        if !(speed > 0.0 && speed <= MAX_SPEECH_SPEED) {
            return Err(ConfigError::Invalid(format!(
                "narration.speed must be in (0, {}], got {}",
                MAX_SPEECH_SPEED, speed
            )));
        }
        if self.narration.voice.trim().is_empty() || self.narration.model.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "narration.voice and narration.model must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// A template store over the configured resource.
    pub fn template_store(&self) -> TemplateStore {
        match &self.template_path {
            Some(path) => TemplateStore::new(FileSource::new(path)),
            None => TemplateStore::embedded(),
        }
    }

    /// A materializer over `store` at the configured rate.
    pub fn materializer<'a>(&self, store: &'a TemplateStore) -> StepMaterializer<'a> {
        StepMaterializer::new(store).with_words_per_minute(self.words_per_minute)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visualizations::Visualization;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = PipelineConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.words_per_minute, 150);
        assert!(config.template_path.is_none());
        assert_eq!(config.narration.voice, "alloy");
    }

    #[test]
    fn test_partial_document() {
        let yaml = "words_per_minute: 120\nnarration:\n  voice: nova\n";
        let config = PipelineConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.words_per_minute, 120);
        assert_eq!(config.narration.voice, "nova");
        assert_eq!(config.narration.model, "tts-1");
        assert_eq!(config.narration.max_retries, 2);
    }

    #[test]
    fn test_rejects_zero_rate() {
        let err = PipelineConfig::from_yaml_str("words_per_minute: 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("words_per_minute"));
    }

    #[test]
    fn test_rejects_bad_speed() {
        assert!(PipelineConfig::from_yaml_str("narration:\n  speed: 0").is_err());
        assert!(PipelineConfig::from_yaml_str("narration:\n  speed: 5.5").is_err());
    }

    #[test]
    fn test_invalid_yaml() {
        let err = PipelineConfig::from_yaml_str("words_per_minute: [[[").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn test_from_file_with_template_path() {
        let dir = tempfile::tempdir().unwrap();
        let templates = dir.path().join("templates.json");
        std::fs::write(
            &templates,
            r#"{"custom": [{"stepNumber": 0, "template": "Stand tall and breathe deeply now."}]}"#,
        )
        .unwrap();
        let config_path = dir.path().join("pipeline.yaml");
        std::fs::write(
            &config_path,
            format!(
                "words_per_minute: 60\ntemplate_path: {}\n",
                templates.display()
            ),
        )
        .unwrap();

        let config = PipelineConfig::from_yaml_file(&config_path).unwrap();
        let store = config.template_store();
        let output = config
            .materializer(&store)
            .materialize(Visualization::new("custom"));
        assert_eq!(output.steps().len(), 1);
        assert_eq!(output.steps()[0].duration, 6);
    }

    #[test]
    fn test_missing_file() {
        let err = PipelineConfig::from_yaml_file("/nonexistent/pipeline.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
