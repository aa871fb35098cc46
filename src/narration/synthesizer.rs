//! Text-to-speech abstraction.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::error::NarrationError;

/// A single text-to-speech request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
    pub voice: String,
    pub model: String,
    /// Playback speed multiplier, 1.0 is normal.
    pub speed: f32,
}

impl SpeechRequest {
    pub fn new(
        text: impl Into<String>,
        voice: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            voice: voice.into(),
            model: model.into(),
            speed: 1.0,
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }
}

/// Produces encoded audio for narration text.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Voice used when the caller does not pick one.
    fn voice(&self) -> &str;

    /// Model used when the caller does not pick one.
    fn model(&self) -> &str;

    /// Playback speed multiplier applied to cached narration.
    fn speed(&self) -> f32 {
        1.0
    }

    /// Synthesize audio for `request`.
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Bytes, NarrationError>;
}
