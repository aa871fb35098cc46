//! In-memory cache of synthesized narration audio.
//!
//! Each key holds a shared once-cell, so concurrent requests for the same
//! narration wait on one synthesis instead of each calling the provider.
//! A failed synthesis leaves the cell empty and the next request retries.

use std::sync::Arc;

use bytes::Bytes;
use dashmap::DashMap;
use futures::future::try_join_all;
use tokio::sync::OnceCell;

use super::error::NarrationError;
use super::synthesizer::{SpeechRequest, SpeechSynthesizer};
use crate::visualizations::{Visualization, VisualizationStep};

/// Identifies one narrated step.
///
/// The text is part of the key so that personalized narration for different
/// athletes is cached separately.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NarrationKey {
    pub visualization_id: String,
    pub step_id: u32,
    pub voice: String,
    pub text: String,
}

/// Caches synthesized audio per [`NarrationKey`].
pub struct NarrationCache<S> {
    synthesizer: S,
    entries: DashMap<NarrationKey, Arc<OnceCell<Bytes>>>,
}

impl<S: SpeechSynthesizer> NarrationCache<S> {
    pub fn new(synthesizer: S) -> Self {
        Self {
            synthesizer,
            entries: DashMap::new(),
        }
    }

    pub fn synthesizer(&self) -> &S {
        &self.synthesizer
    }

    /// Audio for one step of a visualization, synthesized on first request.
    ///
    /// Steps with blank content have nothing to narrate and yield empty audio
    /// without calling the synthesizer.
    pub async fn audio_for_step(
        &self,
        visualization_id: &str,
        step: &VisualizationStep,
    ) -> Result<Bytes, NarrationError> {
        if step.content.trim().is_empty() {
            return Ok(Bytes::new());
        }

        let key = NarrationKey {
            visualization_id: visualization_id.to_string(),
            step_id: step.id,
            voice: self.synthesizer.voice().to_string(),
            text: step.content.clone(),
        };

        // Clone the cell out so no map guard is held across the await.
        let cell = Arc::clone(self.entries.entry(key.clone()).or_default().value());

        let result = cell
            .get_or_try_init(|| async {
                log::debug!(
                    "Synthesizing narration for {} step {}",
                    visualization_id,
                    step.id
                );
                self.synthesizer.synthesize(&self.request_for(step)).await
            })
            .await;

        match result {
            Ok(audio) => Ok(audio.clone()),
            Err(e) => {
                self.entries.remove_if(&key, |_, entry| {
                    Arc::ptr_eq(entry, &cell) && !entry.initialized()
                });
                Err(e)
            }
        }
    }

    /// Speech request for a step using the synthesizer's voice, model and speed.
    pub(crate) fn request_for(&self, step: &VisualizationStep) -> SpeechRequest {
        SpeechRequest::new(
            step.content.clone(),
            self.synthesizer.voice(),
            self.synthesizer.model(),
        )
        .with_speed(self.synthesizer.speed())
    }

    /// Synthesize every step of `visualization` concurrently.
    ///
    /// Returns audio in step order, or the first error encountered.
    pub async fn prefetch(
        &self,
        visualization: &Visualization,
    ) -> Result<Vec<Bytes>, NarrationError> {
        try_join_all(
            visualization
                .steps()
                .iter()
                .map(|step| self.audio_for_step(&visualization.id, step)),
        )
        .await
    }

    /// Number of keys holding audio.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.value().initialized())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all cached audio.
    pub fn clear(&self) {
        self.entries.clear();
    }
}
