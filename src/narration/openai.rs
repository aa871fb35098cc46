//! OpenAI text-to-speech client.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::{json, Value};

use super::error::NarrationError;
use super::synthesizer::{SpeechRequest, SpeechSynthesizer};
use crate::config::NarrationConfig;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Speech synthesis through the OpenAI `audio/speech` endpoint.
///
/// Rate limits (429), server errors (5xx) and transport failures are retried
/// with exponential backoff; other 4xx responses fail immediately.
#[derive(Debug, Clone)]
pub struct OpenAiSpeech {
    api_key: Option<String>,
    base_url: String,
    model: String,
    voice: String,
    speed: f32,
    timeout: Duration,
    max_retries: u32,
    client: reqwest::Client,
}

impl OpenAiSpeech {
    /// Create a client from narration settings.
    ///
    /// `api_key` defaults to the `OPENAI_API_KEY` environment variable.
    pub fn new(config: &NarrationConfig, api_key: Option<String>) -> Self {
        let api_key = api_key.or_else(|| std::env::var("OPENAI_API_KEY").ok());
        Self {
            api_key,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: config.model.clone(),
            voice: config.voice.clone(),
            speed: config.speed,
            timeout: Duration::from_secs(config.timeout_secs),
            max_retries: config.max_retries,
            client: reqwest::Client::new(),
        }
    }

    /// Endpoint the requests are posted to.
    pub fn endpoint(&self) -> String {
        format!("{}/audio/speech", self.base_url.trim_end_matches('/'))
    }

    /// JSON body for `request`, falling back to this client's defaults for
    /// blank fields.
    pub fn build_request_body(&self, request: &SpeechRequest) -> Value {
        let model = non_blank(&request.model).unwrap_or(self.model.as_str());
        let voice = non_blank(&request.voice).unwrap_or(self.voice.as_str());
        let speed = if request.speed > 0.0 {
            request.speed
        } else {
            self.speed
        };
        json!({
            "model": model,
            "input": request.text,
            "voice": voice,
            "speed": speed,
            "response_format": "mp3",
        })
    }
}

fn non_blank(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAiSpeech {
    fn voice(&self) -> &str {
        &self.voice
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn speed(&self) -> f32 {
        self.speed
    }

    async fn synthesize(&self, request: &SpeechRequest) -> Result<Bytes, NarrationError> {
        if request.text.trim().is_empty() {
            return Err(NarrationError::EmptyText);
        }
        let api_key = self.api_key.as_ref().ok_or(NarrationError::MissingApiKey)?;

        let endpoint = self.endpoint();
        let body = self.build_request_body(request);
        log::debug!(
            "OpenAiSpeech.synthesize: model={}, voice={}, chars={}",
            body["model"],
            body["voice"],
            request.text.len()
        );

        let mut last_error = String::new();
        let mut retry_delay = Duration::from_secs(1);

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                log::warn!(
                    "Speech API retry attempt {} after {:?}: {}",
                    attempt,
                    retry_delay,
                    last_error
                );
                tokio::time::sleep(retry_delay).await;
                retry_delay *= 2;
            }

            let response = match self
                .client
                .post(&endpoint)
                .timeout(self.timeout)
                .bearer_auth(api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(resp) => resp,
                Err(e) => {
                    last_error = e.to_string();
                    continue;
                }
            };

            let status = response.status();
            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                last_error = "rate limited (429)".to_string();
                continue;
            }
            if status.is_server_error() {
                last_error = format!("server error {}", status);
                continue;
            }
            if status.is_client_error() {
                let body = response.text().await.unwrap_or_default();
                return Err(NarrationError::Api {
                    status: status.as_u16(),
                    body: body.chars().take(500).collect(),
                });
            }

            match response.bytes().await {
                Ok(audio) => return Ok(audio),
                Err(e) => {
                    last_error = e.to_string();
                    continue;
                }
            }
        }

        Err(NarrationError::Unavailable {
            attempts: self.max_retries + 1,
            last: last_error,
        })
    }
}
