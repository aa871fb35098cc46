//! Narration synthesis errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NarrationError {
    /// No API key configured or in `OPENAI_API_KEY`.
    #[error("OpenAI API key not set. Set OPENAI_API_KEY or pass an api_key")]
    MissingApiKey,

    /// Nothing to say.
    #[error("Cannot synthesize empty narration text")]
    EmptyText,

    /// The provider rejected the request.
    #[error("Speech API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Retries exhausted on rate limits, server errors or transport failures.
    #[error("Speech API unavailable after {attempts} attempts: {last}")]
    Unavailable { attempts: u32, last: String },

    /// Any other synthesizer failure.
    #[error("Synthesis failed: {0}")]
    Synthesis(String),
}
