//! Narration audio: text-to-speech providers and the audio cache.

pub mod cache;
pub mod error;
pub mod openai;
pub mod synthesizer;

pub use cache::{NarrationCache, NarrationKey};
pub use error::NarrationError;
pub use openai::OpenAiSpeech;
pub use synthesizer::{SpeechRequest, SpeechSynthesizer};
