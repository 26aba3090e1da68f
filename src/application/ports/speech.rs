//! Speech synthesis port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::speech::AudioData;

/// Speech synthesis errors
#[derive(Debug, Clone, Error)]
pub enum SpeechError {
    #[error("No text to speak")]
    EmptyText,

    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    #[error("No audio stream in response")]
    EmptyResponse,

    #[error("TTS request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to decode TTS response: {0}")]
    DecodeError(String),

    #[error("TTS API error: {0}")]
    ApiError(String),
}

/// Port for text-to-speech synthesis
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize the given UTF-8 text into audio.
    async fn synthesize(&self, text: &str) -> Result<AudioData, SpeechError>;
}
