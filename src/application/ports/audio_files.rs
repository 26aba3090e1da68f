//! Local audio file port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::speech::AudioData;
use crate::domain::tip::TipFileName;

/// Local audio file errors
#[derive(Debug, Clone, Error)]
pub enum AudioFileError {
    #[error("Audio file not found: {0}")]
    NotFound(String),

    #[error("Failed to read {path}: {message}")]
    ReadFailed { path: String, message: String },

    #[error("Failed to write {path}: {message}")]
    WriteFailed { path: String, message: String },
}

/// Port for the directory holding generated clips
#[async_trait]
pub trait AudioFileStore: Send + Sync {
    /// Whether a clip with this name is already present
    async fn exists(&self, name: &TipFileName) -> bool;

    /// Write (or overwrite) a clip
    async fn write(&self, name: &TipFileName, audio: &AudioData) -> Result<(), AudioFileError>;

    /// Read a clip back for upload
    async fn read(&self, name: &TipFileName) -> Result<AudioData, AudioFileError>;
}
