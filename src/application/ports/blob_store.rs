//! Blob storage port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::speech::AudioData;

/// Blob storage errors
#[derive(Debug, Clone, Error)]
pub enum BlobStoreError {
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Bucket not found: {0}")]
    BucketNotFound(String),

    #[error("Storage request failed: {0}")]
    RequestFailed(String),

    #[error("Storage API error: {0}")]
    ApiError(String),
}

/// Port for the remote object store holding published clips
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Upload bytes to `object_name`, replacing any existing object
    async fn upload(&self, object_name: &str, audio: &AudioData) -> Result<(), BlobStoreError>;

    /// Make the object publicly readable and return its public URL
    async fn make_public(&self, object_name: &str) -> Result<String, BlobStoreError>;
}
