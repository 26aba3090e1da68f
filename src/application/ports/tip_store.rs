//! Document store port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::tip::{StoredTip, TipRecord};

/// Document store errors
#[derive(Debug, Clone, Error)]
pub enum TipStoreError {
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Document store request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse document store response: {0}")]
    ParseError(String),

    #[error("Document store API error: {0}")]
    ApiError(String),
}

/// Port for the collection of tip records
#[async_trait]
pub trait TipStore: Send + Sync {
    /// Insert one record; returns the identifier assigned by the store
    async fn insert(&self, record: &TipRecord) -> Result<String, TipStoreError>;

    /// Fetch every record in the collection
    async fn list(&self) -> Result<Vec<StoredTip>, TipStoreError>;
}
