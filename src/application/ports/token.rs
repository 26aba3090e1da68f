//! Access token port interface

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// Authentication errors
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Credentials file not found: {0}. Set AUDIO_TIPS_CREDENTIALS or 'audio-tips config set credentials <path>'")]
    CredentialsNotFound(String),

    #[error("Invalid credentials file: {0}")]
    InvalidCredentials(String),

    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    #[error("Token request failed: {0}")]
    RequestFailed(String),

    #[error("Token endpoint rejected the grant: {0}")]
    Rejected(String),
}

/// Port for OAuth2 bearer tokens used by the cloud adapters
#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    async fn access_token(&self) -> Result<String, AuthError>;
}

#[async_trait]
impl<T: AccessTokenSource + ?Sized> AccessTokenSource for Arc<T> {
    async fn access_token(&self) -> Result<String, AuthError> {
        self.as_ref().access_token().await
    }
}
