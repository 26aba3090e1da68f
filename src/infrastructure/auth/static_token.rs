//! Pre-issued access token

use async_trait::async_trait;

use crate::application::ports::{AccessTokenSource, AuthError};

/// Token supplied from outside, e.g. `gcloud auth print-access-token`
pub struct StaticTokenSource {
    token: String,
}

impl StaticTokenSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl AccessTokenSource for StaticTokenSource {
    async fn access_token(&self) -> Result<String, AuthError> {
        Ok(self.token.clone())
    }
}
