//! Service-account credentials and the OAuth2 JWT-bearer grant

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::sync::Mutex;

use crate::application::ports::{AccessTokenSource, AuthError};

/// Scope covering Cloud Storage and Firestore
pub const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for the signed assertion
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Refresh this long before the token actually expires
const EXPIRY_MARGIN_SECS: i64 = 60;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The subset of a service-account key file this tool needs
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type")]
    pub key_type: Option<String>,
    pub project_id: Option<String>,
    pub private_key_id: Option<String>,
    pub private_key: String,
    pub client_email: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl ServiceAccountKey {
    /// Read and parse a key file
    pub async fn from_file(path: &Path) -> Result<Self, AuthError> {
        if !path.exists() {
            return Err(AuthError::CredentialsNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| AuthError::InvalidCredentials(format!("{}: {}", path.display(), e)))?;

        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, AuthError> {
        let key: Self = serde_json::from_str(content)
            .map_err(|e| AuthError::InvalidCredentials(e.to_string()))?;

        if let Some(kind) = key.key_type.as_deref() {
            if kind != "service_account" {
                return Err(AuthError::InvalidCredentials(format!(
                    "expected a service_account key, got \"{}\"",
                    kind
                )));
            }
        }

        Ok(key)
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<i64>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) < self.expires_at
    }
}

/// Exchanges a signed JWT for an access token and caches it until expiry
pub struct ServiceAccountTokenSource {
    key: ServiceAccountKey,
    signing_key: EncodingKey,
    scope: String,
    client: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountTokenSource {
    pub fn new(key: ServiceAccountKey) -> Result<Self, AuthError> {
        Self::with_scope(key, CLOUD_PLATFORM_SCOPE)
    }

    pub fn with_scope(key: ServiceAccountKey, scope: impl Into<String>) -> Result<Self, AuthError> {
        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| AuthError::InvalidKey(e.to_string()))?;

        Ok(Self {
            key,
            signing_key,
            scope: scope.into(),
            client: reqwest::Client::new(),
            cached: Mutex::new(None),
        })
    }

    /// Project the key belongs to, if recorded in the file
    pub fn project_id(&self) -> Option<&str> {
        self.key.project_id.as_deref()
    }

    fn sign_assertion(&self, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims {
            iss: &self.key.client_email,
            scope: &self.scope,
            aud: &self.key.token_uri,
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        jsonwebtoken::encode(&header, &claims, &self.signing_key)
            .map_err(|e| AuthError::InvalidKey(e.to_string()))
    }

    async fn fetch_token(&self, now: DateTime<Utc>) -> Result<CachedToken, AuthError> {
        let assertion = self.sign_assertion(now)?;

        tracing::debug!(token_uri = %self.key.token_uri, "requesting access token");

        let response = self
            .client
            .post(&self.key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| AuthError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::RequestFailed(format!("HTTP {}: {}", status, e)))?;

        if let Some(error) = body.error {
            let detail = body
                .error_description
                .map(|d| format!("{}: {}", error, d))
                .unwrap_or(error);
            return Err(AuthError::Rejected(detail));
        }

        let token = body
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::Rejected(format!("HTTP {}: no access_token", status)))?;

        Ok(CachedToken {
            token,
            expires_at: now + Duration::seconds(body.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS)),
        })
    }
}

#[async_trait]
impl AccessTokenSource for ServiceAccountTokenSource {
    async fn access_token(&self) -> Result<String, AuthError> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(now)) {
            return Ok(token.token.clone());
        }

        let token = self.fetch_token(now).await?;
        let value = token.token.clone();
        *cached = Some(token);
        Ok(value)
    }
}
