//! Firestore REST adapter for tip records

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::application::ports::{AccessTokenSource, TipStore, TipStoreError};
use crate::domain::tip::{StoredTip, TipRecord};

use super::value::{decode_document, encode_record, Document};

const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com";

/// Documents requested per list page
const PAGE_SIZE: &str = "300";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<Document>,
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    status: Option<String>,
}

/// Tip records stored in one Firestore collection
pub struct FirestoreTipStore {
    project_id: String,
    collection: String,
    base_url: String,
    token: Arc<dyn AccessTokenSource>,
    client: reqwest::Client,
}

impl FirestoreTipStore {
    pub fn new(
        project_id: impl Into<String>,
        collection: impl Into<String>,
        token: Arc<dyn AccessTokenSource>,
    ) -> Self {
        Self::with_base_url(project_id, collection, token, FIRESTORE_BASE_URL)
    }

    pub fn with_base_url(
        project_id: impl Into<String>,
        collection: impl Into<String>,
        token: Arc<dyn AccessTokenSource>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            collection: collection.into(),
            base_url: base_url.into(),
            token,
            client: reqwest::Client::new(),
        }
    }

    /// `.../v1/projects/<project>/databases/(default)/documents/<collection>`
    fn collection_url(&self) -> Result<Url, TipStoreError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| TipStoreError::RequestFailed(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| TipStoreError::RequestFailed("invalid Firestore base URL".to_string()))?
            .pop_if_empty()
            .extend([
                "v1",
                "projects",
                self.project_id.as_str(),
                "databases",
                "(default)",
                "documents",
                self.collection.as_str(),
            ]);
        Ok(url)
    }

    async fn bearer(&self) -> Result<String, TipStoreError> {
        self.token
            .access_token()
            .await
            .map_err(|e| TipStoreError::Unauthorized(e.to_string()))
    }

    /// Turn a non-success response into an error, preferring the API's message
    async fn error_from(response: reqwest::Response) -> TipStoreError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        let message = match serde_json::from_str::<ErrorResponse>(&text) {
            Ok(body) => match body.error.status {
                Some(code) => format!("{}: {}", code, body.error.message),
                None => body.error.message,
            },
            Err(_) => format!("HTTP {}: {}", status, text),
        };

        if status == reqwest::StatusCode::UNAUTHORIZED {
            TipStoreError::Unauthorized(message)
        } else {
            TipStoreError::ApiError(message)
        }
    }
}

#[async_trait]
impl TipStore for FirestoreTipStore {
    async fn insert(&self, record: &TipRecord) -> Result<String, TipStoreError> {
        let url = self.collection_url()?;
        let token = self.bearer().await?;

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&encode_record(record))
            .send()
            .await
            .map_err(|e| TipStoreError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }

        let doc: Document = response
            .json()
            .await
            .map_err(|e| TipStoreError::ParseError(e.to_string()))?;

        tracing::debug!(collection = %self.collection, id = doc.id(), "inserted document");
        Ok(doc.id().to_string())
    }

    async fn list(&self) -> Result<Vec<StoredTip>, TipStoreError> {
        let token = self.bearer().await?;
        let mut tips = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut url = self.collection_url()?;
            {
                let mut query = url.query_pairs_mut();
                query.append_pair("pageSize", PAGE_SIZE);
                if let Some(ref t) = page_token {
                    query.append_pair("pageToken", t);
                }
            }

            let response = self
                .client
                .get(url)
                .bearer_auth(&token)
                .send()
                .await
                .map_err(|e| TipStoreError::RequestFailed(e.to_string()))?;

            if !response.status().is_success() {
                return Err(Self::error_from(response).await);
            }

            let page: ListDocumentsResponse = response
                .json()
                .await
                .map_err(|e| TipStoreError::ParseError(e.to_string()))?;

            tips.extend(page.documents.iter().map(decode_document));

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        Ok(tips)
    }
}
