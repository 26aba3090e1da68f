//! Cloud Storage (Firebase Storage bucket) adapter

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use url::Url;

use crate::application::ports::{AccessTokenSource, BlobStore, BlobStoreError};
use crate::domain::speech::AudioData;

/// JSON API and public object host
const STORAGE_BASE_URL: &str = "https://storage.googleapis.com";

#[derive(Debug, Serialize)]
struct ObjectAccessControl<'a> {
    entity: &'a str,
    role: &'a str,
}

/// Uploads clips through the Cloud Storage JSON API
pub struct CloudStorage {
    bucket: String,
    api_base: String,
    public_base: String,
    token: Arc<dyn AccessTokenSource>,
    client: reqwest::Client,
}

impl CloudStorage {
    pub fn new(bucket: impl Into<String>, token: Arc<dyn AccessTokenSource>) -> Self {
        Self::with_base_url(bucket, token, STORAGE_BASE_URL)
    }

    /// Point both the API and public URLs at a custom host (used by tests)
    pub fn with_base_url(
        bucket: impl Into<String>,
        token: Arc<dyn AccessTokenSource>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            bucket: bucket.into(),
            api_base: base_url.clone(),
            public_base: base_url,
            token,
            client: reqwest::Client::new(),
        }
    }

    fn parse_base(base: &str) -> Result<Url, BlobStoreError> {
        Url::parse(base).map_err(|e| BlobStoreError::RequestFailed(format!("{}: {}", base, e)))
    }

    /// `.../upload/storage/v1/b/<bucket>/o?uploadType=media&name=<object>`
    fn upload_url(&self, object_name: &str) -> Result<Url, BlobStoreError> {
        let mut url = Self::parse_base(&self.api_base)?;
        url.path_segments_mut()
            .map_err(|_| BlobStoreError::RequestFailed("invalid storage base URL".to_string()))?
            .pop_if_empty()
            .extend(["upload", "storage", "v1", "b", self.bucket.as_str(), "o"]);
        url.query_pairs_mut()
            .append_pair("uploadType", "media")
            .append_pair("name", object_name);
        Ok(url)
    }

    /// `.../storage/v1/b/<bucket>/o/<object>/acl`, object name as one segment
    fn acl_url(&self, object_name: &str) -> Result<Url, BlobStoreError> {
        let mut url = Self::parse_base(&self.api_base)?;
        url.path_segments_mut()
            .map_err(|_| BlobStoreError::RequestFailed("invalid storage base URL".to_string()))?
            .pop_if_empty()
            .extend(["storage", "v1", "b", self.bucket.as_str(), "o", object_name, "acl"]);
        Ok(url)
    }

    /// `https://storage.googleapis.com/<bucket>/<object>`, keeping `/` in the name
    pub fn public_url(&self, object_name: &str) -> Result<String, BlobStoreError> {
        let mut url = Self::parse_base(&self.public_base)?;
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                BlobStoreError::RequestFailed("invalid storage base URL".to_string())
            })?;
            segments.pop_if_empty().push(&self.bucket);
            segments.extend(object_name.split('/'));
        }
        Ok(url.to_string())
    }

    async fn bearer(&self) -> Result<String, BlobStoreError> {
        self.token
            .access_token()
            .await
            .map_err(|e| BlobStoreError::Unauthorized(e.to_string()))
    }

    async fn check_status(&self, response: reqwest::Response) -> Result<(), BlobStoreError> {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            let text = response.text().await.unwrap_or_default();
            return Err(BlobStoreError::Unauthorized(format!("HTTP {}: {}", status, text)));
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(BlobStoreError::BucketNotFound(self.bucket.clone()));
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(BlobStoreError::ApiError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl BlobStore for CloudStorage {
    async fn upload(&self, object_name: &str, audio: &AudioData) -> Result<(), BlobStoreError> {
        let url = self.upload_url(object_name)?;
        let token = self.bearer().await?;

        tracing::debug!(bucket = %self.bucket, object = object_name, bytes = audio.size_bytes(), "uploading object");

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, audio.mime_type().as_str())
            .body(audio.data().to_vec())
            .send()
            .await
            .map_err(|e| BlobStoreError::RequestFailed(e.to_string()))?;

        self.check_status(response).await
    }

    async fn make_public(&self, object_name: &str) -> Result<String, BlobStoreError> {
        let url = self.acl_url(object_name)?;
        let token = self.bearer().await?;

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&ObjectAccessControl {
                entity: "allUsers",
                role: "READER",
            })
            .send()
            .await
            .map_err(|e| BlobStoreError::RequestFailed(e.to_string()))?;

        self.check_status(response).await?;
        self.public_url(object_name)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::infrastructure::auth::StaticTokenSource;

    fn storage(base: &str) -> CloudStorage {
        CloudStorage::with_base_url("tips-bucket", Arc::new(StaticTokenSource::new("tok")), base)
    }

    #[test]
    fn public_url_keeps_prefix_separator() {
        let storage = CloudStorage::new("my-bucket.firebasestorage.app", Arc::new(StaticTokenSource::new("t")));
        assert_eq!(
            storage.public_url("audioTips/hydration.mp3").unwrap(),
            "https://storage.googleapis.com/my-bucket.firebasestorage.app/audioTips/hydration.mp3"
        );
    }

    #[test]
    fn public_url_escapes_spaces() {
        let storage = storage("https://storage.googleapis.com");
        assert_eq!(
            storage.public_url("audioTips/my tip.mp3").unwrap(),
            "https://storage.googleapis.com/tips-bucket/audioTips/my%20tip.mp3"
        );
    }

    #[test]
    fn acl_url_encodes_object_as_one_segment() {
        let storage = storage("https://storage.googleapis.com");
        assert_eq!(
            storage.acl_url("audioTips/sleep.mp3").unwrap().as_str(),
            "https://storage.googleapis.com/storage/v1/b/tips-bucket/o/audioTips%2Fsleep.mp3/acl"
        );
    }

    #[test]
    fn upload_url_carries_name_query() {
        let storage = storage("https://storage.googleapis.com");
        let url = storage.upload_url("audioTips/sleep.mp3").unwrap();
        assert_eq!(url.path(), "/upload/storage/v1/b/tips-bucket/o");
        assert_eq!(url.query(), Some("uploadType=media&name=audioTips%2Fsleep.mp3"));
    }

    #[tokio::test]
    async fn upload_then_make_public() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/upload/storage/v1/b/tips-bucket/o"))
            .and(query_param("uploadType", "media"))
            .and(query_param("name", "audioTips/sleep.mp3"))
            .and(header("authorization", "Bearer tok"))
            .and(header("content-type", "audio/mpeg"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "audioTips/sleep.mp3"
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/storage/v1/b/tips-bucket/o/audioTips%2Fsleep.mp3/acl"))
            .and(body_json(serde_json::json!({"entity": "allUsers", "role": "READER"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let storage = storage(&server.uri());
        storage
            .upload("audioTips/sleep.mp3", &AudioData::mp3(vec![1, 2, 3]))
            .await
            .unwrap();
        let url = storage.make_public("audioTips/sleep.mp3").await.unwrap();

        assert_eq!(url, format!("{}/tips-bucket/audioTips/sleep.mp3", server.uri()));
    }

    #[tokio::test]
    async fn forbidden_is_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("denied"))
            .mount(&server)
            .await;

        let err = storage(&server.uri())
            .upload("a.mp3", &AudioData::mp3(vec![0]))
            .await
            .unwrap_err();
        assert!(matches!(err, BlobStoreError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn missing_bucket_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = storage(&server.uri())
            .upload("a.mp3", &AudioData::mp3(vec![0]))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("tips-bucket"));
    }
}
