//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::speech::{SpeechOptions, DEFAULT_LANGUAGE, DEFAULT_TLD};
use crate::domain::tip::GenerationPolicy;

/// Default service-account key file, relative to the working directory
pub const DEFAULT_CREDENTIALS: &str = "serviceAccountKey.json";

/// Default Firebase Storage bucket
pub const DEFAULT_BUCKET: &str = "health-platform-ab04e.firebasestorage.app";

/// Default document collection holding tip records
pub const DEFAULT_COLLECTION: &str = "audioHealthTips";

/// Default object prefix for uploaded clips
pub const DEFAULT_PREFIX: &str = "audioTips";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub credentials: Option<String>,
    pub bucket: Option<String>,
    pub project_id: Option<String>,
    pub collection: Option<String>,
    pub prefix: Option<String>,
    pub output_dir: Option<String>,
    pub language: Option<String>,
    pub tld: Option<String>,
    pub slow: Option<bool>,
    pub skip_existing: Option<bool>,
}

impl AppConfig {
    /// Create config with default values.
    /// `project_id` and `skip_existing` stay unset: the project comes from the
    /// credentials file and the policy default depends on the command.
    pub fn defaults() -> Self {
        Self {
            credentials: Some(DEFAULT_CREDENTIALS.to_string()),
            bucket: Some(DEFAULT_BUCKET.to_string()),
            project_id: None,
            collection: Some(DEFAULT_COLLECTION.to_string()),
            prefix: Some(DEFAULT_PREFIX.to_string()),
            output_dir: Some(".".to_string()),
            language: Some(DEFAULT_LANGUAGE.to_string()),
            tld: Some(DEFAULT_TLD.to_string()),
            slow: Some(false),
            skip_existing: None,
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            credentials: other.credentials.or(self.credentials),
            bucket: other.bucket.or(self.bucket),
            project_id: other.project_id.or(self.project_id),
            collection: other.collection.or(self.collection),
            prefix: other.prefix.or(self.prefix),
            output_dir: other.output_dir.or(self.output_dir),
            language: other.language.or(self.language),
            tld: other.tld.or(self.tld),
            slow: other.slow.or(self.slow),
            skip_existing: other.skip_existing.or(self.skip_existing),
        }
    }

    pub fn credentials_or_default(&self) -> PathBuf {
        PathBuf::from(
            self.credentials
                .as_deref()
                .unwrap_or(DEFAULT_CREDENTIALS),
        )
    }

    pub fn bucket_or_default(&self) -> &str {
        self.bucket.as_deref().unwrap_or(DEFAULT_BUCKET)
    }

    pub fn collection_or_default(&self) -> &str {
        self.collection.as_deref().unwrap_or(DEFAULT_COLLECTION)
    }

    /// Object prefix without surrounding slashes
    pub fn prefix_or_default(&self) -> &str {
        self.prefix
            .as_deref()
            .unwrap_or(DEFAULT_PREFIX)
            .trim_matches('/')
    }

    pub fn output_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.output_dir.as_deref().unwrap_or("."))
    }

    /// Speech options assembled from language/tld/slow
    pub fn speech_options(&self) -> SpeechOptions {
        SpeechOptions {
            language: self
                .language
                .clone()
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            tld: self.tld.clone().unwrap_or_else(|| DEFAULT_TLD.to_string()),
            slow: self.slow.unwrap_or(false),
        }
    }

    /// Generation policy, falling back to the command's own default
    pub fn policy_or(&self, default: GenerationPolicy) -> GenerationPolicy {
        GenerationPolicy::from_skip_existing(self.skip_existing, default)
    }
}
