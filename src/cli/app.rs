//! Command runners wiring adapters into the use cases

use std::env;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use crate::application::ports::{AccessTokenSource, AuthError, ConfigStore};
use crate::application::{
    GenerateAudioUseCase, GenerateCallbacks, GeneratedTip, GenerationStatus, ListTipsUseCase,
    PublishCallbacks, PublishOutcome, PublishTarget, PublishTipsUseCase,
};
use crate::domain::config::AppConfig;
use crate::domain::speech::SpeechOptions;
use crate::domain::tip::{AudioTip, CatalogId};
use crate::infrastructure::{
    CloudStorage, FirestoreTipStore, GoogleTranslateTts, LocalAudioDir, ServiceAccountKey,
    ServiceAccountTokenSource, StaticTokenSource, XdgConfigStore,
};

use super::args::{CloudOptions, GenerateOptions, PublishOptions, RecordsOptions};
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Service-account key file
pub const ENV_CREDENTIALS: &str = "AUDIO_TIPS_CREDENTIALS";
/// Fallback key file variable understood by Google client libraries
pub const ENV_GOOGLE_CREDENTIALS: &str = "GOOGLE_APPLICATION_CREDENTIALS";
pub const ENV_BUCKET: &str = "AUDIO_TIPS_BUCKET";
pub const ENV_PROJECT: &str = "AUDIO_TIPS_PROJECT";
/// Pre-issued OAuth2 token; bypasses the key file entirely
pub const ENV_ACCESS_TOKEN: &str = "AUDIO_TIPS_ACCESS_TOKEN";
/// Endpoint overrides, for emulators and tests
pub const ENV_TRANSLATE_URL: &str = "AUDIO_TIPS_TRANSLATE_URL";
pub const ENV_STORAGE_URL: &str = "AUDIO_TIPS_STORAGE_URL";
pub const ENV_FIRESTORE_URL: &str = "AUDIO_TIPS_FIRESTORE_URL";

/// Authenticated access to one cloud project
struct CloudSession {
    token: Arc<dyn AccessTokenSource>,
    project_id: String,
}

/// Service endpoints, defaulting to the Google hosts
#[derive(Debug, Default)]
struct Endpoints {
    translate: Option<String>,
    storage: Option<String>,
    firestore: Option<String>,
}

impl Endpoints {
    fn from_env() -> Self {
        let var = |name: &str| env::var(name).ok().filter(|s| !s.is_empty());
        Self {
            translate: var(ENV_TRANSLATE_URL),
            storage: var(ENV_STORAGE_URL),
            firestore: var(ENV_FIRESTORE_URL),
        }
    }

    fn synthesizer(&self, options: SpeechOptions) -> GoogleTranslateTts {
        match &self.translate {
            Some(base) => GoogleTranslateTts::with_base_url(base, options),
            None => GoogleTranslateTts::new(options),
        }
    }

    fn storage(&self, bucket: &str, token: Arc<dyn AccessTokenSource>) -> CloudStorage {
        match &self.storage {
            Some(base) => CloudStorage::with_base_url(bucket, token, base),
            None => CloudStorage::new(bucket, token),
        }
    }

    fn tip_store(&self, session: &CloudSession, collection: &str) -> FirestoreTipStore {
        let token = Arc::clone(&session.token);
        match &self.firestore {
            Some(base) => FirestoreTipStore::with_base_url(&session.project_id, collection, token, base),
            None => FirestoreTipStore::new(&session.project_id, collection, token),
        }
    }
}

/// Run `generate`: write the audio file of every tip
pub async fn run_generate(options: GenerateOptions) -> ExitCode {
    let presenter = Arc::new(Presenter::new());

    let synthesizer = Endpoints::from_env().synthesizer(options.speech.clone());
    let files = LocalAudioDir::new(&options.output_dir);
    let use_case = GenerateAudioUseCase::new(synthesizer, files);

    let callbacks = GenerateCallbacks {
        on_synthesizing: Some(Box::new({
            let presenter = Arc::clone(&presenter);
            move |tip: &AudioTip| presenter.start_spinner(&format!("Synthesizing {}...", tip.audio_file))
        })),
        on_item_done: Some(Box::new({
            let presenter = Arc::clone(&presenter);
            let dir = options.output_dir.clone();
            move |item: &GeneratedTip| report_generated(&presenter, &dir, item)
        })),
    };

    match use_case
        .execute(&options.tips, options.policy, callbacks)
        .await
    {
        Ok(report) => {
            presenter.info(&format!(
                "{} generated, {} skipped",
                report.generated_count(),
                report.skipped_count()
            ));
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.spinner_fail(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Run `publish`: generate, upload, make public and record every tip
pub async fn run_publish(options: PublishOptions) -> ExitCode {
    let presenter = Arc::new(Presenter::new());

    let session = match open_session(&options.cloud).await {
        Ok(session) => session,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    tracing::debug!(
        project = %session.project_id,
        bucket = %options.bucket,
        collection = %options.cloud.collection,
        prefix = %options.prefix,
        "publishing"
    );

    let generate = &options.generate;
    let endpoints = Endpoints::from_env();
    let use_case = PublishTipsUseCase::new(
        endpoints.synthesizer(generate.speech.clone()),
        LocalAudioDir::new(&generate.output_dir),
        endpoints.storage(&options.bucket, Arc::clone(&session.token)),
        endpoints.tip_store(&session, &options.cloud.collection),
        PublishTarget {
            prefix: options.prefix.clone(),
        },
    );

    let callbacks = PublishCallbacks {
        on_synthesizing: Some(Box::new({
            let presenter = Arc::clone(&presenter);
            move |tip: &AudioTip| presenter.start_spinner(&format!("Synthesizing {}...", tip.audio_file))
        })),
        on_generated: Some(Box::new({
            let presenter = Arc::clone(&presenter);
            let dir = generate.output_dir.clone();
            move |item: &GeneratedTip| report_generated(&presenter, &dir, item)
        })),
        on_uploading: Some(Box::new({
            let presenter = Arc::clone(&presenter);
            move |tip: &AudioTip| presenter.start_spinner(&format!("Uploading {}...", tip.audio_file))
        })),
        on_outcome: Some(Box::new({
            let presenter = Arc::clone(&presenter);
            move |outcome: &PublishOutcome| match outcome {
                PublishOutcome::Published { file, url, .. } => {
                    presenter.outcome_success(&format!("Uploaded {} to {}", file, url))
                }
                PublishOutcome::Failed { file, message, .. } => {
                    presenter.outcome_fail(&format!("Failed to upload {}: {}", file, message))
                }
            }
        })),
    };

    match use_case
        .execute(&generate.tips, generate.policy, callbacks)
        .await
    {
        Ok(report) => {
            let summary = format!(
                "{} published, {} failed",
                report.published_count(),
                report.failed_count()
            );
            if report.has_failures() {
                presenter.warn(&summary);
            } else {
                presenter.info(&summary);
            }

            if options.strict && report.has_failures() {
                ExitCode::from(EXIT_ERROR)
            } else {
                ExitCode::from(EXIT_SUCCESS)
            }
        }
        Err(e) => {
            presenter.spinner_fail(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Run `catalog`: print the tips of a built-in catalog
pub fn run_catalog(catalog: CatalogId) -> ExitCode {
    let presenter = Presenter::new();
    presenter.info(&format!("{} ({})", catalog.label(), catalog));
    for tip in catalog.tips() {
        presenter.catalog_entry(&tip);
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Run `records`: list stored tip records, newest first
pub async fn run_records(options: RecordsOptions) -> ExitCode {
    let presenter = Presenter::new();

    let session = match open_session(&options.cloud).await {
        Ok(session) => session,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let store = Endpoints::from_env().tip_store(&session, &options.cloud.collection);

    presenter.start_spinner("Fetching records...");
    match ListTipsUseCase::new(store)
        .execute(options.search.as_deref())
        .await
    {
        Ok(tips) => {
            presenter.stop_spinner();
            if tips.is_empty() {
                presenter.info("No audio tips found");
            }
            for tip in &tips {
                presenter.record(tip);
            }
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.spinner_fail(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn report_generated(presenter: &Presenter, dir: &Path, item: &GeneratedTip) {
    let path = dir.join(item.file.as_str());
    match &item.status {
        GenerationStatus::Generated { size } => {
            presenter.outcome_success(&format!("Audio written to {} ({})", path.display(), size))
        }
        GenerationStatus::Skipped => {
            presenter.info(&format!("Keeping existing {}", path.display()))
        }
    }
}

/// Build the token source and resolve the project id.
///
/// `AUDIO_TIPS_ACCESS_TOKEN` wins over the key file and then requires an
/// explicit project; otherwise the key file must exist and its `project_id`
/// is the fallback.
async fn open_session(options: &CloudOptions) -> Result<CloudSession, String> {
    if let Some(token) = env::var(ENV_ACCESS_TOKEN).ok().filter(|t| !t.is_empty()) {
        let project_id = options.project_id.clone().ok_or_else(|| {
            format!(
                "Missing project id. Set {} or pass --project when using {}",
                ENV_PROJECT, ENV_ACCESS_TOKEN
            )
        })?;
        tracing::debug!("using access token from environment");
        return Ok(CloudSession {
            token: Arc::new(StaticTokenSource::new(token)),
            project_id,
        });
    }

    let key = ServiceAccountKey::from_file(&options.credentials)
        .await
        .map_err(|e| e.to_string())?;
    let source = ServiceAccountTokenSource::new(key).map_err(|e: AuthError| e.to_string())?;

    let project_id = options
        .project_id
        .clone()
        .or_else(|| source.project_id().map(str::to_string))
        .ok_or_else(|| {
            format!(
                "Missing project id. The key file {} has none; set {} or pass --project",
                options.credentials.display(),
                ENV_PROJECT
            )
        })?;

    tracing::debug!(credentials = %options.credentials.display(), %project_id, "loaded service account");

    Ok(CloudSession {
        token: Arc::new(source),
        project_id,
    })
}

/// Configuration taken from environment variables
pub fn env_config() -> AppConfig {
    let var = |name: &str| env::var(name).ok().filter(|s| !s.is_empty());

    AppConfig {
        credentials: var(ENV_CREDENTIALS).or_else(|| var(ENV_GOOGLE_CREDENTIALS)),
        bucket: var(ENV_BUCKET),
        project_id: var(ENV_PROJECT),
        ..Default::default()
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load_or_empty().await;

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config())
        .merge(cli_config)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[tokio::test]
    async fn missing_credentials_file_is_reported() {
        // Only meaningful when no token override is present
        if env::var(ENV_ACCESS_TOKEN).is_ok() {
            return;
        }
        let options = CloudOptions {
            credentials: PathBuf::from("/nonexistent/serviceAccountKey.json"),
            project_id: None,
            collection: "audioHealthTips".to_string(),
        };
        let err = open_session(&options).await.err().unwrap();
        assert!(err.contains("Credentials file not found"));
        assert!(err.contains("/nonexistent/serviceAccountKey.json"));
    }

    #[tokio::test]
    async fn project_falls_back_to_key_file() {
        if env::var(ENV_ACCESS_TOKEN).is_ok() {
            return;
        }
        let options = CloudOptions {
            credentials: PathBuf::from(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/tests/fixtures/service_account.json"
            )),
            project_id: None,
            collection: "audioHealthTips".to_string(),
        };
        let session = open_session(&options).await.ok().unwrap();
        assert_eq!(session.project_id, "audio-tips-test");

        let options = CloudOptions {
            project_id: Some("override".to_string()),
            ..options
        };
        let session = open_session(&options).await.ok().unwrap();
        assert_eq!(session.project_id, "override");
    }
}
