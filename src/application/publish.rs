//! Publish tips use case: generate, upload, make public, record

use chrono::Utc;
use thiserror::Error;

use crate::domain::tip::{AudioTip, GenerationPolicy, TipFileName, TipRecord};

use super::generate::{ensure_audio, GenerateError, GeneratedTip};
use super::ports::{
    AudioFileError, AudioFileStore, BlobStore, BlobStoreError, SpeechSynthesizer, TipStore,
    TipStoreError,
};

/// Errors that abort a publish run
#[derive(Debug, Error)]
pub enum PublishError {
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// Errors from the upload half of one item. They are reported per item and
/// never abort the run.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Audio(#[from] AudioFileError),

    #[error(transparent)]
    Blob(#[from] BlobStoreError),

    #[error(transparent)]
    Record(#[from] TipStoreError),
}

/// Result for one tip
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Published {
        title: String,
        file: TipFileName,
        url: String,
        document_id: String,
    },
    Failed {
        title: String,
        file: TipFileName,
        message: String,
    },
}

impl PublishOutcome {
    pub fn file(&self) -> &TipFileName {
        match self {
            Self::Published { file, .. } | Self::Failed { file, .. } => file,
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }
}

/// Output from the publish use case
#[derive(Debug, Clone, Default)]
pub struct PublishReport {
    pub generated: Vec<GeneratedTip>,
    pub outcomes: Vec<PublishOutcome>,
}

impl PublishReport {
    pub fn published_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_published()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.published_count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0
    }
}

/// Callbacks for progress and status updates
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct PublishCallbacks {
    /// Called before a tip is synthesized
    pub on_synthesizing: Option<Box<dyn Fn(&AudioTip) + Send + Sync>>,
    /// Called after a tip's audio file is ensured
    pub on_generated: Option<Box<dyn Fn(&GeneratedTip) + Send + Sync>>,
    /// Called when the upload of a tip starts
    pub on_uploading: Option<Box<dyn Fn(&AudioTip) + Send + Sync>>,
    /// Called with each tip's final outcome
    pub on_outcome: Option<Box<dyn Fn(&PublishOutcome) + Send + Sync>>,
}

/// Configuration of where tips are published
#[derive(Debug, Clone)]
pub struct PublishTarget {
    /// Object prefix inside the bucket, without slashes at either end
    pub prefix: String,
}

impl PublishTarget {
    pub fn object_name(&self, file: &TipFileName) -> String {
        if self.prefix.is_empty() {
            file.to_string()
        } else {
            format!("{}/{}", self.prefix, file)
        }
    }
}

/// Generate-and-publish use case
pub struct PublishTipsUseCase<S, F, B, T>
where
    S: SpeechSynthesizer,
    F: AudioFileStore,
    B: BlobStore,
    T: TipStore,
{
    synthesizer: S,
    files: F,
    blobs: B,
    records: T,
    target: PublishTarget,
}

impl<S, F, B, T> PublishTipsUseCase<S, F, B, T>
where
    S: SpeechSynthesizer,
    F: AudioFileStore,
    B: BlobStore,
    T: TipStore,
{
    pub fn new(synthesizer: S, files: F, blobs: B, records: T, target: PublishTarget) -> Self {
        Self {
            synthesizer,
            files,
            blobs,
            records,
            target,
        }
    }

    /// Process every tip in order. Synthesis failures abort; upload and
    /// record failures are reported on the item and the loop moves on.
    pub async fn execute(
        &self,
        tips: &[AudioTip],
        policy: GenerationPolicy,
        callbacks: PublishCallbacks,
    ) -> Result<PublishReport, PublishError> {
        let mut report = PublishReport::default();

        for tip in tips {
            let generated = ensure_audio(
                &self.synthesizer,
                &self.files,
                tip,
                policy,
                callbacks.on_synthesizing.as_deref(),
            )
            .await?;

            if let Some(ref cb) = callbacks.on_generated {
                cb(&generated);
            }
            report.generated.push(generated);

            if let Some(ref cb) = callbacks.on_uploading {
                cb(tip);
            }

            let outcome = match self.upload(tip).await {
                Ok((url, document_id)) => {
                    tracing::info!(file = %tip.audio_file, %url, %document_id, "published tip");
                    PublishOutcome::Published {
                        title: tip.title.clone(),
                        file: tip.audio_file.clone(),
                        url,
                        document_id,
                    }
                }
                Err(e) => {
                    tracing::warn!(file = %tip.audio_file, error = %e, "failed to publish tip");
                    PublishOutcome::Failed {
                        title: tip.title.clone(),
                        file: tip.audio_file.clone(),
                        message: e.to_string(),
                    }
                }
            };

            if let Some(ref cb) = callbacks.on_outcome {
                cb(&outcome);
            }
            report.outcomes.push(outcome);
        }

        Ok(report)
    }

    /// Upload, publish and record one tip. Returns (public URL, document id).
    /// A blob left behind by a failed insert is not removed.
    async fn upload(&self, tip: &AudioTip) -> Result<(String, String), UploadError> {
        let audio = self.files.read(&tip.audio_file).await?;
        let object_name = self.target.object_name(&tip.audio_file);

        self.blobs.upload(&object_name, &audio).await?;
        let url = self.blobs.make_public(&object_name).await?;

        let record = TipRecord::for_tip(tip, url.clone(), Utc::now());
        let document_id = self.records.insert(&record).await?;

        Ok((url, document_id))
    }
}
