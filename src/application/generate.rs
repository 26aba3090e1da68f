//! Generate audio use case

use thiserror::Error;

use crate::domain::tip::{AudioTip, GenerationPolicy, TipFileName};

use super::ports::{AudioFileError, AudioFileStore, SpeechError, SpeechSynthesizer};

/// Errors that abort a generation run
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Speech synthesis failed for {file}: {source}")]
    Speech {
        file: TipFileName,
        #[source]
        source: SpeechError,
    },

    #[error(transparent)]
    File(#[from] AudioFileError),
}

/// What happened to one tip's audio file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationStatus {
    /// Synthesized and written; carries the human-readable size
    Generated { size: String },
    /// Left untouched because it already existed
    Skipped,
}

/// Per-tip generation result
#[derive(Debug, Clone)]
pub struct GeneratedTip {
    pub file: TipFileName,
    pub status: GenerationStatus,
}

impl GeneratedTip {
    pub fn was_generated(&self) -> bool {
        matches!(self.status, GenerationStatus::Generated { .. })
    }
}

/// Output from the generate use case
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    pub items: Vec<GeneratedTip>,
}

impl GenerateReport {
    pub fn generated_count(&self) -> usize {
        self.items.iter().filter(|i| i.was_generated()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.items.len() - self.generated_count()
    }
}

/// Callbacks for progress updates
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct GenerateCallbacks {
    /// Called before a tip is synthesized
    pub on_synthesizing: Option<Box<dyn Fn(&AudioTip) + Send + Sync>>,
    /// Called after each tip is handled
    pub on_item_done: Option<Box<dyn Fn(&GeneratedTip) + Send + Sync>>,
}

/// Make sure a tip's audio file exists locally, honoring the policy.
///
/// Shared by generation and publishing; any failure here is fatal to the run.
pub async fn ensure_audio<S, F>(
    synthesizer: &S,
    files: &F,
    tip: &AudioTip,
    policy: GenerationPolicy,
    on_synthesizing: Option<&(dyn Fn(&AudioTip) + Send + Sync)>,
) -> Result<GeneratedTip, GenerateError>
where
    S: SpeechSynthesizer,
    F: AudioFileStore,
{
    if policy.skips_existing() && files.exists(&tip.audio_file).await {
        tracing::debug!(file = %tip.audio_file, "audio exists, skipping synthesis");
        return Ok(GeneratedTip {
            file: tip.audio_file.clone(),
            status: GenerationStatus::Skipped,
        });
    }

    if let Some(cb) = on_synthesizing {
        cb(tip);
    }

    let audio = synthesizer
        .synthesize(&tip.transcript)
        .await
        .map_err(|source| GenerateError::Speech {
            file: tip.audio_file.clone(),
            source,
        })?;

    files.write(&tip.audio_file, &audio).await?;
    tracing::info!(file = %tip.audio_file, bytes = audio.size_bytes(), "saved audio");

    Ok(GeneratedTip {
        file: tip.audio_file.clone(),
        status: GenerationStatus::Generated {
            size: audio.human_readable_size(),
        },
    })
}

/// Generate audio files for every tip of a catalog
pub struct GenerateAudioUseCase<S, F>
where
    S: SpeechSynthesizer,
    F: AudioFileStore,
{
    synthesizer: S,
    files: F,
}

impl<S, F> GenerateAudioUseCase<S, F>
where
    S: SpeechSynthesizer,
    F: AudioFileStore,
{
    pub fn new(synthesizer: S, files: F) -> Self {
        Self { synthesizer, files }
    }

    /// Run generation over `tips` in order. Stops at the first failure.
    pub async fn execute(
        &self,
        tips: &[AudioTip],
        policy: GenerationPolicy,
        callbacks: GenerateCallbacks,
    ) -> Result<GenerateReport, GenerateError> {
        let mut report = GenerateReport::default();

        for tip in tips {
            let item = ensure_audio(
                &self.synthesizer,
                &self.files,
                tip,
                policy,
                callbacks.on_synthesizing.as_deref(),
            )
            .await?;

            if let Some(ref cb) = callbacks.on_item_done {
                cb(&item);
            }
            report.items.push(item);
        }

        Ok(report)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::application::ports::{AudioFileError, AudioFileStore, SpeechError, SpeechSynthesizer};
    use crate::domain::speech::AudioData;
    use crate::domain::tip::TipFileName;

    /// Synthesizer that echoes the text as bytes and can fail on a given text
    #[derive(Default)]
    pub struct MockSynthesizer {
        pub calls: AtomicUsize,
        pub fail_on: Option<String>,
    }

    #[async_trait]
    impl SpeechSynthesizer for MockSynthesizer {
        async fn synthesize(&self, text: &str) -> Result<AudioData, SpeechError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on.as_deref() == Some(text) {
                return Err(SpeechError::ApiError("boom".to_string()));
            }
            Ok(AudioData::mp3(text.as_bytes().to_vec()))
        }
    }

    /// In-memory audio directory
    #[derive(Default)]
    pub struct MemoryFiles {
        pub files: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl MemoryFiles {
        pub fn with_file(name: &str, data: &[u8]) -> Self {
            let files = Self::default();
            files
                .files
                .lock()
                .unwrap()
                .insert(name.to_string(), data.to_vec());
            files
        }

        pub fn get(&self, name: &str) -> Option<Vec<u8>> {
            self.files.lock().unwrap().get(name).cloned()
        }
    }

    #[async_trait]
    impl AudioFileStore for MemoryFiles {
        async fn exists(&self, name: &TipFileName) -> bool {
            self.files.lock().unwrap().contains_key(name.as_str())
        }

        async fn write(&self, name: &TipFileName, audio: &AudioData) -> Result<(), AudioFileError> {
            self.files
                .lock()
                .unwrap()
                .insert(name.to_string(), audio.data().to_vec());
            Ok(())
        }

        async fn read(&self, name: &TipFileName) -> Result<AudioData, AudioFileError> {
            self.get(name.as_str())
                .map(AudioData::mp3)
                .ok_or_else(|| AudioFileError::NotFound(name.to_string()))
        }
    }
}
