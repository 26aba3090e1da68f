//! Audio clips stored in a local directory

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{AudioFileError, AudioFileStore};
use crate::domain::speech::{AudioData, AudioMimeType};
use crate::domain::tip::TipFileName;

/// Directory that generated clips are written to and uploaded from
pub struct LocalAudioDir {
    root: PathBuf,
}

impl LocalAudioDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_of(&self, name: &TipFileName) -> PathBuf {
        self.root.join(name.as_str())
    }
}

impl Default for LocalAudioDir {
    fn default() -> Self {
        Self::new(".")
    }
}

#[async_trait]
impl AudioFileStore for LocalAudioDir {
    async fn exists(&self, name: &TipFileName) -> bool {
        fs::try_exists(self.path_of(name)).await.unwrap_or(false)
    }

    async fn write(&self, name: &TipFileName, audio: &AudioData) -> Result<(), AudioFileError> {
        let path = self.path_of(name);
        let failed = |e: std::io::Error| AudioFileError::WriteFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        fs::create_dir_all(&self.root).await.map_err(failed)?;
        fs::write(&path, audio.data()).await.map_err(failed)?;
        Ok(())
    }

    async fn read(&self, name: &TipFileName) -> Result<AudioData, AudioFileError> {
        let path = self.path_of(name);

        let data = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AudioFileError::NotFound(path.display().to_string())
            } else {
                AudioFileError::ReadFailed {
                    path: path.display().to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        let mime = name
            .extension()
            .map(AudioMimeType::from_extension)
            .unwrap_or_default();
        Ok(AudioData::new(data, mime))
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn name(s: &str) -> TipFileName {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn write_then_read() {
        let dir = tempdir().unwrap();
        let store = LocalAudioDir::new(dir.path());

        assert!(!store.exists(&name("a.mp3")).await);
        store
            .write(&name("a.mp3"), &AudioData::mp3(vec![9, 8, 7]))
            .await
            .unwrap();
        assert!(store.exists(&name("a.mp3")).await);

        let audio = store.read(&name("a.mp3")).await.unwrap();
        assert_eq!(audio.data(), &[9, 8, 7]);
        assert_eq!(audio.mime_type(), AudioMimeType::Mpeg);
    }

    #[tokio::test]
    async fn write_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let store = LocalAudioDir::new(dir.path().join("nested/out"));

        store
            .write(&name("b.mp3"), &AudioData::mp3(vec![1]))
            .await
            .unwrap();
        assert!(dir.path().join("nested/out/b.mp3").exists());
    }

    #[tokio::test]
    async fn write_overwrites() {
        let dir = tempdir().unwrap();
        let store = LocalAudioDir::new(dir.path());

        store.write(&name("c.mp3"), &AudioData::mp3(vec![1, 1])).await.unwrap();
        store.write(&name("c.mp3"), &AudioData::mp3(vec![2])).await.unwrap();

        assert_eq!(std::fs::read(dir.path().join("c.mp3")).unwrap(), vec![2]);
    }

    #[tokio::test]
    async fn read_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let store = LocalAudioDir::new(dir.path());

        let err = store.read(&name("missing.mp3")).await.unwrap_err();
        assert!(matches!(err, AudioFileError::NotFound(_)));
    }

    #[test]
    fn path_of_joins_root() {
        let store = LocalAudioDir::new("/tmp/tips");
        assert_eq!(store.path_of(&name("x.mp3")), PathBuf::from("/tmp/tips/x.mp3"));
    }
}
