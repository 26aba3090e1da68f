//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod audio_files;
pub mod blob_store;
pub mod config;
pub mod speech;
pub mod tip_store;
pub mod token;

// Re-export common types
pub use audio_files::{AudioFileError, AudioFileStore};
pub use blob_store::{BlobStore, BlobStoreError};
pub use config::ConfigStore;
pub use speech::{SpeechError, SpeechSynthesizer};
pub use tip_store::{TipStore, TipStoreError};
pub use token::{AccessTokenSource, AuthError};
