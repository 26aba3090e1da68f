//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod speech;
pub mod tip;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use speech::{AudioData, AudioMimeType, SpeechOptions};
pub use tip::{AudioTip, CatalogId, GenerationPolicy, StoredTip, TipFileName, TipRecord};
