//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with Google Translate speech, Cloud Storage,
//! Firestore and the local filesystem.

pub mod auth;
pub mod config;
pub mod files;
pub mod firestore;
pub mod speech;
pub mod storage;

// Re-export adapters
pub use auth::{ServiceAccountKey, ServiceAccountTokenSource, StaticTokenSource};
pub use config::XdgConfigStore;
pub use files::LocalAudioDir;
pub use firestore::FirestoreTipStore;
pub use speech::GoogleTranslateTts;
pub use storage::CloudStorage;
