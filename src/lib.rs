//! audio-tips - spoken health tips for the health platform
//!
//! This crate synthesizes short health tips to MP3 with the Google Translate
//! speech endpoint, uploads the clips to a Firebase Storage bucket, makes them
//! public and records each one in a Firestore collection.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Tip catalogs, records, speech options, configuration, errors
//! - **Application**: Use cases (generate, publish, list) and port interfaces
//! - **Infrastructure**: Adapters (Translate TTS, Cloud Storage, Firestore, OAuth2, files)
//! - **CLI**: Argument parsing, output formatting and command runners

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
