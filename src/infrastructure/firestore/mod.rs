//! Document store adapters (Cloud Firestore REST API)

mod client;
mod value;

pub use client::FirestoreTipStore;
