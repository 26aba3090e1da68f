//! Blob storage adapters

mod cloud_storage;

pub use cloud_storage::CloudStorage;
