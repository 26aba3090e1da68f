//! Configuration domain module

mod app_config;

pub use app_config::{
    AppConfig, DEFAULT_BUCKET, DEFAULT_COLLECTION, DEFAULT_CREDENTIALS, DEFAULT_PREFIX,
};
