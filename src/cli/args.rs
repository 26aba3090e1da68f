//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::config::AppConfig;
use crate::domain::speech::SpeechOptions;
use crate::domain::tip::{AudioTip, CatalogId, GenerationPolicy};

/// audio-tips - spoken health tips for the health platform
#[derive(Parser, Debug)]
#[command(name = "audio-tips")]
#[command(version)]
#[command(about = "Generate spoken health tips with text-to-speech and publish them to Firebase")]
#[command(long_about = None)]
pub struct Cli {
    /// Print debug logs to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Synthesize the audio file of every tip in a catalog
    Generate {
        #[command(flatten)]
        catalog: CatalogArgs,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        speech: SpeechArgs,
    },
    /// Generate, upload and record every tip in a catalog
    Publish {
        #[command(flatten)]
        catalog: CatalogArgs,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        speech: SpeechArgs,
        #[command(flatten)]
        cloud: CloudArgs,
        #[command(flatten)]
        storage: StorageArgs,
        /// Exit with an error if any tip fails to publish
        #[arg(long)]
        strict: bool,
    },
    /// Show the tips of a catalog
    Catalog {
        #[command(flatten)]
        catalog: CatalogArgs,
    },
    /// List tip records in the document store, newest first
    Records {
        #[command(flatten)]
        cloud: CloudArgs,
        /// Only show records whose title contains this text
        #[arg(short = 's', long, value_name = "TEXT")]
        search: Option<String>,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Catalog selection
#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// Built-in tip catalog
    #[arg(short = 'C', long, default_value_t = CatalogId::Sample, value_name = "sample|pages")]
    pub catalog: CatalogId,
}

/// Where audio files go and what to do with existing ones
#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    /// Directory for generated audio files
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Regenerate audio files that already exist
    #[arg(long, conflicts_with = "skip_existing")]
    pub overwrite: bool,

    /// Keep audio files that already exist
    #[arg(long)]
    pub skip_existing: bool,
}

/// Speech synthesis options
#[derive(Args, Debug, Clone, Default)]
pub struct SpeechArgs {
    /// Spoken language (e.g. en, fr, es)
    #[arg(short = 'l', long = "lang", value_name = "LANG")]
    pub language: Option<String>,

    /// Google Translate domain selecting the accent (e.g. com, co.uk, com.au)
    #[arg(long, value_name = "TLD")]
    pub tld: Option<String>,

    /// Speak slowly
    #[arg(long)]
    pub slow: bool,
}

/// Cloud project access
#[derive(Args, Debug, Clone, Default)]
pub struct CloudArgs {
    /// Service-account key file
    #[arg(long, value_name = "PATH")]
    pub credentials: Option<String>,

    /// Cloud project id (defaults to the key's project)
    #[arg(long = "project", value_name = "ID")]
    pub project_id: Option<String>,

    /// Document collection for tip records
    #[arg(long, value_name = "NAME")]
    pub collection: Option<String>,
}

/// Blob storage location
#[derive(Args, Debug, Clone, Default)]
pub struct StorageArgs {
    /// Storage bucket receiving the clips
    #[arg(long, value_name = "BUCKET")]
    pub bucket: Option<String>,

    /// Object prefix inside the bucket
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<String>,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

impl OutputArgs {
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            output_dir: self.output_dir.clone(),
            skip_existing: if self.skip_existing {
                Some(true)
            } else if self.overwrite {
                Some(false)
            } else {
                None
            },
            ..Default::default()
        }
    }
}

impl SpeechArgs {
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            language: self.language.clone(),
            tld: self.tld.clone(),
            slow: if self.slow { Some(true) } else { None },
            ..Default::default()
        }
    }
}

impl CloudArgs {
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            credentials: self.credentials.clone(),
            project_id: self.project_id.clone(),
            collection: self.collection.clone(),
            ..Default::default()
        }
    }
}

impl StorageArgs {
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            bucket: self.bucket.clone(),
            prefix: self.prefix.clone(),
            ..Default::default()
        }
    }
}

/// Parsed generate options
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub tips: Vec<AudioTip>,
    pub output_dir: PathBuf,
    pub speech: SpeechOptions,
    pub policy: GenerationPolicy,
}

impl GenerateOptions {
    /// `generate` regenerates unless told to skip
    pub fn from_config(catalog: CatalogId, config: &AppConfig) -> Self {
        Self {
            tips: catalog.tips(),
            output_dir: config.output_dir_or_default(),
            speech: config.speech_options(),
            policy: config.policy_or(GenerationPolicy::Overwrite),
        }
    }
}

/// Parsed cloud access options
#[derive(Debug, Clone)]
pub struct CloudOptions {
    pub credentials: PathBuf,
    pub project_id: Option<String>,
    pub collection: String,
}

impl CloudOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            credentials: config.credentials_or_default(),
            project_id: config.project_id.clone(),
            collection: config.collection_or_default().to_string(),
        }
    }
}

/// Parsed publish options
#[derive(Debug, Clone)]
pub struct PublishOptions {
    pub generate: GenerateOptions,
    pub cloud: CloudOptions,
    pub bucket: String,
    pub prefix: String,
    pub strict: bool,
}

impl PublishOptions {
    /// `publish` keeps existing audio unless told to overwrite
    pub fn from_config(catalog: CatalogId, config: &AppConfig, strict: bool) -> Self {
        let mut generate = GenerateOptions::from_config(catalog, config);
        generate.policy = config.policy_or(GenerationPolicy::SkipExisting);

        Self {
            generate,
            cloud: CloudOptions::from_config(config),
            bucket: config.bucket_or_default().to_string(),
            prefix: config.prefix_or_default().to_string(),
            strict,
        }
    }
}

/// Parsed records options
#[derive(Debug, Clone)]
pub struct RecordsOptions {
    pub cloud: CloudOptions,
    pub search: Option<String>,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "credentials",
    "bucket",
    "project_id",
    "collection",
    "prefix",
    "output_dir",
    "language",
    "tld",
    "slow",
    "skip_existing",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
