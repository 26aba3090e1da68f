//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    validate_config_value(key, value)?;

    let mut config = store.load().await?;
    let text = Some(value.trim().to_string());

    match key {
        "credentials" => config.credentials = text,
        "bucket" => config.bucket = text,
        "project_id" => config.project_id = text,
        "collection" => config.collection = text,
        "prefix" => config.prefix = Some(value.trim().trim_matches('/').to_string()),
        "output_dir" => config.output_dir = text,
        "language" => config.language = text,
        "tld" => config.tld = text,
        "slow" => config.slow = Some(bool_value(key, value)?),
        "skip_existing" => config.skip_existing = Some(bool_value(key, value)?),
        _ => unreachable!(), // Already validated
    }

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value.trim()));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    let value = config_value(&config, key);
    presenter.output(value.as_deref().unwrap_or(NOT_SET));

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = config_value(&config, key);
        presenter.key_value(key, value.as_deref().unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        Ok(())
    } else {
        Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        })
    }
}

/// Stored value of a key, rendered for display
fn config_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "credentials" => config.credentials.clone(),
        "bucket" => config.bucket.clone(),
        "project_id" => config.project_id.clone(),
        "collection" => config.collection.clone(),
        "prefix" => config.prefix.clone(),
        "output_dir" => config.output_dir.clone(),
        "language" => config.language.clone(),
        "tld" => config.tld.clone(),
        "slow" => config.slow.map(|b| b.to_string()),
        "skip_existing" => config.skip_existing.map(|b| b.to_string()),
        _ => None,
    }
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };
    let value = value.trim();

    match key {
        "slow" | "skip_existing" => {
            bool_value(key, value)?;
        }
        "language" => {
            let valid = !value.is_empty()
                && value.chars().all(|c| c.is_ascii_alphabetic() || c == '-');
            if !valid {
                return Err(invalid(format!(
                    "Invalid language '{}'. Use a code such as en, fr or zh-CN",
                    value
                )));
            }
        }
        "tld" => {
            let valid = !value.is_empty()
                && !value.starts_with('.')
                && !value.ends_with('.')
                && value.chars().all(|c| c.is_ascii_alphanumeric() || c == '.');
            if !valid {
                return Err(invalid(format!(
                    "Invalid domain '{}'. Use a suffix such as com, co.uk or com.au",
                    value
                )));
            }
        }
        "prefix" => {
            if value.trim_matches('/').contains("//") {
                return Err(invalid("Prefix must not contain empty segments".to_string()));
            }
        }
        _ => {
            if value.is_empty() {
                return Err(invalid("Value must not be empty".to_string()));
            }
        }
    }
    Ok(())
}

fn bool_value(key: &str, value: &str) -> Result<bool, ConfigError> {
    parse_bool(value).map_err(|_| ConfigError::ValidationError {
        key: key.to_string(),
        message: "Value must be 'true' or 'false'".to_string(),
    })
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}
