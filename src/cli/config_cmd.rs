//! Config command handler

use std::path::PathBuf;

use reqwest::Url;

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, RecognizerConfig};
use crate::domain::error::ConfigError;
use crate::domain::recognition::ConfidenceThreshold;

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

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;
    store.save(&config).await?;

    let shown = display_value(&config, key).unwrap_or_else(|| value.to_string());
    presenter.success(&format!("{} = {}", key, shown));
    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    presenter.output(&display_value(&config, key).unwrap_or_else(|| NOT_SET.to_string()));
    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = display_value(&config, key).unwrap_or_else(|| NOT_SET.to_string());
        presenter.key_value(key, &value);
    }
    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

/// Validate `value` for `key` and store it in `config`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    if value.trim().is_empty() {
        return Err(invalid("Value must not be empty".to_string()));
    }

    if let Some(field) = key.strip_prefix("recognizer.") {
        let recognizer = config.recognizer.get_or_insert_with(RecognizerConfig::default);
        match field {
            "language" => recognizer.language = Some(value.to_string()),
            "grammar_file" => recognizer.grammar_file = Some(PathBuf::from(value)),
            "command" => recognizer.command = Some(value.to_string()),
            "console_mode" => recognizer.console_mode = Some(parse_bool(value).map_err(invalid)?),
            "override_confidence" => {
                let threshold = value
                    .parse::<ConfidenceThreshold>()
                    .map_err(|e| invalid(e.to_string()))?;
                recognizer.override_confidence = Some(threshold.value());
            }
            _ => return Err(invalid("Unknown recognizer key".to_string())),
        }
        return Ok(());
    }

    match key {
        "username" => config.username = Some(value.to_string()),
        "password" => config.password = Some(value.to_string()),
        "api_url" => {
            Url::parse(value).map_err(|e| invalid(format!("Invalid URL: {}", e)))?;
            config.api_url = Some(value.to_string());
        }
        "alias_file" => config.alias_file = Some(PathBuf::from(value)),
        "raw_payload" => config.raw_payload = Some(parse_bool(value).map_err(invalid)?),
        _ => return Err(invalid("Unknown key".to_string())),
    }
    Ok(())
}

/// Current value of `key` for display, with secrets masked
fn display_value(config: &AppConfig, key: &str) -> Option<String> {
    let recognizer = config.recognizer.as_ref();
    match key {
        "username" => config.username.clone(),
        "password" => config.password.as_deref().map(mask_secret),
        "api_url" => config.api_url.clone(),
        "alias_file" => config.alias_file.as_ref().map(|p| p.display().to_string()),
        "raw_payload" => config.raw_payload.map(|b| b.to_string()),
        "recognizer.language" => recognizer.and_then(|r| r.language.clone()),
        "recognizer.grammar_file" => recognizer
            .and_then(|r| r.grammar_file.as_ref())
            .map(|p| p.display().to_string()),
        "recognizer.command" => recognizer.and_then(|r| r.command.clone()),
        "recognizer.console_mode" => recognizer
            .and_then(|r| r.console_mode)
            .map(|b| b.to_string()),
        "recognizer.override_confidence" => recognizer
            .and_then(|r| r.override_confidence)
            .map(|v| v.to_string()),
        _ => None,
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, String> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err("Value must be 'true' or 'false'".to_string()),
    }
}

fn mask_secret(secret: &str) -> String {
    "*".repeat(secret.chars().count().max(8))
}
