//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::command::PayloadFormat;
use crate::domain::error::ConfigError;
use crate::domain::recognition::ConfidenceThreshold;

/// Default web API base URL
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080/api";

/// Default recognizer language tag
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Default grammar definition path
pub const DEFAULT_GRAMMAR_FILE: &str = "grammar.xml";

/// Default external recognizer executable for live audio
pub const DEFAULT_RECOGNIZER_COMMAND: &str = "voxrelay-recognizer";

/// Recognizer configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecognizerConfig {
    pub language: Option<String>,
    pub grammar_file: Option<PathBuf>,
    pub command: Option<String>,
    pub console_mode: Option<bool>,
    pub override_confidence: Option<f32>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub api_url: Option<String>,
    pub alias_file: Option<PathBuf>,
    pub raw_payload: Option<bool>,
    pub recognizer: Option<RecognizerConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            username: None,
            password: None,
            api_url: Some(DEFAULT_API_URL.to_string()),
            alias_file: None,
            raw_payload: Some(false),
            recognizer: Some(RecognizerConfig {
                language: Some(DEFAULT_LANGUAGE.to_string()),
                grammar_file: Some(PathBuf::from(DEFAULT_GRAMMAR_FILE)),
                command: Some(DEFAULT_RECOGNIZER_COMMAND.to_string()),
                console_mode: Some(false),
                override_confidence: None,
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            username: other.username.or(self.username),
            password: other.password.or(self.password),
            api_url: other.api_url.or(self.api_url),
            alias_file: other.alias_file.or(self.alias_file),
            raw_payload: other.raw_payload.or(self.raw_payload),
            recognizer: Self::merge_recognizer_config(self.recognizer, other.recognizer),
        }
    }

    /// Merge recognizer config sections
    fn merge_recognizer_config(
        base: Option<RecognizerConfig>,
        other: Option<RecognizerConfig>,
    ) -> Option<RecognizerConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(RecognizerConfig {
                language: o.language.or(b.language),
                grammar_file: o.grammar_file.or(b.grammar_file),
                command: o.command.or(b.command),
                console_mode: o.console_mode.or(b.console_mode),
                override_confidence: o.override_confidence.or(b.override_confidence),
            }),
        }
    }

    /// Get the web API base URL, or the default if not set
    pub fn api_url_or_default(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Get the payload format selected by `raw_payload`
    pub fn payload_format(&self) -> PayloadFormat {
        if self.raw_payload.unwrap_or(false) {
            PayloadFormat::Raw
        } else {
            PayloadFormat::Json
        }
    }

    /// Get the recognizer language tag, or "en-US" if not set
    pub fn language_or_default(&self) -> &str {
        self.recognizer
            .as_ref()
            .and_then(|r| r.language.as_deref())
            .unwrap_or(DEFAULT_LANGUAGE)
    }

    /// Get the grammar file path, or "grammar.xml" if not set
    pub fn grammar_file_or_default(&self) -> PathBuf {
        self.recognizer
            .as_ref()
            .and_then(|r| r.grammar_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_GRAMMAR_FILE))
    }

    /// Get the live recognizer executable, or the default if not set
    pub fn recognizer_command_or_default(&self) -> &str {
        self.recognizer
            .as_ref()
            .and_then(|r| r.command.as_deref())
            .unwrap_or(DEFAULT_RECOGNIZER_COMMAND)
    }

    /// Get the console mode setting, or false if not set
    pub fn console_mode_or_default(&self) -> bool {
        self.recognizer
            .as_ref()
            .and_then(|r| r.console_mode)
            .unwrap_or(false)
    }

    /// Get the override threshold. Call `validate` first; out-of-range values read as unset.
    pub fn override_confidence(&self) -> Option<ConfidenceThreshold> {
        self.recognizer
            .as_ref()
            .and_then(|r| r.override_confidence)
            .and_then(|value| ConfidenceThreshold::new(value).ok())
    }

    /// Check values that deserialize fine but are out of range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(value) = self.recognizer.as_ref().and_then(|r| r.override_confidence) {
            ConfidenceThreshold::new(value).map_err(|e| ConfigError::ValidationError {
                key: "recognizer.override_confidence".to_string(),
                message: e.to_string(),
            })?;
        }
        Ok(())
    }
}
