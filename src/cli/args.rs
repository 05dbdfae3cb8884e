//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::config::{AppConfig, RecognizerConfig};
use crate::domain::console::ServerId;
use crate::domain::recognition::ConfidenceThreshold;

/// VoxRelay - speak commands into a remote server console
#[derive(Parser, Debug)]
#[command(name = "voxrelay")]
#[command(version)]
#[command(about = "Relay spoken commands to a remote server console")]
#[command(long_about = None)]
pub struct Cli {
    /// Connect to this server once instead of prompting
    #[arg(short = 's', long, value_name = "ID")]
    pub server: Option<ServerId>,

    /// Type commands instead of speaking them
    #[arg(short = 'c', long)]
    pub console: bool,

    /// Recognizer language tag (e.g., en-US)
    #[arg(short = 'l', long, value_name = "TAG")]
    pub language: Option<String>,

    /// Grammar definition file for the live recognizer
    #[arg(short = 'g', long, value_name = "PATH")]
    pub grammar: Option<PathBuf>,

    /// Alias file with one `trigger,replacement` per line
    #[arg(short = 'a', long, value_name = "PATH")]
    pub aliases: Option<PathBuf>,

    /// Accept low-confidence phrases scoring above this threshold (0-1)
    #[arg(long, value_name = "THRESHOLD")]
    pub confidence: Option<ConfidenceThreshold>,

    /// Send payloads without JSON escaping
    #[arg(long)]
    pub raw_payload: bool,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Config layer built from command-line overrides
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            alias_file: self.aliases.clone(),
            raw_payload: self.raw_payload.then_some(true),
            recognizer: Some(RecognizerConfig {
                language: self.language.clone(),
                grammar_file: self.grammar.clone(),
                command: None,
                console_mode: self.console.then_some(true),
                override_confidence: self.confidence.map(|t| t.value()),
            }),
            ..Default::default()
        }
    }
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the servers you have joined
    Servers,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
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

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "username",
    "password",
    "api_url",
    "alias_file",
    "raw_payload",
    "recognizer.language",
    "recognizer.grammar_file",
    "recognizer.command",
    "recognizer.console_mode",
    "recognizer.override_confidence",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
