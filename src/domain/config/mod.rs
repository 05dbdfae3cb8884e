//! Configuration domain module

mod app_config;

pub use app_config::{
    AppConfig, RecognizerConfig, DEFAULT_API_URL, DEFAULT_GRAMMAR_FILE, DEFAULT_LANGUAGE,
    DEFAULT_RECOGNIZER_COMMAND,
};
