//! Recognizer selection by configured mode

use tracing::debug;

use crate::application::ports::Recognizer;
use crate::domain::config::AppConfig;

use super::emulated::EmulatedRecognizer;
use super::input::LineInput;
use super::process::{ProcessRecognizer, ProcessRecognizerSettings};

/// Which recognizer a session gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognizerMode {
    /// Typed lines stand in for speech
    Console,
    /// External engine listening to the microphone
    Live,
}

impl RecognizerMode {
    pub fn from_config(config: &AppConfig) -> Self {
        if config.console_mode_or_default() {
            Self::Console
        } else {
            Self::Live
        }
    }
}

/// Create exactly one recognizer for the configured mode
pub fn create_recognizer(config: &AppConfig, input: &LineInput) -> Box<dyn Recognizer> {
    let mode = RecognizerMode::from_config(config);
    debug!(?mode, "Creating recognizer");

    match mode {
        RecognizerMode::Console => Box::new(EmulatedRecognizer::new(input.clone())),
        RecognizerMode::Live => Box::new(ProcessRecognizer::new(ProcessRecognizerSettings {
            command: config.recognizer_command_or_default().to_string(),
            language: config.language_or_default().to_string(),
            grammar_file: config.grammar_file_or_default(),
        })),
    }
}
