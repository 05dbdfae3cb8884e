//! Recognition result value object

use std::fmt;

/// Reserved utterance that stops the session instead of being relayed
pub const QUIT_UTTERANCE: &str = "quit";

/// How the recognizer classified a phrase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecognitionKind {
    /// Primary, high-confidence result
    #[default]
    Recognized,
    /// Flagged as low-confidence by the recognizer
    Rejected,
}

impl RecognitionKind {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recognized => "recognized",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for RecognitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One recognized phrase with its confidence score
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionResult {
    pub text: String,
    pub confidence: f32,
    pub kind: RecognitionKind,
}

impl RecognitionResult {
    /// A primary result from the recognizer
    pub fn recognized(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence: confidence.clamp(0.0, 1.0),
            kind: RecognitionKind::Recognized,
        }
    }

    /// A result the recognizer flagged as low-confidence
    pub fn rejected(text: impl Into<String>, confidence: f32) -> Self {
        Self {
            text: text.into(),
            confidence: confidence.clamp(0.0, 1.0),
            kind: RecognitionKind::Rejected,
        }
    }

    /// Whether the phrase is the reserved quit utterance
    pub fn is_quit(&self) -> bool {
        is_quit_utterance(&self.text)
    }
}

/// Whether `text` is the reserved quit utterance (case-insensitive)
pub fn is_quit_utterance(text: &str) -> bool {
    text.trim().to_lowercase() == QUIT_UTTERANCE
}
