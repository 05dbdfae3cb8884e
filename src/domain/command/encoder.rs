//! Console command and wire encoding

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A relayed command. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Command {
    id: u64,
    #[serde(rename = "content")]
    payload: String,
}

impl Command {
    /// Create a command
    pub fn new(id: u64, payload: impl Into<String>) -> Self {
        Self {
            id,
            payload: payload.into(),
        }
    }

    /// Session-scoped command identifier
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Normalized text to run on the console
    pub fn payload(&self) -> &str {
        &self.payload
    }
}

/// Error when a command cannot be encoded
#[derive(Debug, Error)]
#[error("Failed to encode command {id}: {message}")]
pub struct EncodeError {
    pub id: u64,
    pub message: String,
}

/// Wire format for encoded commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PayloadFormat {
    /// JSON with the text field escaped
    #[default]
    Json,
    /// Legacy format: the text is interpolated without escaping
    Raw,
}

impl PayloadFormat {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Raw => "raw",
        }
    }
}

impl fmt::Display for PayloadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Serializes commands into `{"id":<id>,"content":"<text>"}`
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandEncoder {
    format: PayloadFormat,
}

impl CommandEncoder {
    /// Create an encoder for the given wire format
    pub fn new(format: PayloadFormat) -> Self {
        Self { format }
    }

    /// The wire format in use
    pub fn format(&self) -> PayloadFormat {
        self.format
    }

    /// Encode an id and text payload
    pub fn encode(&self, id: u64, text: &str) -> Result<String, EncodeError> {
        self.encode_command(&Command::new(id, text))
    }

    /// Encode a command
    pub fn encode_command(&self, command: &Command) -> Result<String, EncodeError> {
        match self.format {
            PayloadFormat::Json => serde_json::to_string(command).map_err(|e| EncodeError {
                id: command.id,
                message: e.to_string(),
            }),
            PayloadFormat::Raw => Ok(format!(
                "{{\"id\":{},\"content\":\"{}\"}}",
                command.id, command.payload
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_encodes_two_fields() {
        let encoder = CommandEncoder::default();
        assert_eq!(
            encoder.encode(0, "greetings world").unwrap(),
            r#"{"id":0,"content":"greetings world"}"#
        );
    }

    #[test]
    fn json_escapes_quotes_and_backslashes() {
        let encoder = CommandEncoder::new(PayloadFormat::Json);
        let encoded = encoder.encode(7, r#"say "hi" \o/"#).unwrap();
        assert_eq!(encoded, r#"{"id":7,"content":"say \"hi\" \\o/"}"#);

        let parsed: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(parsed["content"], r#"say "hi" \o/"#);
    }

    #[test]
    fn raw_matches_json_for_plain_text() {
        let json = CommandEncoder::new(PayloadFormat::Json);
        let raw = CommandEncoder::new(PayloadFormat::Raw);
        assert_eq!(
            json.encode(42, "player list").unwrap(),
            raw.encode(42, "player list").unwrap()
        );
    }

    #[test]
    fn raw_does_not_escape() {
        let encoder = CommandEncoder::new(PayloadFormat::Raw);
        assert_eq!(
            encoder.encode(1, r#"say "hi""#).unwrap(),
            r#"{"id":1,"content":"say "hi""}"#
        );
    }

    #[test]
    fn command_accessors() {
        let command = Command::new(3, "spawn");
        assert_eq!(command.id(), 3);
        assert_eq!(command.payload(), "spawn");
    }
}
