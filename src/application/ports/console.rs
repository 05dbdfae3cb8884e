//! Console transport port interfaces

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::console::ConsoleAccess;

/// Console transport errors
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("Invalid console URI: {0}")]
    InvalidUri(String),

    #[error("Failed to send command: {0}")]
    SendFailed(String),

    #[error("Console rejected command (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Port for delivering encoded commands to a console
#[async_trait]
pub trait ConsoleTransport: Send + Sync {
    /// Send an encoded command.
    ///
    /// Callers treat this as fire-and-forget; the result is only logged.
    async fn send(&self, payload: String) -> Result<(), TransportError>;
}

/// Port for building a transport from granted connection details
pub trait ConsoleConnector: Send + Sync {
    type Transport: ConsoleTransport + 'static;

    /// Build a transport for the granted URI and token.
    fn connect(&self, access: &ConsoleAccess) -> Result<Self::Transport, TransportError>;
}
