//! Console authorization port interfaces

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::console::{ConsoleAccess, ServerId, ServerSummary};

/// Authorization errors
#[derive(Debug, Clone, Error)]
pub enum AuthorizationError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Request rejected (HTTP {status}): {message}")]
    RequestRejected { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// Port for requesting console access to a server
#[async_trait]
pub trait ConsoleAuthorizer: Send + Sync {
    /// Request console connection details for a server.
    ///
    /// # Arguments
    /// * `server` - The target server
    ///
    /// # Returns
    /// The access grant (which may still be `allowed == false`) or an error
    async fn request_console_access(
        &self,
        server: ServerId,
    ) -> Result<ConsoleAccess, AuthorizationError>;
}

/// Port for listing the servers an operator can target
#[async_trait]
pub trait ServerDirectory: Send + Sync {
    /// List the servers the operator has joined.
    async fn joined_servers(&self) -> Result<Vec<ServerSummary>, AuthorizationError>;
}

#[async_trait]
impl<T: ConsoleAuthorizer + ?Sized> ConsoleAuthorizer for Arc<T> {
    async fn request_console_access(
        &self,
        server: ServerId,
    ) -> Result<ConsoleAccess, AuthorizationError> {
        self.as_ref().request_console_access(server).await
    }
}

#[async_trait]
impl<T: ServerDirectory + ?Sized> ServerDirectory for Arc<T> {
    async fn joined_servers(&self) -> Result<Vec<ServerSummary>, AuthorizationError> {
        self.as_ref().joined_servers().await
    }
}
