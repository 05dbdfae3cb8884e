//! HTTP console transport adapter

use std::fmt;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use tracing::debug;

use crate::application::ports::{ConsoleConnector, ConsoleTransport, TransportError};
use crate::domain::console::ConsoleAccess;

/// Builds HTTP transports sharing one connection pool
#[derive(Debug, Clone, Default)]
pub struct HttpConsoleConnector {
    client: reqwest::Client,
}

impl HttpConsoleConnector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConsoleConnector for HttpConsoleConnector {
    type Transport = HttpConsoleTransport;

    fn connect(&self, access: &ConsoleAccess) -> Result<HttpConsoleTransport, TransportError> {
        let uri = Url::parse(&access.uri)
            .map_err(|e| TransportError::InvalidUri(format!("{}: {}", access.uri, e)))?;

        if !matches!(uri.scheme(), "http" | "https") {
            return Err(TransportError::InvalidUri(format!(
                "{}: unsupported scheme '{}'",
                access.uri,
                uri.scheme()
            )));
        }

        debug!(%uri, "Console transport ready");
        Ok(HttpConsoleTransport {
            client: self.client.clone(),
            uri,
            token: access.token.clone(),
        })
    }
}

/// Posts each encoded command to the granted console URI
pub struct HttpConsoleTransport {
    client: reqwest::Client,
    uri: Url,
    token: String,
}

impl HttpConsoleTransport {
    pub fn uri(&self) -> &Url {
        &self.uri
    }
}

impl fmt::Debug for HttpConsoleTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpConsoleTransport")
            .field("uri", &self.uri.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl ConsoleTransport for HttpConsoleTransport {
    async fn send(&self, payload: String) -> Result<(), TransportError> {
        let response = self
            .client
            .post(self.uri.clone())
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| TransportError::SendFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}
