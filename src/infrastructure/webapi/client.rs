//! Web API client for console authorization and server listing

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::debug;

use crate::application::ports::{AuthorizationError, ConsoleAuthorizer, ServerDirectory};
use crate::domain::console::{ConsoleAccess, ServerId, ServerSummary, UserCredential};

// Request types

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

// Response types

#[derive(Debug, Deserialize)]
struct LoginResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ServerResponse {
    id: i64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ConsoleAccessResponse {
    allowed: bool,
    #[serde(default)]
    uri: String,
    #[serde(default)]
    token: String,
}

/// Web API client.
///
/// Logs in on first use and reuses the access token for the lifetime of the
/// client.
pub struct WebApiClient {
    base_url: String,
    credential: UserCredential,
    client: reqwest::Client,
    access_token: OnceCell<String>,
}

impl WebApiClient {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: impl Into<String>, credential: UserCredential) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            credential,
            client: reqwest::Client::new(),
            access_token: OnceCell::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn access_token(&self) -> Result<&str, AuthorizationError> {
        self.access_token
            .get_or_try_init(|| self.login())
            .await
            .map(String::as_str)
    }

    async fn login(&self) -> Result<String, AuthorizationError> {
        debug!(username = %self.credential.username, "Logging in to web API");

        let body = LoginRequest {
            username: &self.credential.username,
            password: &self.credential.password,
        };
        let response = self
            .client
            .post(self.url("/sessions"))
            .json(&body)
            .send()
            .await
            .map_err(|e| AuthorizationError::RequestFailed(e.to_string()))?;

        let login: LoginResponse = Self::parse(response).await?;
        Ok(login.access_token)
    }

    /// Map HTTP status and decode the JSON body
    async fn parse<T>(response: reqwest::Response) -> Result<T, AuthorizationError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AuthorizationError::InvalidCredentials);
        }

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AuthorizationError::RequestRejected {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| AuthorizationError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl ServerDirectory for WebApiClient {
    async fn joined_servers(&self) -> Result<Vec<ServerSummary>, AuthorizationError> {
        let token = self.access_token().await?;

        let response = self
            .client
            .get(self.url("/servers/joined"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthorizationError::RequestFailed(e.to_string()))?;

        let servers: Vec<ServerResponse> = Self::parse(response).await?;
        Ok(servers
            .into_iter()
            .map(|s| ServerSummary {
                id: ServerId::new(s.id),
                name: s.name,
            })
            .collect())
    }
}

#[async_trait]
impl ConsoleAuthorizer for WebApiClient {
    async fn request_console_access(
        &self,
        server: ServerId,
    ) -> Result<ConsoleAccess, AuthorizationError> {
        let token = self.access_token().await?;
        debug!(%server, "Requesting console access");

        let response = self
            .client
            .post(self.url(&format!("/servers/{}/console", server.value())))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthorizationError::RequestFailed(e.to_string()))?;

        let access: ConsoleAccessResponse = Self::parse(response).await?;
        Ok(ConsoleAccess {
            allowed: access.allowed,
            uri: access.uri,
            token: access.token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn credential() -> UserCredential {
        UserCredential::new("operator", "hunter2")
    }

    async fn mount_login(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/sessions"))
            .and(body_json(json!({"username": "operator", "password": "hunter2"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "abc"})))
            .expect(1)
            .mount(server)
            .await;
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = WebApiClient::new("http://localhost/api/", credential());
        assert_eq!(client.url("/sessions"), "http://localhost/api/sessions");
    }

    #[tokio::test]
    async fn lists_joined_servers() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("GET"))
            .and(path("/servers/joined"))
            .and(header("authorization", "Bearer abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Main Town"},
                {"id": 7, "name": "Test Realm"}
            ])))
            .mount(&server)
            .await;

        let client = WebApiClient::new(server.uri(), credential());
        let servers = client.joined_servers().await.unwrap();

        assert_eq!(servers.len(), 2);
        assert_eq!(servers[1].id, ServerId::new(7));
        assert_eq!(servers[1].name, "Test Realm");
    }

    #[tokio::test]
    async fn login_happens_once() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("POST"))
            .and(path("/servers/3/console"))
            .and(header("authorization", "Bearer abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "allowed": true,
                "uri": "http://console.test/3",
                "token": "console-token"
            })))
            .expect(2)
            .mount(&server)
            .await;

        let client = WebApiClient::new(server.uri(), credential());
        for _ in 0..2 {
            let access = client.request_console_access(ServerId::new(3)).await.unwrap();
            assert!(access.allowed);
            assert_eq!(access.uri, "http://console.test/3");
            assert_eq!(access.token, "console-token");
        }
    }

    #[tokio::test]
    async fn denied_access_without_details() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("POST"))
            .and(path("/servers/3/console"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"allowed": false})))
            .mount(&server)
            .await;

        let client = WebApiClient::new(server.uri(), credential());
        let access = client.request_console_access(ServerId::new(3)).await.unwrap();
        assert!(!access.allowed);
        assert!(access.uri.is_empty());
    }

    #[tokio::test]
    async fn unauthorized_login_is_invalid_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/sessions"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = WebApiClient::new(server.uri(), credential());
        let err = client.joined_servers().await.unwrap_err();
        assert!(matches!(err, AuthorizationError::InvalidCredentials));
    }

    #[tokio::test]
    async fn server_error_is_rejected_with_body() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("POST"))
            .and(path("/servers/9/console"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let client = WebApiClient::new(server.uri(), credential());
        let err = client
            .request_console_access(ServerId::new(9))
            .await
            .unwrap_err();

        match err {
            AuthorizationError::RequestRejected { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_parse_error() {
        let server = MockServer::start().await;
        mount_login(&server).await;
        Mock::given(method("GET"))
            .and(path("/servers/joined"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = WebApiClient::new(server.uri(), credential());
        let err = client.joined_servers().await.unwrap_err();
        assert!(matches!(err, AuthorizationError::ParseError(_)));
    }

    #[tokio::test]
    async fn unreachable_api_is_request_failed() {
        let client = WebApiClient::new("http://127.0.0.1:9", credential());
        let err = client.joined_servers().await.unwrap_err();
        assert!(matches!(err, AuthorizationError::RequestFailed(_)));
    }
}
