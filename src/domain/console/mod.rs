//! Remote console value objects

use std::fmt;
use std::str::FromStr;

use crate::domain::error::ServerIdParseError;

/// Identifier of a target console server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ServerId(i64);

impl ServerId {
    /// Wrap a raw server id
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw id
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ServerId {
    type Err = ServerIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| ServerIdParseError {
                input: s.to_string(),
            })
    }
}

/// A server the operator has joined
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSummary {
    pub id: ServerId,
    pub name: String,
}

/// Console connection details granted by the authorization collaborator
#[derive(Clone, PartialEq, Eq)]
pub struct ConsoleAccess {
    pub allowed: bool,
    pub uri: String,
    pub token: String,
}

impl fmt::Debug for ConsoleAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleAccess")
            .field("allowed", &self.allowed)
            .field("uri", &self.uri)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Operator login. The username doubles as the operator identity.
#[derive(Clone, PartialEq, Eq)]
pub struct UserCredential {
    pub username: String,
    pub password: String,
}

impl UserCredential {
    /// Create a credential
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for UserCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserCredential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
