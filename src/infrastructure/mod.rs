//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the web API, the remote console, recognizers and
//! local files.

pub mod alias;
pub mod config;
pub mod console;
pub mod recognition;
pub mod webapi;

// Re-export adapters
pub use alias::{AliasFileLoader, AliasLoadError};
pub use config::XdgConfigStore;
pub use console::{HttpConsoleConnector, HttpConsoleTransport};
pub use recognition::{create_recognizer, EmulatedRecognizer, LineInput, ProcessRecognizer};
pub use webapi::WebApiClient;
