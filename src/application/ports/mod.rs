//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod authorizer;
pub mod config;
pub mod console;
pub mod recognizer;

// Re-export common types
pub use authorizer::{AuthorizationError, ConsoleAuthorizer, ServerDirectory};
pub use config::ConfigStore;
pub use console::{ConsoleConnector, ConsoleTransport, TransportError};
pub use recognizer::{RecognitionSink, Recognizer, RecognizerError};
