//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod alias;
pub mod command;
pub mod config;
pub mod console;
pub mod error;
pub mod recognition;
pub mod session;

// Re-export common types
pub use alias::{AliasEntry, AliasTable, TextNormalizer};
pub use command::{Command, CommandEncoder, PayloadFormat};
pub use config::AppConfig;
pub use console::{ConsoleAccess, ServerId, ServerSummary, UserCredential};
pub use error::*;
pub use recognition::{
    AcceptanceDecision, ConfidenceThreshold, RecognitionGate, RecognitionKind, RecognitionResult,
};
pub use session::{RelayState, SessionState};
