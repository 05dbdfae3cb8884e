//! Application layer - Use cases and port interfaces
//!
//! Contains the relay session use case and trait definitions
//! for external system interactions.

pub mod ports;
pub mod relay;
pub mod stop;

// Re-export use cases
pub use relay::{RelayCallbacks, RelayConfig, RelayError, RelaySession, RelaySummary};
pub use stop::StopHandle;
