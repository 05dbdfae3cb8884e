//! Relay session domain module

mod state;

pub use state::{InvalidStateTransition, RelayState, SessionState};
