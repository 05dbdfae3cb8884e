//! Relay session state machine

use std::fmt;
use thiserror::Error;

/// Relay session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Connecting,
    Listening,
    Stopping,
    Stopped,
}

impl SessionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::Listening => "listening",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
        }
    }

    /// Whether no further transition is possible
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Stopped)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidStateTransition {
    pub current_state: SessionState,
    pub action: String,
}

/// Relay session lifecycle.
///
/// State machine:
///   IDLE -> CONNECTING (begin_connect)
///   CONNECTING -> LISTENING (start_listening)
///   CONNECTING -> STOPPED (abort)
///   LISTENING -> STOPPING (begin_stop)
///   STOPPING -> STOPPED (finish_stop)
#[derive(Debug, Default)]
pub struct RelayState {
    state: SessionState,
}

impl RelayState {
    /// Create a new lifecycle in idle state
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }

    /// Get the current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    fn transition(
        &mut self,
        from: SessionState,
        to: SessionState,
        action: &str,
    ) -> Result<(), InvalidStateTransition> {
        if self.state != from {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: action.to_string(),
            });
        }
        self.state = to;
        Ok(())
    }

    /// Transition from IDLE to CONNECTING
    pub fn begin_connect(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(SessionState::Idle, SessionState::Connecting, "connect")
    }

    /// Transition from CONNECTING to LISTENING
    pub fn start_listening(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(SessionState::Connecting, SessionState::Listening, "start listening")
    }

    /// Transition from CONNECTING to STOPPED after a failed connection attempt
    pub fn abort(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(SessionState::Connecting, SessionState::Stopped, "abort connection")
    }

    /// Transition from LISTENING to STOPPING
    pub fn begin_stop(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(SessionState::Listening, SessionState::Stopping, "stop")
    }

    /// Transition from STOPPING to STOPPED
    pub fn finish_stop(&mut self) -> Result<(), InvalidStateTransition> {
        self.transition(SessionState::Stopping, SessionState::Stopped, "finish stopping")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle() {
        let state = RelayState::new();
        assert_eq!(state.state(), SessionState::Idle);
        assert!(!state.state().is_terminal());
    }

    #[test]
    fn full_cycle() {
        let mut state = RelayState::new();
        state.begin_connect().unwrap();
        assert_eq!(state.state(), SessionState::Connecting);

        state.start_listening().unwrap();
        assert_eq!(state.state(), SessionState::Listening);

        state.begin_stop().unwrap();
        assert_eq!(state.state(), SessionState::Stopping);

        state.finish_stop().unwrap();
        assert_eq!(state.state(), SessionState::Stopped);
        assert!(state.state().is_terminal());
    }

    #[test]
    fn abort_from_connecting() {
        let mut state = RelayState::new();
        state.begin_connect().unwrap();
        state.abort().unwrap();
        assert_eq!(state.state(), SessionState::Stopped);
    }

    #[test]
    fn stopped_is_terminal() {
        let mut state = RelayState::new();
        state.begin_connect().unwrap();
        state.abort().unwrap();

        let err = state.begin_connect().unwrap_err();
        assert_eq!(err.current_state, SessionState::Stopped);
        assert!(err.action.contains("connect"));
    }

    #[test]
    fn listen_from_idle_fails() {
        let mut state = RelayState::new();
        let err = state.start_listening().unwrap_err();
        assert_eq!(err.current_state, SessionState::Idle);
    }

    #[test]
    fn stop_from_connecting_fails() {
        let mut state = RelayState::new();
        state.begin_connect().unwrap();
        let err = state.begin_stop().unwrap_err();
        assert_eq!(err.current_state, SessionState::Connecting);
    }

    #[test]
    fn abort_from_listening_fails() {
        let mut state = RelayState::new();
        state.begin_connect().unwrap();
        state.start_listening().unwrap();
        assert!(state.abort().is_err());
        assert_eq!(state.state(), SessionState::Listening);
    }

    #[test]
    fn state_display() {
        assert_eq!(SessionState::Idle.to_string(), "idle");
        assert_eq!(SessionState::Connecting.to_string(), "connecting");
        assert_eq!(SessionState::Listening.to_string(), "listening");
        assert_eq!(SessionState::Stopping.to_string(), "stopping");
        assert_eq!(SessionState::Stopped.to_string(), "stopped");
    }

    #[test]
    fn error_display() {
        let err = InvalidStateTransition {
            current_state: SessionState::Stopped,
            action: "connect".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("connect"));
        assert!(msg.contains("stopped"));
    }
}
