//! Voice command relay use case

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::domain::alias::{AliasTable, TextNormalizer};
use crate::domain::command::{Command, CommandEncoder, PayloadFormat};
use crate::domain::console::ServerId;
use crate::domain::recognition::{
    is_quit_utterance, AcceptanceDecision, ConfidenceThreshold, RecognitionGate,
    RecognitionResult, RejectReason,
};
use crate::domain::session::{InvalidStateTransition, RelayState, SessionState};

use super::ports::{
    AuthorizationError, ConsoleAuthorizer, ConsoleConnector, ConsoleTransport, Recognizer,
    RecognizerError, TransportError,
};
use super::stop::StopHandle;

/// Errors from the relay use case
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Console access not allowed for server {server}")]
    AuthorizationDenied { server: ServerId },

    #[error("Failed while requesting console access for server {server}: {source}")]
    AuthorizationFailed {
        server: ServerId,
        #[source]
        source: AuthorizationError,
    },

    #[error("Console unavailable: {0}")]
    ConsoleUnavailable(#[source] TransportError),

    #[error("Recognizer unavailable: {0}")]
    RecognizerUnavailable(#[from] RecognizerError),

    #[error("Invalid state transition: {0}")]
    InvalidState(#[from] InvalidStateTransition),
}

/// Configuration for a relay session
#[derive(Debug, Clone, Default)]
pub struct RelayConfig {
    /// Alias table, including the built-ins
    pub aliases: AliasTable,
    /// Override threshold for low-confidence results
    pub override_confidence: Option<ConfidenceThreshold>,
    /// Wire format for encoded commands
    pub payload_format: PayloadFormat,
}

/// Counts reported when a session completes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelaySummary {
    /// Commands handed to the transport
    pub dispatched: u64,
    /// Utterances dropped by the confidence gate
    pub rejected: u64,
}

/// Callbacks for status updates
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct RelayCallbacks {
    /// Called after every state transition
    pub on_state_change: Option<Box<dyn Fn(SessionState) + Send + Sync>>,
    /// Called with the raw utterance and the command built from it
    pub on_dispatch: Option<Box<dyn Fn(&str, &Command) + Send + Sync>>,
    /// Called when an utterance falls at or below the override threshold
    pub on_reject: Option<Box<dyn Fn(&RecognitionResult, &RejectReason) + Send + Sync>>,
}

/// One connect/listen/stop cycle against a single console.
///
/// Command ids start at 0 and are assigned in acceptance order. A stopped
/// session cannot be reused.
pub struct RelaySession<A, C, R>
where
    A: ConsoleAuthorizer,
    C: ConsoleConnector,
    R: Recognizer,
{
    authorizer: A,
    connector: C,
    recognizer: R,
    gate: RecognitionGate,
    normalizer: TextNormalizer,
    encoder: CommandEncoder,
    state: RelayState,
    next_id: u64,
    stop: StopHandle,
}

impl<A, C, R> RelaySession<A, C, R>
where
    A: ConsoleAuthorizer,
    C: ConsoleConnector,
    R: Recognizer,
{
    /// Create a new relay session
    pub fn new(authorizer: A, connector: C, recognizer: R, config: RelayConfig) -> Self {
        Self {
            authorizer,
            connector,
            recognizer,
            gate: RecognitionGate::new(config.override_confidence),
            normalizer: TextNormalizer::new(config.aliases),
            encoder: CommandEncoder::new(config.payload_format),
            state: RelayState::new(),
            next_id: 0,
            stop: StopHandle::new(),
        }
    }

    /// Get current session state
    pub fn state(&self) -> SessionState {
        self.state.state()
    }

    /// Id the next accepted utterance will receive
    pub fn next_command_id(&self) -> u64 {
        self.next_id
    }

    /// Handle that stops the session from another task
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Request a stop. Later calls are no-ops.
    pub fn stop(&self) -> bool {
        self.stop.stop()
    }

    /// Connect to the server's console and relay recognized speech until stopped.
    ///
    /// Returns once the stop signal fires, either from a `quit` utterance, the
    /// end of recognizer input, or a `StopHandle`.
    pub async fn connect_and_listen(
        &mut self,
        server: ServerId,
        callbacks: RelayCallbacks,
    ) -> Result<RelaySummary, RelayError> {
        self.transition(&callbacks, RelayState::begin_connect)?;

        let (transport, mut results) = match self.connect(server).await {
            Ok(connection) => connection,
            Err(e) => {
                self.transition(&callbacks, RelayState::abort)?;
                self.stop.stop();
                return Err(e);
            }
        };

        self.transition(&callbacks, RelayState::start_listening)?;
        info!(%server, "Listening for commands");

        let transport = Arc::new(transport);
        let stop = self.stop.clone();
        let mut summary = RelaySummary::default();

        loop {
            tokio::select! {
                biased;
                _ = stop.stopped() => break,
                received = results.recv() => match received {
                    Some(result) => self.handle(result, &transport, &callbacks, &mut summary),
                    None => {
                        debug!("Recognizer input ended");
                        stop.stop();
                    }
                },
            }
        }

        self.transition(&callbacks, RelayState::begin_stop)?;
        info!("Stopping...");

        drop(results);
        if let Err(e) = self.recognizer.stop().await {
            warn!(error = %e, "Failed to release recognizer");
        }
        self.stop.stop();

        self.transition(&callbacks, RelayState::finish_stop)?;
        info!(
            dispatched = summary.dispatched,
            rejected = summary.rejected,
            "Session stopped"
        );

        Ok(summary)
    }

    async fn connect(
        &mut self,
        server: ServerId,
    ) -> Result<(C::Transport, mpsc::UnboundedReceiver<RecognitionResult>), RelayError> {
        let access = self
            .authorizer
            .request_console_access(server)
            .await
            .map_err(|source| RelayError::AuthorizationFailed { server, source })?;

        info!(%server, allowed = access.allowed, "Got connection details");

        if !access.allowed {
            return Err(RelayError::AuthorizationDenied { server });
        }

        let transport = self
            .connector
            .connect(&access)
            .map_err(RelayError::ConsoleUnavailable)?;

        let (sink, results) = mpsc::unbounded_channel();
        self.recognizer.start(sink).await?;

        Ok((transport, results))
    }

    fn handle(
        &mut self,
        result: RecognitionResult,
        transport: &Arc<C::Transport>,
        callbacks: &RelayCallbacks,
        summary: &mut RelaySummary,
    ) {
        let text = match self.gate.evaluate(&result) {
            AcceptanceDecision::Accept(text) => text,
            AcceptanceDecision::Reject(reason @ RejectReason::NoOverride { .. }) => {
                debug!(text = %result.text, %reason, "Skipping flagged phrase");
                summary.rejected += 1;
                return;
            }
            AcceptanceDecision::Reject(reason) => {
                warn!(
                    text = %result.text,
                    confidence = result.confidence,
                    %reason,
                    "Failed recognizing phrase"
                );
                summary.rejected += 1;
                if let Some(ref cb) = callbacks.on_reject {
                    cb(&result, &reason);
                }
                return;
            }
        };

        if is_quit_utterance(&text) {
            info!("Quit requested");
            self.stop.stop();
            return;
        }

        let command = Command::new(self.next_id, self.normalizer.normalize(&text));
        let payload = match self.encoder.encode_command(&command) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Dropping command");
                return;
            }
        };
        self.next_id += 1;
        summary.dispatched += 1;

        info!(
            id = command.id(),
            raw = %text,
            converted = %command.payload(),
            "Relaying command"
        );
        if let Some(ref cb) = callbacks.on_dispatch {
            cb(&text, &command);
        }

        let id = command.id();
        let transport = Arc::clone(transport);
        tokio::spawn(async move {
            if let Err(e) = transport.send(payload).await {
                warn!(id, error = %e, "Transport send failed");
            }
        });
    }

    fn transition(
        &mut self,
        callbacks: &RelayCallbacks,
        step: fn(&mut RelayState) -> Result<(), InvalidStateTransition>,
    ) -> Result<(), RelayError> {
        step(&mut self.state)?;

        let state = self.state.state();
        debug!(%state, "Session state changed");
        if let Some(ref cb) = callbacks.on_state_change {
            cb(state);
        }
        Ok(())
    }
}
