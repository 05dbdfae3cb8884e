//! Speech recognizer port interface

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::recognition::RecognitionResult;

/// Recognizer errors
#[derive(Debug, Clone, Error)]
pub enum RecognizerError {
    #[error("Recognizer executable not found: {0}")]
    NotFound(String),

    #[error("Grammar file not found: {0}")]
    GrammarNotFound(String),

    #[error("Failed to start recognizer: {0}")]
    StartFailed(String),

    #[error("Recognizer is already running")]
    AlreadyStarted,

    #[error("Failed to stop recognizer: {0}")]
    StopFailed(String),
}

/// Channel end the recognizer pushes results into
pub type RecognitionSink = mpsc::UnboundedSender<RecognitionResult>;

/// Port for a speech recognizer producing (text, confidence) results
#[async_trait]
pub trait Recognizer: Send {
    /// Arm the recognizer. Results flow into `sink` until `stop` is called
    /// or the input source ends, at which point the sink is dropped.
    async fn start(&mut self, sink: RecognitionSink) -> Result<(), RecognizerError>;

    /// Release the recognizer. Calling it again is a no-op.
    async fn stop(&mut self) -> Result<(), RecognizerError>;
}

/// Blanket implementation for boxed recognizer types
#[async_trait]
impl Recognizer for Box<dyn Recognizer> {
    async fn start(&mut self, sink: RecognitionSink) -> Result<(), RecognizerError> {
        self.as_mut().start(sink).await
    }

    async fn stop(&mut self) -> Result<(), RecognizerError> {
        self.as_mut().stop().await
    }
}
