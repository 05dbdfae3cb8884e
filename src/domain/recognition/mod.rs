//! Recognition domain module

mod gate;
mod result;

pub use gate::{AcceptanceDecision, ConfidenceThreshold, RecognitionGate, RejectReason};
pub use result::{is_quit_utterance, RecognitionKind, RecognitionResult, QUIT_UTTERANCE};
