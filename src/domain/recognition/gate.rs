//! Confidence gate

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidThreshold;

use super::result::{RecognitionKind, RecognitionResult};

/// Override threshold for results the recognizer flagged as low-confidence.
/// Validated to lie in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ConfidenceThreshold(f32);

impl ConfidenceThreshold {
    /// Create a threshold, rejecting values outside [0, 1]
    pub fn new(value: f32) -> Result<Self, InvalidThreshold> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidThreshold { value })
        }
    }

    /// Get the raw threshold value
    pub const fn value(&self) -> f32 {
        self.0
    }
}

impl FromStr for ConfidenceThreshold {
    type Err = InvalidThreshold;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<f32>()
            .map_err(|_| InvalidThreshold { value: f32::NAN })?;
        Self::new(value)
    }
}

impl fmt::Display for ConfidenceThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a phrase was not accepted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RejectReason {
    /// Confidence did not exceed the override threshold
    BelowThreshold { confidence: f32, threshold: f32 },
    /// Low-confidence result while no override threshold is configured
    NoOverride { confidence: f32 },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BelowThreshold {
                confidence,
                threshold,
            } => write!(f, "confidence {} is not above {}", confidence, threshold),
            Self::NoOverride { confidence } => {
                write!(f, "confidence {} and no override threshold", confidence)
            }
        }
    }
}

/// Outcome of gating one recognition result
#[derive(Debug, Clone, PartialEq)]
pub enum AcceptanceDecision {
    Accept(String),
    Reject(RejectReason),
}

impl AcceptanceDecision {
    /// Whether the phrase was accepted
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accept(_))
    }
}

/// Decides whether a recognized phrase is processed.
/// The threshold is fixed for the lifetime of the gate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecognitionGate {
    threshold: Option<ConfidenceThreshold>,
}

impl RecognitionGate {
    /// Create a gate with an optional override threshold
    pub fn new(threshold: Option<ConfidenceThreshold>) -> Self {
        Self { threshold }
    }

    /// The configured override threshold
    pub fn threshold(&self) -> Option<ConfidenceThreshold> {
        self.threshold
    }

    /// Evaluate a result.
    ///
    /// Primary results always pass. Flagged results pass only when an
    /// override threshold is set and the confidence is strictly above it.
    pub fn evaluate(&self, result: &RecognitionResult) -> AcceptanceDecision {
        match (result.kind, self.threshold) {
            (RecognitionKind::Recognized, _) => AcceptanceDecision::Accept(result.text.clone()),
            (RecognitionKind::Rejected, Some(threshold))
                if result.confidence > threshold.value() =>
            {
                AcceptanceDecision::Accept(result.text.clone())
            }
            (RecognitionKind::Rejected, Some(threshold)) => {
                AcceptanceDecision::Reject(RejectReason::BelowThreshold {
                    confidence: result.confidence,
                    threshold: threshold.value(),
                })
            }
            (RecognitionKind::Rejected, None) => {
                AcceptanceDecision::Reject(RejectReason::NoOverride {
                    confidence: result.confidence,
                })
            }
        }
    }
}
