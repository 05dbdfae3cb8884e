//! Recognizer adapters
//!
//! Console mode reads typed lines; live mode drives an external engine
//! process.

mod emulated;
mod factory;
mod input;
mod process;

pub use emulated::EmulatedRecognizer;
pub use factory::{create_recognizer, RecognizerMode};
pub use input::LineInput;
pub use process::{ProcessRecognizer, ProcessRecognizerSettings};
