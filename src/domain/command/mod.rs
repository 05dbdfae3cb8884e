//! Console command domain module

mod encoder;

pub use encoder::{Command, CommandEncoder, EncodeError, PayloadFormat};
