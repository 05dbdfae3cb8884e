//! Alias file adapters

mod file;

pub use file::{AliasFileLoader, AliasLoadError};
