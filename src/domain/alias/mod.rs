//! Alias domain module

mod normalizer;
mod table;

pub use normalizer::TextNormalizer;
pub use table::{AliasEntry, AliasTable, EVERYONE_TRIGGER, EVERYONE_WILDCARD, ME_TRIGGER};
