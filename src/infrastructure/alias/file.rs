//! Line-oriented alias file loader

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::domain::alias::AliasTable;
use crate::domain::error::MalformedAliasEntry;

/// Errors from loading an alias file
#[derive(Debug, Error)]
pub enum AliasLoadError {
    #[error("Failed to read alias file {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error(transparent)]
    Malformed(#[from] MalformedAliasEntry),
}

/// Loads `trigger,replacement` lines on top of the built-in aliases.
///
/// An unset path or a missing file leave only the built-ins. A malformed
/// line fails the whole load.
#[derive(Debug, Clone, Default)]
pub struct AliasFileLoader {
    path: Option<PathBuf>,
}

impl AliasFileLoader {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Build the alias table for `operator`
    pub async fn load(&self, operator: &str) -> Result<AliasTable, AliasLoadError> {
        let mut table = AliasTable::with_builtins(operator);

        let Some(path) = self.path.as_deref() else {
            debug!("No alias file configured");
            return Ok(table);
        };

        let content = match fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %path.display(), "Alias file not found, using built-in aliases only");
                return Ok(table);
            }
            Err(e) => {
                return Err(AliasLoadError::Read {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };

        let entries = table.load(content.lines())?;
        for entry in &entries {
            debug!(trigger = %entry.trigger, replacement = %entry.replacement, "Loaded alias");
        }
        info!(path = %path.display(), count = entries.len(), "Loaded alias file");

        Ok(table)
    }
}
