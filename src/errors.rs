//! Error types for ragbuddy
//!
//! Initialization failures are terminal for a `RagSystem` until the next
//! `initialize` call; per-file parse failures are recovered by the loader.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the retrieval engine
#[derive(Error, Debug)]
pub enum RagError {
    /// Corpus path unset, missing or not a directory
    #[error("Configuration error: {0}")]
    Config(String),

    /// Scanning finished without a single usable entry
    #[error("No valid corpus entries were loaded from '{}'", path.display())]
    NoData { path: PathBuf },

    /// A corpus file was rejected as a whole
    #[error("Failed to parse '{}': {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl RagError {
    /// Build a parse error for a corpus file
    pub fn parse(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        RagError::Parse {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, RagError>;
