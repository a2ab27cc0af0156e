//! Error types for SearchPad
//!
//! Covers configuration validation and history persistence failures.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for SearchPad operations
#[derive(Error, Debug)]
pub enum SearchPadError {
    #[error("Invalid history capacity {0}: must be at least 1")]
    InvalidCapacity(usize),

    #[error("Invalid container width {0}: must be positive")]
    InvalidContainerWidth(f32),

    #[error("Container width {width} leaves no room inside margins (left {left}, right {right})")]
    ContainerTooNarrow { width: f32, left: f32, right: f32 },

    #[error("Failed to read history from '{path}': {source}")]
    PersistenceRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write history to '{path}': {source}")]
    PersistenceWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("History blob at '{path}' is not a valid string array: {source}")]
    CorruptBlob {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Result type alias for SearchPad operations
pub type Result<T> = std::result::Result<T, SearchPadError>;

impl SearchPadError {
    /// Check if this error is recoverable (the store degrades instead of failing).
    ///
    /// Read-side failures degrade to an empty history; write-side failures
    /// leave the in-memory state authoritative. Configuration errors reject
    /// the call outright.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SearchPadError::PersistenceRead { .. }
                | SearchPadError::PersistenceWrite { .. }
                | SearchPadError::CorruptBlob { .. }
        )
    }
}
