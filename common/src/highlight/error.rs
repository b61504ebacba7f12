//! Error types for the highlight engine.
//!
//! None of these are fatal: callers either ignore them (resolution),
//! degrade to in-memory state (storage), or reject a single record.

use thiserror::Error;

/// A selection that could not be mapped onto the canonical answer text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionFailure {
    #[error("selection is empty after normalization")]
    EmptySelection,

    #[error("selection lies entirely inside an existing highlight")]
    InsideHighlight,

    #[error("selection \"{selection}\" was not found in the answer text")]
    NotFound { selection: String },
}

/// A highlight record that violates the range invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HighlightError {
    #[error("highlight range {start}..{end} is empty or inverted")]
    EmptyRange { start: usize, end: usize },

    #[error("highlight range {start}..{end} exceeds answer length {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error(transparent)]
    Resolution(#[from] ResolutionFailure),
}

/// The key-value backing of the highlight store could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("failed to serialize highlight collection: {0}")]
    Serialize(String),
}
