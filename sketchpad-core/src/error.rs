//! Error types for sketchpad operations.

use thiserror::Error;

/// Result type for sketchpad operations.
pub type SketchResult<T> = Result<T, SketchError>;

/// Errors that can occur in sketchpad operations.
///
/// Stale element references are not errors: lookups and mutations of ids
/// that are no longer present are silent no-ops.
#[derive(Debug, Error)]
pub enum SketchError {
    /// A tool name outside the supported set.
    #[error("Unknown shape tool: {0}")]
    UnknownTool(String),

    /// Snapshot serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A snapshot that parsed but cannot be loaded.
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}
