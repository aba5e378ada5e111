//! Renderer error types.

use sketchpad_core::SketchError;
use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur during rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A render pass ran before any drawing surface was attached.
    #[error("No drawing surface attached")]
    SurfaceNotAttached,

    /// The drawing surface rejected an operation.
    #[error("Surface error: {0}")]
    Surface(String),

    /// Renderer configuration could not be parsed.
    #[error("Invalid renderer config: {0}")]
    Config(#[from] serde_json::Error),

    /// Error from the editor core.
    #[error(transparent)]
    Core(#[from] SketchError),
}
