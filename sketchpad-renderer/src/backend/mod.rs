//! Drawing surfaces.
//!
//! The render pass only talks to a [`DrawingCapability`]; what sits behind
//! it is up to the host.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │            DrawingCapability                │
//! ├──────────────────────┬──────────────────────┤
//! │ Canvas2DBackend      │ RecordingBackend     │
//! │ (browser, `wasm`)    │ (headless, tests)    │
//! └──────────────────────┴──────────────────────┘
//! ```

#[cfg(feature = "wasm")]
pub mod canvas2d;
#[cfg(any(feature = "wasm", test))]
mod jitter;
pub mod recording;

use crate::{RenderResult, ShapeStyle};

/// Available drawing surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    /// A browser `<canvas>` 2D context.
    Canvas2D,
    /// In-memory command log.
    Recording,
}

/// Primitive drawing operations a surface must provide.
///
/// Coordinates are canvas pixels. Sizes may be negative for shapes dragged
/// leftwards or upwards; surfaces draw them mirrored.
pub trait DrawingCapability {
    /// Get the backend type.
    fn backend_type(&self) -> BackendType;

    /// Erase everything, filling with `background`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface rejects the operation.
    fn clear(&mut self, background: &str) -> RenderResult<()>;

    /// Draw a rectangle with its origin corner at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface rejects the operation.
    fn rectangle(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        style: &ShapeStyle,
    ) -> RenderResult<()>;

    /// Draw an ellipse centred on `(cx, cy)` spanning `width` x `height`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface rejects the operation.
    fn ellipse(
        &mut self,
        cx: f32,
        cy: f32,
        width: f32,
        height: f32,
        style: &ShapeStyle,
    ) -> RenderResult<()>;

    /// Draw a straight segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface rejects the operation.
    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, style: &ShapeStyle)
        -> RenderResult<()>;

    /// Draw a single line of text with its baseline starting at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface rejects the operation.
    fn text(&mut self, text: &str, x: f32, y: f32, font: &str) -> RenderResult<()>;

    /// Width of `text` when drawn in `font`.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot measure text.
    fn measure_text(&mut self, text: &str, font: &str) -> RenderResult<f32>;

    /// Resize the drawing surface.
    ///
    /// # Errors
    ///
    /// Returns an error if resizing fails.
    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()>;
}
