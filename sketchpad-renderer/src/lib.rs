//! # Sketchpad Renderer
//!
//! Draws a page's elements onto an attached surface.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Sketchpad (editor + renderer controller)   │
//! ├─────────────────────────────────────────────┤
//! │  Renderer  │  render pass  │ RendererConfig │
//! ├─────────────────────────────────────────────┤
//! │           DrawingCapability trait           │
//! ├──────────────────────┬──────────────────────┤
//! │ Canvas2DBackend      │ RecordingBackend     │
//! └──────────────────────┴──────────────────────┘
//! ```
//!
//! Build the browser binding with the `wasm` feature:
//! ```bash
//! wasm-pack build --target web sketchpad-renderer -- --features wasm
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod config;
pub mod error;
pub mod render;
pub mod sketchpad;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use backend::recording::{CommandLog, DrawCommand, RecordingBackend};
pub use backend::{BackendType, DrawingCapability};
pub use config::{RendererConfig, ShapeStyle, ShapeStyles, TextHalo};
pub use error::{RenderError, RenderResult};
pub use render::{highlight_bounds, render_elements};
pub use sketchpad::Sketchpad;

use sketchpad_core::ElementStore;

/// Renders an element store onto an optional attached surface.
///
/// Attaching, re-attaching, and detaching never touch the elements.
pub struct Renderer {
    config: RendererConfig,
    surface: Option<Box<dyn DrawingCapability>>,
    frame_count: u64,
}

impl Renderer {
    /// Create a renderer with no surface attached.
    #[must_use]
    pub fn new(config: RendererConfig) -> Self {
        Self {
            config,
            surface: None,
            frame_count: 0,
        }
    }

    /// Create a renderer already attached to `surface`.
    #[must_use]
    pub fn with_surface(surface: Box<dyn DrawingCapability>, config: RendererConfig) -> Self {
        let mut renderer = Self::new(config);
        renderer.surface = Some(surface);
        renderer
    }

    /// Attach a surface, returning the one it replaces.
    pub fn attach(
        &mut self,
        surface: Box<dyn DrawingCapability>,
    ) -> Option<Box<dyn DrawingCapability>> {
        tracing::debug!("Attached {:?} surface", surface.backend_type());
        self.surface.replace(surface)
    }

    /// Detach the current surface.
    pub fn detach(&mut self) -> Option<Box<dyn DrawingCapability>> {
        let surface = self.surface.take();
        if surface.is_some() {
            tracing::debug!("Detached surface");
        }
        surface
    }

    /// Whether a surface is attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    /// Render a frame.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::SurfaceNotAttached`] if no surface is attached,
    /// or the surface's error if drawing fails.
    pub fn render(&mut self, elements: &ElementStore) -> RenderResult<()> {
        let Some(surface) = self.surface.as_deref_mut() else {
            tracing::error!("Render requested with no surface attached");
            return Err(RenderError::SurfaceNotAttached);
        };
        let drawn = render_elements(surface, &self.config, elements.all())?;
        self.frame_count += 1;
        tracing::trace!("Frame {}: {} elements", self.frame_count, drawn);
        Ok(())
    }

    /// Get the current frame count.
    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the attached backend type.
    #[must_use]
    pub fn active_backend(&self) -> Option<BackendType> {
        self.surface.as_ref().map(|s| s.backend_type())
    }

    /// Get the renderer configuration.
    #[must_use]
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Replace the renderer configuration. Takes effect on the next frame.
    pub fn set_config(&mut self, config: RendererConfig) {
        self.config = config;
    }

    /// Resize the attached surface.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::SurfaceNotAttached`] if no surface is attached,
    /// or the surface's error if resizing fails.
    pub fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        self.surface
            .as_deref_mut()
            .ok_or(RenderError::SurfaceNotAttached)?
            .resize(width, height)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RendererConfig::default())
    }
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("config", &self.config)
            .field("surface", &self.active_backend())
            .field("frame_count", &self.frame_count)
            .finish()
    }
}
