//! Headless surface that records draw calls.
//!
//! Used wherever there is no browser: tests, snapshot thumbnails, and
//! debugging a render pass with `RUST_LOG=trace`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::{BackendType, RenderError, RenderResult, ShapeStyle};

use super::DrawingCapability;

/// One recorded primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Surface cleared.
    Clear {
        /// Fill colour.
        background: String,
    },
    /// Rectangle drawn.
    Rectangle {
        /// Origin x.
        x: f32,
        /// Origin y.
        y: f32,
        /// Signed width.
        width: f32,
        /// Signed height.
        height: f32,
        /// Style used.
        style: ShapeStyle,
    },
    /// Ellipse drawn.
    Ellipse {
        /// Centre x.
        cx: f32,
        /// Centre y.
        cy: f32,
        /// Signed width.
        width: f32,
        /// Signed height.
        height: f32,
        /// Style used.
        style: ShapeStyle,
    },
    /// Segment drawn.
    Line {
        /// Start x.
        x1: f32,
        /// Start y.
        y1: f32,
        /// End x.
        x2: f32,
        /// End y.
        y2: f32,
        /// Style used.
        style: ShapeStyle,
    },
    /// Text line drawn.
    Text {
        /// Content.
        text: String,
        /// Baseline x.
        x: f32,
        /// Baseline y.
        y: f32,
        /// Font used.
        font: String,
    },
}

/// Shared handle to a recorder's command log.
///
/// Stays readable after the backend itself has been moved into a renderer.
pub type CommandLog = Rc<RefCell<Vec<DrawCommand>>>;

/// Surface that appends every primitive to a [`CommandLog`].
///
/// Text is measured as `glyph_width` per character.
pub struct RecordingBackend {
    log: CommandLog,
    glyph_width: f32,
    width: u32,
    height: u32,
}

impl RecordingBackend {
    /// Create a recorder with 10px glyphs.
    #[must_use]
    pub fn new() -> Self {
        Self::with_glyph_width(10.0)
    }

    /// Create a recorder with a custom glyph width.
    #[must_use]
    pub fn with_glyph_width(glyph_width: f32) -> Self {
        Self {
            log: Rc::new(RefCell::new(Vec::new())),
            glyph_width,
            width: 800,
            height: 600,
        }
    }

    /// Handle to the command log.
    #[must_use]
    pub fn log(&self) -> CommandLog {
        Rc::clone(&self.log)
    }

    /// Current surface size.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn push(&self, command: DrawCommand) -> RenderResult<()> {
        tracing::trace!("Record {command:?}");
        self.log
            .try_borrow_mut()
            .map_err(|_| RenderError::Surface("command log is borrowed".to_string()))?
            .push(command);
        Ok(())
    }
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawingCapability for RecordingBackend {
    fn backend_type(&self) -> BackendType {
        BackendType::Recording
    }

    fn clear(&mut self, background: &str) -> RenderResult<()> {
        self.push(DrawCommand::Clear {
            background: background.to_string(),
        })
    }

    fn rectangle(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        style: &ShapeStyle,
    ) -> RenderResult<()> {
        self.push(DrawCommand::Rectangle {
            x,
            y,
            width,
            height,
            style: style.clone(),
        })
    }

    fn ellipse(
        &mut self,
        cx: f32,
        cy: f32,
        width: f32,
        height: f32,
        style: &ShapeStyle,
    ) -> RenderResult<()> {
        self.push(DrawCommand::Ellipse {
            cx,
            cy,
            width,
            height,
            style: style.clone(),
        })
    }

    fn line(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        style: &ShapeStyle,
    ) -> RenderResult<()> {
        self.push(DrawCommand::Line {
            x1,
            y1,
            x2,
            y2,
            style: style.clone(),
        })
    }

    fn text(&mut self, text: &str, x: f32, y: f32, font: &str) -> RenderResult<()> {
        self.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            font: font.to_string(),
        })
    }

    #[allow(clippy::cast_precision_loss)]
    fn measure_text(&mut self, text: &str, _font: &str) -> RenderResult<f32> {
        Ok(text.chars().count() as f32 * self.glyph_width)
    }

    fn resize(&mut self, width: u32, height: u32) -> RenderResult<()> {
        self.width = width;
        self.height = height;
        tracing::debug!("Recording surface resized to {width}x{height}");
        Ok(())
    }
}
