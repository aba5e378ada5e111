//! Renderer configuration.
//!
//! Every field has a default matching the stock sketchpad look, so a config
//! document only needs the keys it wants to change:
//!
//! ```json
//! { "font": "20px serif", "styles": { "rectangle": { "fill": "blue" } } }
//! ```

use serde::{Deserialize, Serialize};

use crate::RenderResult;

/// Stroke and fill options for one kind of drawn shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// How far strokes wander from the true outline; `None` uses the
    /// surface's default.
    #[serde(default)]
    pub roughness: Option<f32>,
    /// Fill colour; `None` draws the outline only.
    #[serde(default)]
    pub fill: Option<String>,
    /// Seed for the stroke jitter, so redraws look identical.
    #[serde(default = "ShapeStyle::default_seed")]
    pub seed: u32,
}

impl ShapeStyle {
    const fn default_seed() -> u32 {
        1
    }

    /// Outline-only style with the default roughness.
    #[must_use]
    pub fn outline() -> Self {
        Self {
            roughness: None,
            fill: None,
            seed: Self::default_seed(),
        }
    }

    /// Rough style with an optional fill.
    #[must_use]
    pub fn rough(roughness: f32, fill: Option<&str>) -> Self {
        Self {
            roughness: Some(roughness),
            fill: fill.map(str::to_string),
            seed: Self::default_seed(),
        }
    }
}

/// Per-kind drawing styles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeStyles {
    /// Rectangles.
    pub rectangle: ShapeStyle,
    /// Ellipses.
    pub ellipse: ShapeStyle,
    /// Line segments.
    pub line: ShapeStyle,
    /// The in-progress selection box.
    pub selection: ShapeStyle,
    /// Outlines around selected elements.
    pub highlight: ShapeStyle,
}

impl Default for ShapeStyles {
    fn default() -> Self {
        Self {
            rectangle: ShapeStyle::rough(2.0, Some("red")),
            ellipse: ShapeStyle::rough(2.0, Some("green")),
            line: ShapeStyle::rough(2.0, None),
            selection: ShapeStyle::outline(),
            highlight: ShapeStyle::outline(),
        }
    }
}

/// Margins of the highlight drawn around a selected text element.
///
/// The outline spans `(x - left, y - top)` with size
/// `(width + extra_width, height + extra_height)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextHalo {
    /// Shift to the left of the text origin.
    pub left: f32,
    /// Shift above the text origin (text is drawn from its baseline).
    pub top: f32,
    /// Added to the element width.
    pub extra_width: f32,
    /// Added to the element height.
    pub extra_height: f32,
}

impl Default for TextHalo {
    fn default() -> Self {
        Self {
            left: 10.0,
            top: 20.0,
            extra_width: 20.0,
            extra_height: 20.0,
        }
    }
}

/// Configuration for the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Colour the surface is cleared to.
    pub background_color: String,
    /// CSS font used for text elements.
    pub font: String,
    /// Line height as a multiple of the reference glyph width.
    pub line_height_factor: f32,
    /// Glyph measured to derive the line height.
    pub reference_glyph: String,
    /// Padding around highlighted shapes and lines.
    pub highlight_padding: f32,
    /// Highlight margins for text.
    pub text_halo: TextHalo,
    /// Per-kind styles.
    pub styles: ShapeStyles,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            font: "16px serif".to_string(),
            line_height_factor: 1.2,
            reference_glyph: "M".to_string(),
            highlight_padding: 10.0,
            text_halo: TextHalo::default(),
            styles: ShapeStyles::default(),
        }
    }
}

impl RendererConfig {
    /// Parse a config document; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RenderError::Config`] if the JSON is malformed.
    pub fn from_json(json: &str) -> RenderResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
