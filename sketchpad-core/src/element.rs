//! Drawable elements - the building blocks of a page canvas.
//!
//! Every element shares an identifier, a position, a signed size and a
//! selection flag. The [`Shape`] variant carries whatever is specific to the
//! kind of element. Width and height stay signed while a shape is being
//! dragged out; use [`crate::geometry`] before comparing extents.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::SketchError;

/// Unique identifier for an element.
///
/// Identifiers are opaque strings so snapshots written by other clients
/// (which may use shorter ids) load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Create a new unique element ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Wrap an existing identifier string.
    #[must_use]
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A point in canvas coordinates.
///
/// Serialized as a two-element `[x, y]` array.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f32; 2]", into = "[f32; 2]")]
pub struct Point {
    /// X position (pixels from left).
    pub x: f32,
    /// Y position (pixels from top).
    pub y: f32,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<[f32; 2]> for Point {
    fn from([x, y]: [f32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f32; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// The tools a user can pick from the shape toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeTool {
    /// Draw rectangles.
    Rectangle,
    /// Draw ellipses.
    Ellipse,
    /// Drag a selection box; double-click to place text.
    #[default]
    Selection,
    /// Draw straight line segments.
    Linear,
    /// Place a text box.
    Text,
}

impl ShapeTool {
    /// Every tool, in toolbar order.
    pub const ALL: [ShapeTool; 5] = [
        ShapeTool::Rectangle,
        ShapeTool::Ellipse,
        ShapeTool::Selection,
        ShapeTool::Linear,
        ShapeTool::Text,
    ];

    /// Wire name of the tool.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ShapeTool::Rectangle => "rectangle",
            ShapeTool::Ellipse => "ellipse",
            ShapeTool::Selection => "selection",
            ShapeTool::Linear => "linear",
            ShapeTool::Text => "text",
        }
    }

    /// The generic shape this tool drags out, if it is a generic tool.
    #[must_use]
    pub const fn generic_kind(self) -> Option<GenericKind> {
        match self {
            ShapeTool::Rectangle => Some(GenericKind::Rectangle),
            ShapeTool::Ellipse => Some(GenericKind::Ellipse),
            ShapeTool::Selection => Some(GenericKind::Selection),
            ShapeTool::Linear | ShapeTool::Text => None,
        }
    }
}

impl fmt::Display for ShapeTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeTool {
    type Err = SketchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeTool::ALL
            .into_iter()
            .find(|tool| tool.as_str() == s)
            .ok_or_else(|| SketchError::UnknownTool(s.to_string()))
    }
}

/// Shapes described purely by position and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenericKind {
    /// Filled rectangle.
    Rectangle,
    /// Filled ellipse inscribed in the box.
    Ellipse,
    /// Transient selection box.
    Selection,
}

impl From<GenericKind> for Shape {
    fn from(kind: GenericKind) -> Self {
        match kind {
            GenericKind::Rectangle => Shape::Rectangle,
            GenericKind::Ellipse => Shape::Ellipse,
            GenericKind::Selection => Shape::Selection,
        }
    }
}

/// Kind-specific payload of an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape_type", rename_all = "lowercase")]
pub enum Shape {
    /// A rectangle spanning the element box.
    Rectangle,
    /// An ellipse inscribed in the element box.
    Ellipse,
    /// The in-progress selection box. Never persisted.
    Selection,
    /// A straight segment.
    Linear {
        /// Start and end of the segment.
        points: [Point; 2],
    },
    /// A block of text, possibly spanning several lines.
    Text {
        /// Text content; lines are separated by `\n`.
        text: String,
    },
}

impl Shape {
    /// The tool that creates this kind of shape.
    #[must_use]
    pub const fn tool(&self) -> ShapeTool {
        match self {
            Shape::Rectangle => ShapeTool::Rectangle,
            Shape::Ellipse => ShapeTool::Ellipse,
            Shape::Selection => ShapeTool::Selection,
            Shape::Linear { .. } => ShapeTool::Linear,
            Shape::Text { .. } => ShapeTool::Text,
        }
    }

    /// Whether this shape belongs to the position + size family.
    #[must_use]
    pub const fn is_generic(&self) -> bool {
        matches!(self, Shape::Rectangle | Shape::Ellipse | Shape::Selection)
    }
}

/// A drawable element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier.
    pub id: ElementId,
    /// X position of the origin corner.
    pub x: f32,
    /// Y position of the origin corner.
    pub y: f32,
    /// Signed width; negative when dragged leftwards.
    pub width: f32,
    /// Signed height; negative when dragged upwards.
    pub height: f32,
    /// Whether this element is selected.
    pub selected: bool,
    /// Kind-specific data.
    #[serde(flatten)]
    pub shape: Shape,
}

impl Element {
    fn base(shape: Shape, x: f32, y: f32) -> Self {
        Self {
            id: ElementId::new(),
            x,
            y,
            width: 0.0,
            height: 0.0,
            selected: false,
            shape,
        }
    }

    /// Create a zero-size rectangle, ellipse or selection box at `(x, y)`.
    #[must_use]
    pub fn generic(kind: GenericKind, x: f32, y: f32) -> Self {
        Self::base(kind.into(), x, y)
    }

    /// Create a line segment anchored at `(x, y)`.
    #[must_use]
    pub fn linear(x: f32, y: f32, points: [Point; 2]) -> Self {
        Self::base(Shape::Linear { points }, x, y)
    }

    /// Create a degenerate line where both endpoints sit at `(x, y)`.
    #[must_use]
    pub fn dot(x: f32, y: f32) -> Self {
        let p = Point::new(x, y);
        Self::linear(x, y, [p, p])
    }

    /// Create a text element.
    #[must_use]
    pub fn text(x: f32, y: f32, text: impl Into<String>) -> Self {
        Self::base(Shape::Text { text: text.into() }, x, y)
    }

    /// Override the generated identifier.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = id.into();
        self
    }

    /// Override the initial size.
    #[must_use]
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Override the initial selection flag.
    #[must_use]
    pub fn with_selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    /// Whether this is a transient selection box.
    #[must_use]
    pub fn is_selection(&self) -> bool {
        matches!(self.shape, Shape::Selection)
    }

    /// Text content, for text elements.
    #[must_use]
    pub fn text_content(&self) -> Option<&str> {
        match &self.shape {
            Shape::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Line endpoints, for linear elements.
    #[must_use]
    pub fn points(&self) -> Option<&[Point; 2]> {
        match &self.shape {
            Shape::Linear { points } => Some(points),
            _ => None,
        }
    }
}

/// A partial set of fields merged into an existing element.
///
/// Fields that do not apply to the target's shape (points on a rectangle,
/// text on a line) are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    /// New x position.
    pub x: Option<f32>,
    /// New y position.
    pub y: Option<f32>,
    /// New width.
    pub width: Option<f32>,
    /// New height.
    pub height: Option<f32>,
    /// New selection flag.
    pub selected: Option<bool>,
    /// New line endpoints.
    pub points: Option<[Point; 2]>,
    /// New text content.
    pub text: Option<String>,
}

impl ElementPatch {
    /// Patch that only sets the size.
    #[must_use]
    pub fn size(width: f32, height: f32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// Patch that only sets the selection flag.
    #[must_use]
    pub fn selected(selected: bool) -> Self {
        Self {
            selected: Some(selected),
            ..Self::default()
        }
    }

    /// Patch that only sets the line endpoints.
    #[must_use]
    pub fn points(points: [Point; 2]) -> Self {
        Self {
            points: Some(points),
            ..Self::default()
        }
    }

    /// Merge the patch into `element`.
    pub fn apply(self, element: &mut Element) {
        if let Some(x) = self.x {
            element.x = x;
        }
        if let Some(y) = self.y {
            element.y = y;
        }
        if let Some(width) = self.width {
            element.width = width;
        }
        if let Some(height) = self.height {
            element.height = height;
        }
        if let Some(selected) = self.selected {
            element.selected = selected;
        }
        match (&mut element.shape, self.points, self.text) {
            (Shape::Linear { points }, Some(new_points), _) => *points = new_points,
            (Shape::Text { text }, _, Some(new_text)) => *text = new_text,
            (_, None, None) => {}
            (shape, _, _) => {
                tracing::trace!("Ignoring patch fields not applicable to {}", shape.tool());
            }
        }
    }
}
