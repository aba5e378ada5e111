//! Bounding-box normalization.
//!
//! Coordinates of a normalized box:
//!
//! ```text
//! (x1, y1) ------ (x2, y1)
//!    |                |
//! (x1, y2) ------ (x2, y2)
//! ```
//!
//! A shape dragged right-to-left or bottom-to-top has a negative width or
//! height. Normalizing turns any such box into the form above so that
//! containment checks can compare edges directly.

use serde::{Deserialize, Serialize};

use crate::{Element, Point, Shape};

/// An axis-aligned box with `x1 <= x2` and `y1 <= y2`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    /// Left edge.
    pub x1: f32,
    /// Top edge.
    pub y1: f32,
    /// Right edge.
    pub x2: f32,
    /// Bottom edge.
    pub y2: f32,
}

impl Bounds {
    /// Width of the box (never negative).
    #[must_use]
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    /// Height of the box (never negative).
    #[must_use]
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Grow the box outwards by `padding` on every side.
    #[must_use]
    pub fn padded(&self, padding: f32) -> Self {
        Self {
            x1: self.x1 - padding,
            y1: self.y1 - padding,
            x2: self.x2 + padding,
            y2: self.y2 + padding,
        }
    }

    /// Whether `inner` lies entirely within this box, edges inclusive.
    #[must_use]
    pub fn contains(&self, inner: &Bounds) -> bool {
        inner.x1 >= self.x1 && inner.x2 <= self.x2 && inner.y1 >= self.y1 && inner.y2 <= self.y2
    }

    /// Whether the point lies within this box, edges inclusive.
    #[must_use]
    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }
}

/// Normalize the box of a position + size element.
///
/// Uses the element's `x`, `y`, `width` and `height` regardless of shape;
/// callers pick [`normalized_line_bounds`] for lines (see [`element_bounds`]).
#[must_use]
pub fn normalized_bounds(element: &Element) -> Bounds {
    normalize_box(element.x, element.y, element.width, element.height)
}

/// Normalize a box given by an origin and a signed size.
#[must_use]
pub fn normalize_box(x: f32, y: f32, width: f32, height: f32) -> Bounds {
    let (x1, x2) = if width >= 0.0 {
        (x, x + width)
    } else {
        (x + width, x)
    };
    let (y1, y2) = if height >= 0.0 {
        (y, y + height)
    } else {
        (y + height, y)
    };
    Bounds { x1, y1, x2, y2 }
}

/// Axis-aligned box around both endpoints of a segment.
#[must_use]
pub fn normalized_line_bounds(points: &[Point; 2]) -> Bounds {
    let [a, b] = points;
    Bounds {
        x1: a.x.min(b.x),
        y1: a.y.min(b.y),
        x2: a.x.max(b.x),
        y2: a.y.max(b.y),
    }
}

/// Normalized bounds of any element, choosing the variant by shape.
#[must_use]
pub fn element_bounds(element: &Element) -> Bounds {
    match &element.shape {
        Shape::Linear { points } => normalized_line_bounds(points),
        Shape::Rectangle | Shape::Ellipse | Shape::Selection | Shape::Text { .. } => {
            normalized_bounds(element)
        }
    }
}
