//! Seeded stroke jitter for the hand-drawn look.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::ShapeStyle;

/// Roughness used when a style leaves it unset.
pub(crate) const DEFAULT_ROUGHNESS: f64 = 1.0;

/// Offsets for one shape's strokes.
///
/// Seeded from the style, so the same shape jitters identically on every
/// redraw.
pub(crate) struct Jitter {
    rng: StdRng,
    amplitude: f64,
}

impl Jitter {
    pub(crate) fn new(style: &ShapeStyle) -> Self {
        Self {
            rng: StdRng::seed_from_u64(u64::from(style.seed)),
            amplitude: style.roughness.map_or(DEFAULT_ROUGHNESS, f64::from).abs(),
        }
    }

    /// Offset in `[-amplitude, amplitude]`.
    pub(crate) fn offset(&mut self) -> f64 {
        self.rng.random_range(-self.amplitude..=self.amplitude)
    }
}
