//! Bounding box accumulation.
//!
//! The box starts empty (`+inf..-inf`) and grows as primitives are folded in.
//! Non-finite coordinates are skipped, so a document whose primitives carry no
//! usable numbers never produces a box and keeps its original viewBox.

use serde::Serialize;

/// Axis-aligned bounding box over primitive coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl BoundingBox {
    /// The identity of the fold: contains nothing.
    pub const EMPTY: Self = Self {
        min_x: f64::INFINITY,
        min_y: f64::INFINITY,
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };

    #[cfg(test)]
    pub fn from_corners(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Grow horizontally to include `x` (ignored if not finite).
    #[inline]
    pub fn include_x(&mut self, x: f64) {
        if x.is_finite() {
            self.min_x = self.min_x.min(x);
            self.max_x = self.max_x.max(x);
        }
    }

    /// Grow vertically to include `y` (ignored if not finite).
    #[inline]
    pub fn include_y(&mut self, y: f64) {
        if y.is_finite() {
            self.min_y = self.min_y.min(y);
            self.max_y = self.max_y.max(y);
        }
    }

    #[inline]
    pub fn include_point(&mut self, x: f64, y: f64) {
        self.include_x(x);
        self.include_y(y);
    }

    /// Expand by `padding` on all four sides.
    ///
    /// An empty box stays empty: infinities absorb the padding.
    pub fn padded(self, padding: f64) -> Self {
        Self {
            min_x: self.min_x - padding,
            min_y: self.min_y - padding,
            max_x: self.max_x + padding,
            max_y: self.max_y + padding,
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Finite origin and finite, non-negative extents.
    pub fn is_well_formed(&self) -> bool {
        let (w, h) = (self.width(), self.height());
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && w.is_finite()
            && h.is_finite()
            && w >= 0.0
            && h >= 0.0
    }

    /// `Some(self)` when well-formed.
    pub fn checked(self) -> Option<Self> {
        self.is_well_formed().then_some(self)
    }

    /// Format as a `viewBox` attribute value: `min-x min-y width height`.
    pub fn to_view_box(&self) -> String {
        format!(
            "{} {} {} {}",
            self.min_x,
            self.min_y,
            self.width(),
            self.height()
        )
    }
}
