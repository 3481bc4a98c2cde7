//! Minimum/maximum extents of a layout item.

use trellis_ui_graphics::Size;

use crate::axis::Axis;

/// The range of sizes an item accepts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeLimits {
    pub minimum: Size,
    pub maximum: Size,
}

impl SizeLimits {
    pub fn new(minimum: Size, maximum: Size) -> Self {
        Self { minimum, maximum }
    }

    /// Limits admitting exactly one size.
    pub fn fixed(size: Size) -> Self {
        Self::new(size, size)
    }

    /// No lower bound and no upper bound.
    pub fn unbounded() -> Self {
        Self::new(Size::ZERO, Size::UNBOUNDED)
    }

    /// Raises the maximum so it is never below the minimum.
    pub fn normalized(self) -> Self {
        Self::new(self.minimum, self.maximum.max(self.minimum))
    }

    pub fn along(&self, axis: Axis) -> (f32, f32) {
        (axis.main(self.minimum), axis.main(self.maximum))
    }

    pub fn is_fixed_along(&self, axis: Axis) -> bool {
        let (minimum, maximum) = self.along(axis);
        minimum == maximum
    }

    /// Returns true if these limits have a single size that satisfies them.
    pub fn is_fixed(&self) -> bool {
        self.minimum == self.maximum
    }

    /// Constrains `size` to fit within these limits.
    pub fn clamp(&self, size: Size) -> Size {
        let limits = self.normalized();
        Size::new(
            size.width.clamp(limits.minimum.width, limits.maximum.width),
            size.height.clamp(limits.minimum.height, limits.maximum.height),
        )
    }
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self::unbounded()
    }
}
