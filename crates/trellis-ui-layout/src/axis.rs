//! Axis definitions for linear layouts.

use trellis_ui_graphics::{Margins, Point, Size};

/// Identifies the primary direction along which a layout places its items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal main axis.
    Horizontal,
    /// Vertical main axis.
    Vertical,
}

impl Axis {
    /// Returns true if this axis is horizontal.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Axis::Horizontal)
    }

    /// Returns true if this axis is vertical.
    pub fn is_vertical(self) -> bool {
        matches!(self, Axis::Vertical)
    }

    pub fn cross_axis(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Extent of `size` along this axis.
    pub fn main(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    /// Extent of `size` across this axis.
    pub fn cross(self, size: Size) -> f32 {
        self.cross_axis().main(size)
    }

    pub fn main_position(self, point: Point) -> f32 {
        match self {
            Axis::Horizontal => point.x,
            Axis::Vertical => point.y,
        }
    }

    pub fn cross_position(self, point: Point) -> f32 {
        self.cross_axis().main_position(point)
    }

    pub fn pack_size(self, main: f32, cross: f32) -> Size {
        match self {
            Axis::Horizontal => Size::new(main, cross),
            Axis::Vertical => Size::new(cross, main),
        }
    }

    pub fn pack_point(self, main: f32, cross: f32) -> Point {
        match self {
            Axis::Horizontal => Point::new(main, cross),
            Axis::Vertical => Point::new(cross, main),
        }
    }

    /// Margin before the content along this axis.
    pub fn leading_margin(self, margins: &Margins) -> f32 {
        match self {
            Axis::Horizontal => margins.left,
            Axis::Vertical => margins.top,
        }
    }

    /// Both margins along this axis.
    pub fn margin_sum(self, margins: &Margins) -> f32 {
        match self {
            Axis::Horizontal => margins.horizontal_sum(),
            Axis::Vertical => margins.vertical_sum(),
        }
    }
}
