//! Pure math/data for geometry & units in Trellis
//!
//! This crate contains geometry primitives, color definitions, font
//! descriptors and the unit systems used throughout the Trellis toolkit.

mod color;
mod geometry;
mod typography;
mod unit;

pub use color::*;
pub use geometry::*;
pub use typography::*;
pub use unit::*;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::geometry::{Margins, Point, Rect, Size};
    pub use crate::typography::Font;
    pub use crate::unit::{DeviceMetrics, FixedDeviceMetrics, UnitConvertible, Units, UnitsConverter};
}

#[cfg(test)]
#[path = "tests/geometry_tests.rs"]
mod geometry_tests;

#[cfg(test)]
#[path = "tests/unit_tests.rs"]
mod unit_tests;
