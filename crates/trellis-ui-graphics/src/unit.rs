//! Unit systems and device-unit conversion.
//!
//! Geometry is stored in device pixels and exposed in whichever [`Units`]
//! the caller has selected. [`UnitsConverter`] reconciles the two using the
//! dots-per-inch and em size reported by a [`DeviceMetrics`] provider.

use crate::geometry::{Margins, Point, Rect, Size};

/// Unit system used when reading or writing geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Units {
    #[default]
    Pixels,
    Points,
    Picas,
    Ems,
    Millimetres,
    Centimetres,
    Inches,
}

/// Read-only view of the metrics of the device geometry is rendered on.
pub trait DeviceMetrics {
    fn horizontal_dpi(&self) -> f32;

    fn vertical_dpi(&self) -> f32;

    /// Size of one em, in device pixels.
    fn em_size(&self) -> f32;
}

/// Metrics captured as plain values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedDeviceMetrics {
    pub horizontal_dpi: f32,
    pub vertical_dpi: f32,
    pub em_size: f32,
}

impl FixedDeviceMetrics {
    pub const fn new(horizontal_dpi: f32, vertical_dpi: f32, em_size: f32) -> Self {
        Self {
            horizontal_dpi,
            vertical_dpi,
            em_size,
        }
    }
}

impl Default for FixedDeviceMetrics {
    fn default() -> Self {
        Self::new(96.0, 96.0, 16.0)
    }
}

impl DeviceMetrics for FixedDeviceMetrics {
    fn horizontal_dpi(&self) -> f32 {
        self.horizontal_dpi
    }

    fn vertical_dpi(&self) -> f32 {
        self.vertical_dpi
    }

    fn em_size(&self) -> f32 {
        self.em_size
    }
}

/// Values whose horizontal and vertical components convert independently.
pub trait UnitConvertible: Sized {
    fn map_axes(self, horizontal: impl Fn(f32) -> f32, vertical: impl Fn(f32) -> f32) -> Self;
}

impl UnitConvertible for Point {
    fn map_axes(self, horizontal: impl Fn(f32) -> f32, vertical: impl Fn(f32) -> f32) -> Self {
        Point::new(horizontal(self.x), vertical(self.y))
    }
}

impl UnitConvertible for Size {
    fn map_axes(self, horizontal: impl Fn(f32) -> f32, vertical: impl Fn(f32) -> f32) -> Self {
        Size::new(horizontal(self.width), vertical(self.height))
    }
}

impl UnitConvertible for Rect {
    fn map_axes(self, horizontal: impl Fn(f32) -> f32, vertical: impl Fn(f32) -> f32) -> Self {
        Rect::new(
            horizontal(self.x),
            vertical(self.y),
            horizontal(self.width),
            vertical(self.height),
        )
    }
}

impl UnitConvertible for Margins {
    fn map_axes(self, horizontal: impl Fn(f32) -> f32, vertical: impl Fn(f32) -> f32) -> Self {
        Margins::new(
            horizontal(self.left),
            vertical(self.top),
            horizontal(self.right),
            vertical(self.bottom),
        )
    }
}

/// Converts between device pixels and a unit system.
pub struct UnitsConverter<'a> {
    metrics: &'a dyn DeviceMetrics,
    units: Units,
}

impl<'a> UnitsConverter<'a> {
    pub fn new(metrics: &'a dyn DeviceMetrics, units: Units) -> Self {
        Self { metrics, units }
    }

    pub fn units(&self) -> Units {
        self.units
    }

    /// Device pixels per unit along the horizontal axis.
    pub fn horizontal_factor(&self) -> f32 {
        sanitize(self.factor(self.metrics.horizontal_dpi()))
    }

    /// Device pixels per unit along the vertical axis.
    pub fn vertical_factor(&self) -> f32 {
        sanitize(self.factor(self.metrics.vertical_dpi()))
    }

    pub fn to_device_units<T: UnitConvertible>(&self, value: T) -> T {
        if self.units == Units::Pixels {
            return value;
        }
        let (horizontal, vertical) = (self.horizontal_factor(), self.vertical_factor());
        value.map_axes(|v| v * horizontal, |v| v * vertical)
    }

    pub fn from_device_units<T: UnitConvertible>(&self, value: T) -> T {
        if self.units == Units::Pixels {
            return value;
        }
        let (horizontal, vertical) = (self.horizontal_factor(), self.vertical_factor());
        value.map_axes(|v| v / horizontal, |v| v / vertical)
    }

    pub fn horizontal_to_device(&self, value: f32) -> f32 {
        value * self.horizontal_factor()
    }

    pub fn vertical_to_device(&self, value: f32) -> f32 {
        value * self.vertical_factor()
    }

    pub fn horizontal_from_device(&self, value: f32) -> f32 {
        value / self.horizontal_factor()
    }

    pub fn vertical_from_device(&self, value: f32) -> f32 {
        value / self.vertical_factor()
    }

    fn factor(&self, dpi: f32) -> f32 {
        match self.units {
            Units::Pixels => 1.0,
            Units::Points => dpi / 72.0,
            Units::Picas => dpi / 6.0,
            Units::Ems => self.metrics.em_size(),
            Units::Millimetres => dpi / 25.4,
            Units::Centimetres => dpi / 2.54,
            Units::Inches => dpi,
        }
    }
}

// A device that reports no resolution would otherwise turn every extent into NaN.
fn sanitize(factor: f32) -> f32 {
    if factor.is_finite() && factor > 0.0 {
        factor
    } else {
        1.0
    }
}
