//! Widgets, linear layouts and the negotiation that turns a widget tree into
//! pixel geometry.
//!
//! A [`Widget`] owns an optional [`Layout`]; a layout arranges widgets,
//! nested layouts and [`Spacer`]s along one axis. Geometry is stored in
//! device pixels and exposed in each object's [`Units`]. Layout passes run
//! synchronously or, when the widget's [`UiContext`] carries a runtime,
//! coalesced onto a timer.

mod context;
pub mod debug;
mod error;
pub mod layout;
mod renderer;
mod style;
mod surface;
mod widget;

pub use context::{UiContext, DEFAULT_LAYOUT_DELAY_MS};
pub use error::{ErrorKind, LayoutError};
pub use layout::{
    Handle, HasGeometry, HasPolicy, Item, ItemHandle, ItemKind, Layout, Ownership, Spacer,
    WeakLayout, WeakSpacer,
};
pub use renderer::{GraphicsContext, HeadlessRenderer, RecordedRenderScene, RenderOp};
pub use style::Style;
pub use surface::{HeadlessSurface, Surface};
pub use widget::{WeakWidget, Widget, WidgetBehavior, WidgetId};

pub use trellis_ui_graphics::{
    Color, DeviceMetrics, FixedDeviceMetrics, Font, Margins, Point, Rect, Size, Units,
};
pub use trellis_ui_layout::{Axis, ExpansionPolicy, SizeLimits, SizePolicies, SizePolicy};

pub mod prelude {
    pub use crate::layout::{HasGeometry, HasPolicy};
    pub use crate::{
        Axis, Color, ExpansionPolicy, Layout, LayoutError, Margins, Point, Rect, Size,
        SizePolicies, SizePolicy, Spacer, Style, UiContext, Units, Widget,
    };
}
