//! The window a widget tree is displayed on.

use std::cell::{Cell, RefCell};

use hashbrown::HashSet;
use trellis_ui_graphics::{DeviceMetrics, FixedDeviceMetrics, Rect};

use crate::widget::WidgetId;

/// Native window services consumed by widgets.
///
/// Widgets on a surface resolve device metrics through it, report the
/// window-coordinate regions they need repainted and query pointer and
/// keyboard state. All methods take `&self`; implementations keep their
/// state behind interior mutability because the surface is shared by every
/// widget of its tree.
pub trait Surface {
    fn device_metrics(&self) -> &dyn DeviceMetrics;

    /// Requests a repaint of `rect`, given in window coordinates.
    fn invalidate_surface(&self, rect: Rect);

    fn widget_added(&self, widget: WidgetId);

    fn widget_removed(&self, widget: WidgetId);

    /// A destroyed surface ignores repaint requests.
    fn destroyed(&self) -> bool;

    /// Whether the surface keeps its contents between frames, so only
    /// invalidated regions need painting.
    fn using_frame_buffer(&self) -> bool;

    fn entered_widget(&self) -> Option<WidgetId>;

    fn capturing_widget(&self) -> Option<WidgetId>;

    fn set_capture(&self, widget: WidgetId);

    fn release_capture(&self, widget: WidgetId);

    fn focused_widget(&self) -> Option<WidgetId>;

    fn set_focus(&self, widget: WidgetId);

    fn release_focus(&self, widget: WidgetId);
}

/// A surface with no window behind it that records what was asked of it.
#[derive(Debug)]
pub struct HeadlessSurface {
    metrics: FixedDeviceMetrics,
    frame_buffer: bool,
    destroyed: Cell<bool>,
    invalidated: RefCell<Vec<Rect>>,
    widgets: RefCell<HashSet<WidgetId>>,
    entered: Cell<Option<WidgetId>>,
    capturing: Cell<Option<WidgetId>>,
    focused: Cell<Option<WidgetId>>,
}

impl HeadlessSurface {
    pub fn new(metrics: FixedDeviceMetrics) -> Self {
        Self {
            metrics,
            frame_buffer: true,
            destroyed: Cell::new(false),
            invalidated: RefCell::new(Vec::new()),
            widgets: RefCell::new(HashSet::new()),
            entered: Cell::new(None),
            capturing: Cell::new(None),
            focused: Cell::new(None),
        }
    }

    /// A surface that repaints everything every frame.
    pub fn without_frame_buffer(mut self) -> Self {
        self.frame_buffer = false;
        self
    }

    pub fn destroy(&self) {
        self.destroyed.set(true);
    }

    pub fn set_entered_widget(&self, widget: Option<WidgetId>) {
        self.entered.set(widget);
    }

    /// Regions invalidated since the last call, in request order.
    pub fn take_invalidated(&self) -> Vec<Rect> {
        std::mem::take(&mut *self.invalidated.borrow_mut())
    }

    pub fn invalidated(&self) -> Vec<Rect> {
        self.invalidated.borrow().clone()
    }

    pub fn is_registered(&self, widget: WidgetId) -> bool {
        self.widgets.borrow().contains(&widget)
    }

    pub fn registered_count(&self) -> usize {
        self.widgets.borrow().len()
    }
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new(FixedDeviceMetrics::default())
    }
}

impl Surface for HeadlessSurface {
    fn device_metrics(&self) -> &dyn DeviceMetrics {
        &self.metrics
    }

    fn invalidate_surface(&self, rect: Rect) {
        if !self.destroyed.get() {
            self.invalidated.borrow_mut().push(rect);
        }
    }

    fn widget_added(&self, widget: WidgetId) {
        self.widgets.borrow_mut().insert(widget);
    }

    fn widget_removed(&self, widget: WidgetId) {
        self.widgets.borrow_mut().remove(&widget);
        for slot in [&self.entered, &self.capturing, &self.focused] {
            if slot.get() == Some(widget) {
                slot.set(None);
            }
        }
    }

    fn destroyed(&self) -> bool {
        self.destroyed.get()
    }

    fn using_frame_buffer(&self) -> bool {
        self.frame_buffer
    }

    fn entered_widget(&self) -> Option<WidgetId> {
        self.entered.get()
    }

    fn capturing_widget(&self) -> Option<WidgetId> {
        self.capturing.get()
    }

    fn set_capture(&self, widget: WidgetId) {
        self.capturing.set(Some(widget));
    }

    fn release_capture(&self, widget: WidgetId) {
        if self.capturing.get() == Some(widget) {
            self.capturing.set(None);
        }
    }

    fn focused_widget(&self) -> Option<WidgetId> {
        self.focused.get()
    }

    fn set_focus(&self, widget: WidgetId) {
        self.focused.set(Some(widget));
    }

    fn release_focus(&self, widget: WidgetId) {
        if self.focused.get() == Some(widget) {
            self.focused.set(None);
        }
    }
}
