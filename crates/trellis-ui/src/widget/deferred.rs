//! Managing widgets and deferred layout passes.

use trellis_core::CallbackTimer;

use super::Widget;
use crate::error::LayoutError;

impl Widget {
    pub fn is_managing_layout(&self) -> bool {
        self.inner.state.borrow().managing_layout
    }

    /// Marks this widget as responsible for laying out its subtree. Roots
    /// always are.
    pub fn set_managing_layout(&self, managing: bool) {
        self.inner.state.borrow_mut().managing_layout = managing || self.is_root();
    }

    pub fn has_managing_layout(&self) -> bool {
        self.managing_layout().is_ok()
    }

    /// The nearest strict ancestor that manages layout.
    pub fn managing_layout(&self) -> Result<Widget, LayoutError> {
        let mut current = self.parent().ok();
        while let Some(ancestor) = current {
            if ancestor.is_managing_layout() {
                return Ok(ancestor);
            }
            current = ancestor.parent().ok();
        }
        Err(LayoutError::NoManagingLayout)
    }

    /// Layout can be deferred only while the context's runtime is alive.
    pub fn can_defer_layout(&self) -> bool {
        self.context().can_defer_layout()
    }

    /// Lays out the items of this widget's layout inside its client rect.
    ///
    /// With `defer` set the pass is coalesced onto a timer: requests made
    /// while one is pending are absorbed by it. When the context cannot defer
    /// and a managing widget exists above this one, the request fails with
    /// [`LayoutError::CannotDeferLayout`]; with no managing widget the pass
    /// runs at once.
    pub fn layout_items(&self, defer: bool) -> Result<(), LayoutError> {
        if !defer {
            self.layout_items_now();
            return Ok(());
        }
        if self.can_defer_layout() {
            self.defer_layout();
            Ok(())
        } else if self.has_managing_layout() {
            Err(LayoutError::CannotDeferLayout)
        } else {
            log::debug!("widget {} cannot defer layout; laying out now", self.id());
            self.layout_items_now();
            Ok(())
        }
    }

    pub fn has_pending_layout(&self) -> bool {
        self.inner
            .state
            .borrow()
            .layout_timer
            .as_ref()
            .map(CallbackTimer::is_pending)
            .unwrap_or(false)
    }

    pub(crate) fn layout_items_now(&self) {
        if let Some(layout) = self.layout_handle() {
            let client = self.device_client_rect(false);
            layout.layout_items_device(client.top_left(), client.extents());
        }
    }

    /// Called once this widget's layout has placed its items.
    pub(crate) fn layout_items_completed(&self) {
        if let Some(behavior) = self.behavior() {
            behavior.layout_completed(self);
        }
        self.update();
    }

    fn defer_layout(&self) {
        if self.has_pending_layout() {
            log::trace!("widget {} already has a deferred layout pending", self.id());
            return;
        }
        let Some(runtime) = self.context().runtime().cloned() else {
            return;
        };
        let widget = self.downgrade();
        let timer = CallbackTimer::start(&runtime, self.context().layout_delay_ms(), move || {
            if let Some(widget) = widget.upgrade() {
                widget.run_deferred_layout();
            }
        });
        if timer.is_some() {
            log::debug!(
                "widget {} deferred layout by {} ms",
                self.id(),
                self.context().layout_delay_ms()
            );
        }
        let previous = std::mem::replace(&mut self.inner.state.borrow_mut().layout_timer, timer);
        drop(previous);
    }

    fn run_deferred_layout(&self) {
        let fired = self.inner.state.borrow_mut().layout_timer.take();
        drop(fired);
        log::debug!("widget {} running deferred layout", self.id());
        self.layout_items_now();
    }

    /// Relayout of this widget and of the widget managing it, after a change
    /// to either's tree or layout. Only happens when layout can be deferred;
    /// otherwise the caller lays out explicitly.
    pub(crate) fn schedule_relayout(&self) {
        if !self.can_defer_layout() {
            return;
        }
        if self.has_layout() {
            self.defer_layout();
        }
        if let Ok(managing) = self.managing_layout() {
            managing.defer_layout();
        }
    }

    /// Asks whichever widget lays this one out to do so again.
    pub(crate) fn request_managing_relayout(&self) -> Result<(), LayoutError> {
        match self.managing_layout() {
            Ok(managing) => managing.layout_items(true),
            Err(_) if self.is_managing_layout() => self.layout_items(true),
            Err(_) => Ok(()),
        }
    }
}
