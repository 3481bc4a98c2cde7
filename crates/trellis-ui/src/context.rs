use std::fmt;
use std::rc::Rc;

use trellis_core::RuntimeHandle;
use trellis_ui_graphics::{DeviceMetrics, FixedDeviceMetrics};

use crate::style::Style;

/// Delay before a deferred layout pass runs.
pub const DEFAULT_LAYOUT_DELAY_MS: u64 = 40;

/// Services a widget reads from its surroundings.
///
/// Every widget carries a context; widgets created under a parent share the
/// parent's. The metrics here are only used while a widget is not attached
/// to a surface.
#[derive(Clone)]
pub struct UiContext {
    style: Rc<Style>,
    metrics: Rc<dyn DeviceMetrics>,
    runtime: Option<RuntimeHandle>,
    layout_delay_ms: u64,
}

impl UiContext {
    pub fn new(style: Style) -> Self {
        Self {
            style: Rc::new(style),
            metrics: Rc::new(FixedDeviceMetrics::default()),
            runtime: None,
            layout_delay_ms: DEFAULT_LAYOUT_DELAY_MS,
        }
    }

    pub fn with_metrics(mut self, metrics: Rc<dyn DeviceMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_runtime(mut self, runtime: RuntimeHandle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    pub fn with_layout_delay(mut self, delay_ms: u64) -> Self {
        self.layout_delay_ms = delay_ms;
        self
    }

    pub fn style(&self) -> &Rc<Style> {
        &self.style
    }

    pub fn metrics(&self) -> &dyn DeviceMetrics {
        self.metrics.as_ref()
    }

    pub fn runtime(&self) -> Option<&RuntimeHandle> {
        self.runtime.as_ref()
    }

    pub fn layout_delay_ms(&self) -> u64 {
        self.layout_delay_ms
    }

    /// Layout can be deferred only while an event loop is there to run it.
    pub fn can_defer_layout(&self) -> bool {
        self.runtime
            .as_ref()
            .map(RuntimeHandle::is_alive)
            .unwrap_or(false)
    }
}

impl Default for UiContext {
    fn default() -> Self {
        Self::new(Style::default())
    }
}

impl fmt::Debug for UiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiContext")
            .field("style", &self.style)
            .field("can_defer_layout", &self.can_defer_layout())
            .field("layout_delay_ms", &self.layout_delay_ms)
            .finish()
    }
}
