use std::rc::Rc;
use std::sync::Arc;

use trellis_core::{DefaultScheduler, Runtime, RuntimeHandle};
use trellis_ui::{
    Axis, HasGeometry, HeadlessRenderer, HeadlessSurface, Layout, Margins, Point,
    RecordedRenderScene, Rect, Size, Style, UiContext, Widget,
};

/// A runtime whose clock only moves when the test says so.
pub struct TestRuntime {
    runtime: Runtime,
}

impl TestRuntime {
    pub fn new() -> Self {
        Self {
            runtime: Runtime::new(Arc::new(DefaultScheduler)),
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn now(&self) -> u64 {
        self.runtime.now_millis()
    }

    /// Moves the clock forward and fires every timer that came due, then
    /// runs queued tasks. Returns the number of timers fired.
    pub fn advance_by(&self, millis: u64) -> usize {
        self.advance_to(self.now() + millis)
    }

    pub fn advance_to(&self, now_millis: u64) -> usize {
        let fired = self.runtime.advance_to(now_millis);
        self.runtime.drain_tasks();
        fired
    }

    /// Fires timers in deadline order until none remain, including timers
    /// armed by the ones that fired. Returns the number of timers fired.
    ///
    /// Gives up after `limit` rounds so a timer that re-arms itself forever
    /// cannot hang the test.
    pub fn run_until_idle(&self, limit: usize) -> usize {
        let mut fired = 0;
        for _ in 0..limit {
            match self.runtime.next_deadline() {
                Some(deadline) => fired += self.advance_to(deadline.max(self.now())),
                None => break,
            }
        }
        fired
    }

    pub fn has_pending_timers(&self) -> bool {
        self.runtime.has_pending_timers()
    }
}

impl Default for TestRuntime {
    fn default() -> Self {
        Self::new()
    }
}

/// A style without margins or spacing, so expected geometry is plain arithmetic.
pub fn zero_margin_style() -> Style {
    Style::default()
        .with_margins(Margins::ZERO)
        .with_layout_margins(Margins::ZERO)
        .with_layout_spacing(Size::ZERO)
}

/// Context with the zero-margin style and no runtime: layout runs synchronously.
pub fn sync_context() -> UiContext {
    UiContext::new(zero_margin_style())
}

/// Context with the zero-margin style whose deferred layout runs on `runtime`.
pub fn deferred_context(runtime: &TestRuntime) -> UiContext {
    UiContext::new(zero_margin_style()).with_runtime(runtime.handle())
}

/// A root widget on a headless surface.
pub struct TestWindow {
    surface: Rc<HeadlessSurface>,
    root: Widget,
    renderer: HeadlessRenderer,
}

impl TestWindow {
    pub fn new(context: &UiContext, size: Size) -> Self {
        Self::with_surface(context, HeadlessSurface::default(), size)
    }

    pub fn with_surface(context: &UiContext, surface: HeadlessSurface, size: Size) -> Self {
        let surface = Rc::new(surface);
        let root = Widget::new_root(context, surface.clone());
        root.resize(size);
        Self {
            surface,
            root,
            renderer: HeadlessRenderer::new(),
        }
    }

    pub fn root(&self) -> &Widget {
        &self.root
    }

    pub fn surface(&self) -> &HeadlessSurface {
        &self.surface
    }

    /// Renders the tree and forgets the surface's invalidated regions.
    pub fn render(&mut self) -> RecordedRenderScene {
        let scene = self.renderer.render(&self.root);
        self.surface.take_invalidated();
        scene
    }
}

/// Installs a row layout on `widget`.
pub fn row(widget: &Widget) -> Layout {
    Layout::for_widget(widget, Axis::Horizontal)
}

/// Installs a column layout on `widget`.
pub fn column(widget: &Widget) -> Layout {
    Layout::for_widget(widget, Axis::Vertical)
}

/// A child of `parent` with a fixed size.
pub fn fixed_widget(parent: &Widget, width: f32, height: f32) -> Widget {
    let child = Widget::child_of(parent);
    if let Err(error) = child.set_fixed_size(Some(Size::new(width, height)), false) {
        panic!("fixing the size of a fresh widget failed: {error}");
    }
    child
}

/// A child of `parent` with no size constraints.
pub fn expanding_widget(parent: &Widget) -> Widget {
    Widget::child_of(parent)
}

/// The widget's position and extents in device pixels, relative to its parent.
pub fn rect_of(widget: &Widget) -> Rect {
    Rect::from_origin_size(widget.device_position(), widget.device_extents())
}

/// Asserts two rects are equal up to rounding in the last float bits.
#[track_caller]
pub fn assert_rect_eq(actual: Rect, expected: Rect) {
    let close = |a: f32, b: f32| (a - b).abs() < 1e-3;
    assert!(
        close(actual.x, expected.x)
            && close(actual.y, expected.y)
            && close(actual.width, expected.width)
            && close(actual.height, expected.height),
        "expected {expected:?}, got {actual:?}"
    );
}

/// Asserts two points are equal up to rounding in the last float bits.
#[track_caller]
pub fn assert_point_eq(actual: Point, expected: Point) {
    assert!(
        (actual.x - expected.x).abs() < 1e-3 && (actual.y - expected.y).abs() < 1e-3,
        "expected {expected:?}, got {actual:?}"
    );
}

#[cfg(test)]
#[path = "tests/testing_tests.rs"]
mod tests;
