use trellis_ui_graphics::{Color, Point, Rect, Size};

use crate::widget::{Widget, WidgetId};

/// Drawing services a widget renders through.
///
/// Rects passed to [`scissor_on`](Self::scissor_on) and
/// [`fill_solid_rect`](Self::fill_solid_rect) are relative to the current
/// origin, which is given in window coordinates.
pub trait GraphicsContext {
    fn set_origin(&mut self, origin: Point);

    fn set_extents(&mut self, extents: Size);

    fn scissor_on(&mut self, rect: Rect);

    fn scissor_off(&mut self);

    fn fill_solid_rect(&mut self, rect: Rect, colour: Color);

    /// Marks the point where `widget` paints its client area.
    fn paint_widget(&mut self, widget: WidgetId);
}

/// A rendered operation emitted by the headless renderer, in window coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum RenderOp {
    ScissorOn {
        rect: Rect,
    },
    ScissorOff,
    FillRect {
        rect: Rect,
        colour: Color,
    },
    PaintWidget {
        widget: WidgetId,
        rect: Rect,
        clip: Option<Rect>,
    },
}

/// The operations of one render pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordedRenderScene {
    operations: Vec<RenderOp>,
}

impl RecordedRenderScene {
    pub fn new(operations: Vec<RenderOp>) -> Self {
        Self { operations }
    }

    /// Returns a slice of recorded render operations in submission order.
    pub fn operations(&self) -> &[RenderOp] {
        &self.operations
    }

    pub fn into_operations(self) -> Vec<RenderOp> {
        self.operations
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Widgets that painted, in painting order.
    pub fn painted_widgets(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.operations.iter().filter_map(|op| match op {
            RenderOp::PaintWidget { widget, .. } => Some(*widget),
            _ => None,
        })
    }

    /// Window rect `widget` painted its client area into, if it painted.
    pub fn painted_rect(&self, widget: WidgetId) -> Option<Rect> {
        self.operations.iter().find_map(|op| match op {
            RenderOp::PaintWidget {
                widget: painted,
                rect,
                ..
            } if *painted == widget => Some(*rect),
            _ => None,
        })
    }

    pub fn fills(&self) -> impl Iterator<Item = (Rect, Color)> + '_ {
        self.operations.iter().filter_map(|op| match op {
            RenderOp::FillRect { rect, colour } => Some((*rect, *colour)),
            _ => None,
        })
    }
}

/// A graphics context with no device behind it that records every operation.
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    origin: Point,
    extents: Size,
    scissor: Option<Rect>,
    operations: Vec<RenderOp>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders `root` and everything beneath it that needs painting.
    pub fn render(&mut self, root: &Widget) -> RecordedRenderScene {
        self.origin = Point::ZERO;
        self.extents = Size::ZERO;
        self.scissor = None;
        root.render(self);
        log::trace!("recorded {} render operations", self.operations.len());
        RecordedRenderScene::new(std::mem::take(&mut self.operations))
    }

    fn to_window(&self, rect: Rect) -> Rect {
        rect + self.origin
    }
}

impl GraphicsContext for HeadlessRenderer {
    fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    fn set_extents(&mut self, extents: Size) {
        self.extents = extents;
    }

    fn scissor_on(&mut self, rect: Rect) {
        let rect = self.to_window(rect);
        self.scissor = Some(rect);
        self.operations.push(RenderOp::ScissorOn { rect });
    }

    fn scissor_off(&mut self) {
        self.scissor = None;
        self.operations.push(RenderOp::ScissorOff);
    }

    fn fill_solid_rect(&mut self, rect: Rect, colour: Color) {
        let rect = self.to_window(rect);
        self.operations.push(RenderOp::FillRect { rect, colour });
    }

    fn paint_widget(&mut self, widget: WidgetId) {
        self.operations.push(RenderOp::PaintWidget {
            widget,
            rect: Rect::from_origin_size(self.origin, self.extents),
            clip: self.scissor,
        });
    }
}

#[cfg(test)]
#[path = "tests/renderer_tests.rs"]
mod tests;
