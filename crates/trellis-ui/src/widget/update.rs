//! Update regions and rendering.
//!
//! A widget collects the regions of itself that need repainting, relative to
//! its own top-left corner in device pixels. Collecting a region also marks
//! every visible child it overlaps, and forwards the region to whatever
//! paints beneath the widget: the parent for a transparent widget, the
//! surface for the root and for opaque widgets. Rendering paints the widget,
//! clears its regions and recurses into the children it overlaps.

use trellis_ui_graphics::{Point, Rect};

use super::Widget;
use crate::layout::HasGeometry;
use crate::renderer::GraphicsContext;

impl Widget {
    /// Marks the whole widget for repainting.
    pub fn update(&self) {
        self.update_device(Rect::from_origin_size(Point::ZERO, self.device_extents()));
    }

    /// Marks `rect`, in this widget's units relative to its top-left corner,
    /// for repainting.
    pub fn update_region(&self, rect: Rect) {
        self.update_device(self.to_device(rect));
    }

    pub(crate) fn update_device(&self, rect: Rect) {
        if rect.is_empty() || !self.visible() {
            return;
        }
        let surface = self.surface();
        if surface.as_ref().map(|surface| surface.destroyed()).unwrap_or(false) {
            return;
        }
        {
            let mut state = self.inner.state.borrow_mut();
            if state.update_rects.contains(&rect) {
                return;
            }
            state.update_rects.push(rect);
        }

        let opaque = self
            .inner
            .state
            .borrow()
            .background_colour
            .map(|colour| colour.is_opaque())
            .unwrap_or(false);
        match (self.parent(), surface) {
            (Ok(parent), _) if !opaque => parent.update_device(rect + self.device_position()),
            (_, Some(surface)) if self.is_root() => surface.invalidate_surface(rect),
            (_, Some(surface)) => surface.invalidate_surface(rect + self.device_origin()),
            _ => {}
        }

        for child in self.children() {
            if !child.visible() {
                continue;
            }
            let bounds = Rect::from_origin_size(child.device_position(), child.device_extents());
            if !rect.intersection(&bounds).is_empty() {
                child.update();
            }
        }
    }

    /// Whether the next render must paint this widget.
    pub fn requires_update(&self) -> bool {
        let frame_buffer = self
            .surface()
            .map(|surface| surface.using_frame_buffer())
            .unwrap_or(true);
        !frame_buffer || !self.inner.state.borrow().update_rects.is_empty()
    }

    /// Bounding rect of the pending regions, or `None` when nothing is pending.
    pub fn update_rect(&self) -> Option<Rect> {
        let state = self.inner.state.borrow();
        let (first, rest) = state.update_rects.split_first()?;
        let combined = rest.iter().fold(*first, |combined, rect| combined.combine(rect));
        Some(self.from_device(combined))
    }

    pub fn pending_update_rects(&self) -> Vec<Rect> {
        self.inner.state.borrow().update_rects.clone()
    }

    /// The part of the widget that painting may touch, relative to its
    /// top-left corner: its own area cut down by every ancestor's clip.
    /// Without `include_margins` the area inside the margins is used.
    pub fn default_clip_rect(&self, include_margins: bool) -> Rect {
        self.from_device(self.device_clip_rect(include_margins))
    }

    fn device_clip_rect(&self, include_margins: bool) -> Rect {
        let mut clip = self.device_client_rect(include_margins);
        if let Ok(parent) = self.parent() {
            if !self.is_root() {
                let position = self.device_position();
                let parent_clip = parent.device_clip_rect(true);
                clip = clip.intersection(&parent_clip.translate(-position.x, -position.y));
            }
        }
        clip
    }

    /// Paints this widget and the children it overlaps, clearing their
    /// pending regions. A hidden widget only drops its regions.
    pub fn render(&self, graphics: &mut dyn GraphicsContext) {
        if self.hidden() {
            self.inner.state.borrow_mut().update_rects.clear();
            return;
        }
        if self.requires_update() {
            let clip = self.device_clip_rect(true);
            graphics.set_extents(self.device_extents());
            graphics.set_origin(self.device_origin());
            graphics.scissor_on(clip);
            self.paint_non_client(graphics);
            graphics.scissor_off();

            let client = self.device_client_rect(true);
            graphics.set_extents(client.extents());
            graphics.set_origin(self.device_origin() + client.top_left());
            graphics.scissor_on(clip.translate(-client.x, -client.y));
            graphics.paint_widget(self.id());
            if let Some(behavior) = self.behavior() {
                behavior.paint(self, graphics);
            }
            graphics.scissor_off();
        }
        self.inner.state.borrow_mut().update_rects.clear();

        let client = self.device_client_rect(true);
        for child in self.children() {
            let bounds = Rect::from_origin_size(child.device_position(), child.device_extents());
            if !client.intersection(&bounds).is_empty() {
                child.render(graphics);
            }
        }
    }

    /// Fills the background of a widget that paints one: the pending regions
    /// on a frame-buffered surface, the whole widget otherwise.
    fn paint_non_client(&self, graphics: &mut dyn GraphicsContext) {
        if !self.has_background_colour() && self.transparent_background() {
            return;
        }
        let colour = self.background_colour();
        let frame_buffer = self
            .surface()
            .map(|surface| surface.using_frame_buffer())
            .unwrap_or(false);
        if frame_buffer {
            for rect in self.pending_update_rects() {
                graphics.fill_solid_rect(rect, colour);
            }
        } else {
            graphics.fill_solid_rect(self.device_client_rect(true), colour);
        }
    }
}
