//! Text dumps of widget trees and render scenes for diagnostics.

use std::fmt::Write;

use trellis_ui_graphics::Rect;

use crate::layout::{HasGeometry, ItemHandle, Layout};
use crate::renderer::{RecordedRenderScene, RenderOp};
use crate::widget::Widget;

/// Formats `root` and its descendants, one widget per line, with each
/// widget's layout items beneath it.
pub fn format_widget_tree(root: &Widget) -> String {
    let mut output = String::new();
    write_widget(&mut output, root, 0);
    output
}

/// Writes [`format_widget_tree`] to the `debug` log.
pub fn log_widget_tree(root: &Widget) {
    for line in format_widget_tree(root).lines() {
        log::debug!("{line}");
    }
}

pub fn format_render_scene(scene: &RecordedRenderScene) -> String {
    let mut output = String::new();
    for (index, op) in scene.operations().iter().enumerate() {
        let _ = match op {
            RenderOp::ScissorOn { rect } => writeln!(output, "{index:>4} scissor {}", rect_label(rect)),
            RenderOp::ScissorOff => writeln!(output, "{index:>4} scissor off"),
            RenderOp::FillRect { rect, colour } => writeln!(
                output,
                "{index:>4} fill {} #{:02x}{:02x}{:02x}{:02x}",
                rect_label(rect),
                colour.r,
                colour.g,
                colour.b,
                colour.a
            ),
            RenderOp::PaintWidget { widget, rect, .. } => {
                writeln!(output, "{index:>4} paint {widget} {}", rect_label(rect))
            }
        };
    }
    output
}

pub fn log_render_scene(scene: &RecordedRenderScene) {
    for line in format_render_scene(scene).lines() {
        log::debug!("{line}");
    }
}

/// Number of widgets in the tree rooted at `root`, `root` included.
pub fn count_widgets(root: &Widget) -> usize {
    1 + root
        .children()
        .iter()
        .map(count_widgets)
        .sum::<usize>()
}

fn write_widget(output: &mut String, widget: &Widget, depth: usize) {
    let indent = "  ".repeat(depth);
    let position = widget.device_position();
    let extents = widget.device_extents();
    let _ = write!(
        output,
        "{indent}widget {} at ({}, {}) size {}x{}",
        widget.id(),
        position.x,
        position.y,
        extents.width,
        extents.height
    );
    if widget.hidden() {
        output.push_str(" hidden");
    }
    if widget.is_managing_layout() {
        output.push_str(" managing");
    }
    if let Some(rect) = widget.update_rect() {
        let _ = write!(output, " dirty {}", rect_label(&rect));
    }
    output.push('\n');
    if let Ok(layout) = widget.layout() {
        write_layout(output, &layout, depth + 1);
    }
    for child in widget.children() {
        write_widget(output, &child, depth + 1);
    }
}

fn write_layout(output: &mut String, layout: &Layout, depth: usize) {
    let indent = "  ".repeat(depth);
    let _ = writeln!(
        output,
        "{indent}layout {:?}{} {}",
        layout.axis(),
        if layout.enabled() { "" } else { " disabled" },
        rect_label(&Rect::from_origin_size(
            layout.device_position(),
            layout.device_extents()
        ))
    );
    for item in layout.items() {
        match &item {
            ItemHandle::Widget(widget) => {
                let _ = writeln!(output, "{indent}  item widget {}", widget.id());
            }
            ItemHandle::Layout(nested) => write_layout(output, nested, depth + 1),
            ItemHandle::Spacer(spacer) => {
                let _ = writeln!(output, "{indent}  spacer {}", rect_label(&spacer.geometry()));
            }
        }
    }
}

fn rect_label(rect: &Rect) -> String {
    format!("[{}, {} {}x{}]", rect.x, rect.y, rect.width, rect.height)
}

#[cfg(test)]
#[path = "tests/debug_tests.rs"]
mod tests;
