use std::cell::Cell;
use std::rc::Rc;

use super::*;

#[test]
fn advance_by_fires_due_timers() {
    let runtime = TestRuntime::new();
    let fired = Rc::new(Cell::new(false));
    let flag = fired.clone();
    runtime
        .handle()
        .schedule_timer(25, move || flag.set(true))
        .expect("runtime is alive");

    assert_eq!(runtime.advance_by(24), 0);
    assert!(!fired.get());
    assert_eq!(runtime.advance_by(1), 1);
    assert!(fired.get());
    assert_eq!(runtime.now(), 25);
}

#[test]
fn run_until_idle_follows_chained_timers() {
    let runtime = TestRuntime::new();
    let handle = runtime.handle();
    let count = Rc::new(Cell::new(0));
    let outer_count = count.clone();
    let inner_handle = handle.clone();
    handle.schedule_timer(10, move || {
        outer_count.set(outer_count.get() + 1);
        let inner_count = outer_count.clone();
        inner_handle.schedule_timer(10, move || inner_count.set(inner_count.get() + 1));
    });

    assert_eq!(runtime.run_until_idle(8), 2);
    assert_eq!(count.get(), 2);
    assert!(!runtime.has_pending_timers());
}

#[test]
fn window_root_fills_the_requested_size() {
    let mut window = TestWindow::new(&sync_context(), Size::new(120.0, 40.0));
    let layout = row(window.root());
    fixed_widget(window.root(), 20.0, 40.0);
    let filler = expanding_widget(window.root());
    window.root().layout_items(false).expect("root lays out synchronously");

    assert_eq!(layout.item_count(), 2);
    assert_rect_eq(rect_of(&filler), Rect::new(20.0, 0.0, 100.0, 40.0));
    let scene = window.render();
    assert_eq!(scene.painted_widgets().count(), 3);
    assert!(window.surface().invalidated().is_empty());
}
