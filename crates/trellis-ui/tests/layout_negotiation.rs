use trellis_testing::prelude::*;
use trellis_ui::prelude::*;
use trellis_ui::{HeadlessSurface, DEFAULT_LAYOUT_DELAY_MS};

#[test]
fn form_layout_negotiates_nested_rows() {
    let context = sync_context();
    let mut window = TestWindow::new(&context, Size::new(300.0, 200.0));
    let root = window.root().clone();
    let outer = column(&root);
    outer.set_spacing(Some(Size::new(10.0, 10.0)));

    let toolbar = Layout::nested_in(&outer, Axis::Horizontal);
    let buttons: Vec<Widget> = (0..3)
        .map(|_| {
            let button = Widget::new(&context);
            button
                .set_fixed_size(Some(Size::new(40.0, 24.0)), false)
                .unwrap();
            toolbar.add(button.clone()).unwrap();
            button
        })
        .collect();
    toolbar.add_spacer();

    let body = expanding_widget(&root);
    let status = fixed_widget(&root, 300.0, 16.0);

    root.layout_items(false).unwrap();

    assert_rect_eq(rect_of(&buttons[0]), Rect::new(0.0, 0.0, 40.0, 24.0));
    assert_rect_eq(rect_of(&buttons[2]), Rect::new(80.0, 0.0, 40.0, 24.0));
    assert_point_eq(toolbar.position(), Point::new(0.0, 0.0));
    assert_eq!(toolbar.extents().height, 24.0);
    assert_rect_eq(rect_of(&body), Rect::new(0.0, 34.0, 300.0, 140.0));
    assert_rect_eq(rect_of(&status), Rect::new(0.0, 184.0, 300.0, 16.0));

    let scene = window.render();
    assert!(scene.painted_rect(body.id()).is_some());
    assert!(buttons.iter().all(|button| button.parent().unwrap().ptr_eq(&root)));
}

#[test]
fn resizing_the_root_relays_out_the_whole_tree() {
    let context = sync_context();
    let window = TestWindow::new(&context, Size::new(100.0, 100.0));
    let root = window.root();
    row(root);
    let left = expanding_widget(root);
    let right = expanding_widget(root);
    column(&right);
    let top = expanding_widget(&right);
    let bottom = fixed_widget(&right, 10.0, 30.0);
    root.layout_items(false).unwrap();

    root.resize(Size::new(200.0, 60.0));

    // Both start from their minimums (0 and 10) and share the rest evenly.
    assert_rect_eq(rect_of(&left), Rect::new(0.0, 0.0, 95.0, 60.0));
    assert_rect_eq(rect_of(&right), Rect::new(95.0, 0.0, 105.0, 60.0));
    assert_rect_eq(rect_of(&top), Rect::new(0.0, 0.0, 105.0, 30.0));
    assert_rect_eq(rect_of(&bottom), Rect::new(0.0, 30.0, 10.0, 30.0));
}

#[test]
fn minimum_sizes_propagate_up_through_nested_widgets() {
    let context = UiContext::new(zero_margin_style().with_margins(Margins::uniform(5.0)));
    let root = Widget::new(&context);
    row(&root);
    let panel = Widget::child_of(&root);
    let panel_layout = column(&panel);
    panel_layout.set_spacing(Some(Size::new(2.0, 2.0)));
    fixed_widget(&panel, 30.0, 10.0);
    fixed_widget(&panel, 20.0, 10.0);

    assert_eq!(panel.minimum_size(), Size::new(40.0, 32.0));
    assert_eq!(root.minimum_size(), Size::new(50.0, 42.0));
}

#[test]
fn spacers_split_leftover_space_evenly() {
    let context = sync_context();
    let window = TestWindow::new(&context, Size::new(120.0, 10.0));
    let root = window.root();
    let layout = row(root);
    layout.add_spacer();
    let centre = fixed_widget(root, 20.0, 10.0);
    layout.add_spacer();
    root.layout_items(false).unwrap();

    assert_rect_eq(rect_of(&centre), Rect::new(50.0, 0.0, 20.0, 10.0));
}

#[test]
fn two_axis_spacer_fills_both_directions() {
    let context = sync_context();
    let window = TestWindow::new(&context, Size::new(50.0, 80.0));
    let root = window.root();
    let layout = column(root);
    let spacer = Spacer::in_layout(&layout, ExpansionPolicy::ExpandBoth);
    root.layout_items(false).unwrap();

    assert_eq!(spacer.geometry(), Rect::new(0.0, 0.0, 50.0, 80.0));
}

#[test]
fn deferred_mutations_collapse_into_one_pass() {
    let runtime = TestRuntime::new();
    let context = deferred_context(&runtime);
    let window = TestWindow::with_surface(&context, HeadlessSurface::default(), Size::new(90.0, 30.0));
    let root = window.root();
    row(root);
    runtime.run_until_idle(4);

    let children: Vec<Widget> = (0..3).map(|_| expanding_widget(root)).collect();
    for child in &children {
        child
            .set_maximum_size(Some(Size::new(45.0, 30.0)), true)
            .unwrap();
    }
    assert!(root.has_pending_layout());
    assert_eq!(runtime.advance_by(DEFAULT_LAYOUT_DELAY_MS), 1);

    for (index, child) in children.iter().enumerate() {
        assert_rect_eq(
            rect_of(child),
            Rect::new(30.0 * index as f32, 0.0, 30.0, 30.0),
        );
    }
    assert!(!runtime.has_pending_timers());
}

#[test]
fn deferred_pass_is_skipped_for_dropped_widgets() {
    let runtime = TestRuntime::new();
    let context = deferred_context(&runtime);
    let window = TestWindow::new(&context, Size::new(10.0, 10.0));
    let panel = Widget::child_of(window.root());
    panel.set_managing_layout(true);
    row(&panel);
    panel.layout_items(true).unwrap();
    assert!(runtime.has_pending_timers());

    window.root().remove_widget(&panel).unwrap();
    drop(panel);

    runtime.run_until_idle(4);
    assert!(!runtime.has_pending_timers());
}

#[test]
fn non_deferrable_context_reports_configuration_error() {
    let context = sync_context();
    let window = TestWindow::new(&context, Size::new(10.0, 10.0));
    let panel = expanding_widget(window.root());
    row(&panel);

    assert_eq!(panel.layout_items(true), Err(LayoutError::CannotDeferLayout));
    assert!(panel.layout_items(false).is_ok());
}
