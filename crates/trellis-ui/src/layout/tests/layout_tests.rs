use trellis_ui_graphics::{Margins, Point, Rect, Size, Units};
use trellis_ui_layout::{Axis, ExpansionPolicy, SizePolicies, SizePolicy};

use crate::context::UiContext;
use crate::error::LayoutError;
use crate::layout::{HasGeometry, HasPolicy, ItemHandle, Layout, Spacer};
use crate::style::Style;
use crate::widget::Widget;

fn bare_context() -> UiContext {
    UiContext::new(
        Style::default()
            .with_margins(Margins::ZERO)
            .with_layout_margins(Margins::ZERO)
            .with_layout_spacing(Size::ZERO),
    )
}

fn fixed_child(parent: &Widget, width: f32, height: f32) -> Widget {
    let child = Widget::child_of(parent);
    child
        .set_fixed_size(Some(Size::new(width, height)), false)
        .expect("no managing widget");
    child
}

fn rect_of(widget: &Widget) -> Rect {
    Rect::from_origin_size(widget.device_position(), widget.device_extents())
}

fn assert_close(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn spacer_absorbs_leftover_between_fixed_items() {
    let context = bare_context();
    let root = Widget::new(&context);
    let layout = Layout::for_widget(&root, Axis::Horizontal);
    let left = fixed_child(&root, 50.0, 20.0);
    let spacer = layout.add_spacer();
    let right = fixed_child(&root, 50.0, 20.0);

    root.resize(Size::new(200.0, 40.0));

    assert_eq!(rect_of(&left), Rect::new(0.0, 0.0, 50.0, 20.0));
    assert_eq!(spacer.geometry(), Rect::new(50.0, 0.0, 100.0, 0.0));
    assert_eq!(rect_of(&right), Rect::new(150.0, 0.0, 50.0, 20.0));
}

#[test]
fn clipped_item_returns_its_share_to_the_pool() {
    let context = bare_context();
    let root = Widget::new(&context);
    let _layout = Layout::for_widget(&root, Axis::Horizontal);
    let capped = Widget::child_of(&root);
    capped
        .set_maximum_size(Some(Size::new(50.0, f32::INFINITY)), false)
        .unwrap();
    let first = Widget::child_of(&root);
    let second = Widget::child_of(&root);

    root.resize(Size::new(300.0, 30.0));

    assert_eq!(rect_of(&capped), Rect::new(0.0, 0.0, 50.0, 30.0));
    assert_eq!(rect_of(&first), Rect::new(50.0, 0.0, 125.0, 30.0));
    assert_eq!(rect_of(&second), Rect::new(175.0, 0.0, 125.0, 30.0));
}

#[test]
fn margins_spacing_and_extents_fill_the_box() {
    let context = bare_context();
    let root = Widget::new(&context);
    let layout = Layout::for_widget(&root, Axis::Horizontal);
    layout.set_margins(Some(Margins::uniform(10.0)));
    layout.set_spacing(Some(Size::new(5.0, 5.0)));
    let children: Vec<Widget> = (0..3).map(|_| Widget::child_of(&root)).collect();

    root.resize(Size::new(200.0, 50.0));

    let total: f32 = children.iter().map(|child| child.device_extents().width).sum();
    assert_close(total + 2.0 * 5.0 + 2.0 * 10.0, 200.0);
    assert_eq!(children[0].device_position(), Point::new(10.0, 10.0));
    assert_close(children[0].device_extents().height, 30.0);
    let last = rect_of(&children[2]);
    assert_close(last.right(), 190.0);
}

#[test]
fn limits_sum_along_the_axis_and_take_the_largest_across() {
    let context = bare_context();
    let root = Widget::new(&context);
    let layout = Layout::for_widget(&root, Axis::Horizontal);
    layout.set_margins(Some(Margins::uniform(2.0)));
    layout.set_spacing(Some(Size::new(4.0, 4.0)));
    fixed_child(&root, 50.0, 20.0);
    fixed_child(&root, 30.0, 40.0);

    assert_eq!(layout.minimum_size(), Size::new(88.0, 44.0));
    assert_eq!(layout.maximum_size(), Size::new(88.0, 44.0));
    assert_eq!(
        layout.size_policy(),
        SizePolicies::uniform(SizePolicy::Fixed)
    );
}

#[test]
fn minimum_never_exceeds_maximum() {
    let layout = Layout::vertical();
    layout
        .set_minimum_size(Some(Size::new(100.0, 100.0)), false)
        .unwrap();
    layout
        .set_maximum_size(Some(Size::new(10.0, 200.0)), false)
        .unwrap();

    let minimum = layout.minimum_size();
    let maximum = layout.maximum_size();
    assert!(minimum.width <= maximum.width);
    assert!(minimum.height <= maximum.height);
}

#[test]
fn empty_and_disabled_layouts_have_no_limits() {
    let layout = Layout::horizontal();
    assert_eq!(layout.minimum_size(), Size::ZERO);
    assert!(layout.maximum_size().width.is_infinite());

    let context = bare_context();
    let root = Widget::new(&context);
    let layout = Layout::for_widget(&root, Axis::Vertical);
    fixed_child(&root, 10.0, 10.0);
    assert_eq!(layout.minimum_size(), Size::new(10.0, 10.0));
    layout.disable();
    assert_eq!(layout.minimum_size(), Size::ZERO);
    layout.enable();
    assert_eq!(layout.minimum_size(), Size::new(10.0, 10.0));
}

#[test]
fn policy_reflects_expanding_items() {
    let context = bare_context();
    let root = Widget::new(&context);
    let layout = Layout::for_widget(&root, Axis::Horizontal);
    let child = Widget::child_of(&root);
    child
        .set_size_policy(Some(SizePolicies::uniform(SizePolicy::Minimum)), false)
        .unwrap();
    child
        .set_minimum_size(Some(Size::new(10.0, 10.0)), false)
        .unwrap();
    assert_eq!(layout.size_policy(), SizePolicies::uniform(SizePolicy::Minimum));

    Widget::child_of(&root);
    assert_eq!(
        layout.size_policy(),
        SizePolicies::uniform(SizePolicy::Expanding)
    );
}

#[test]
fn second_pass_with_same_box_is_idempotent() {
    let context = bare_context();
    let root = Widget::new(&context);
    let layout = Layout::for_widget(&root, Axis::Vertical);
    let children = vec![
        fixed_child(&root, 40.0, 30.0),
        Widget::child_of(&root),
        Widget::child_of(&root),
    ];
    children[1]
        .set_maximum_size(Some(Size::new(f32::INFINITY, 25.0)), false)
        .unwrap();

    layout.layout_items(Point::new(5.0, 5.0), Size::new(120.0, 200.0));
    let first: Vec<Rect> = children.iter().map(rect_of).collect();
    layout.layout_items(Point::new(5.0, 5.0), Size::new(120.0, 200.0));
    let second: Vec<Rect> = children.iter().map(rect_of).collect();

    assert_eq!(first, second);
    assert_eq!(first[0], Rect::new(5.0, 5.0, 40.0, 30.0));
    assert_eq!(first[1], Rect::new(5.0, 35.0, 120.0, 25.0));
    assert_eq!(first[2], Rect::new(5.0, 60.0, 120.0, 145.0));
}

#[test]
fn nested_layout_recurses_into_its_items() {
    let context = bare_context();
    let root = Widget::new(&context);
    let outer = Layout::for_widget(&root, Axis::Vertical);
    let header = fixed_child(&root, 100.0, 20.0);
    let row = Layout::nested_in(&outer, Axis::Horizontal);
    let left = Widget::new(&context);
    let right = Widget::new(&context);
    row.add(left.clone()).unwrap();
    row.add(right.clone()).unwrap();

    assert!(left.parent().unwrap().ptr_eq(&root));
    root.resize(Size::new(100.0, 100.0));

    assert_eq!(rect_of(&header), Rect::new(0.0, 0.0, 100.0, 20.0));
    assert_eq!(row.position(), Point::new(0.0, 20.0));
    assert_eq!(row.extents(), Size::new(100.0, 80.0));
    assert_eq!(rect_of(&left), Rect::new(0.0, 20.0, 50.0, 80.0));
    assert_eq!(rect_of(&right), Rect::new(50.0, 20.0, 50.0, 80.0));
}

#[test]
fn hidden_items_take_no_space() {
    let context = bare_context();
    let root = Widget::new(&context);
    let _layout = Layout::for_widget(&root, Axis::Horizontal);
    let first = Widget::child_of(&root);
    let hidden = Widget::child_of(&root);
    let last = Widget::child_of(&root);
    hidden.hide().unwrap();

    root.resize(Size::new(100.0, 10.0));

    assert_eq!(rect_of(&first), Rect::new(0.0, 0.0, 50.0, 10.0));
    assert_eq!(rect_of(&last), Rect::new(50.0, 0.0, 50.0, 10.0));
    assert_eq!(hidden.device_extents(), Size::ZERO);
}

#[test]
fn adding_the_same_item_twice_fails() {
    let context = bare_context();
    let widget = Widget::new(&context);
    let layout = Layout::horizontal();
    layout.add(&widget).unwrap();
    assert_eq!(layout.add(&widget), Err(LayoutError::ItemAlreadyAdded));
    assert_eq!(layout.item_count(), 1);
}

#[test]
fn adding_an_item_from_another_layout_moves_it() {
    let context = bare_context();
    let widget = Widget::new(&context);
    let first = Layout::horizontal();
    let second = Layout::vertical();
    first.add(widget.clone()).unwrap();

    second.add(&widget).unwrap();

    assert_eq!(first.item_count(), 0);
    assert!(second.contains_widget(&widget));
    assert!(widget.parent_layout().unwrap().ptr_eq(&second));

    let weak = widget.downgrade();
    drop(widget);
    assert!(weak.upgrade().is_some(), "ownership moves with the item");
    assert_eq!(second.item_count(), 1);
}

#[test]
fn borrowed_items_disappear_when_dropped() {
    let context = bare_context();
    let layout = Layout::horizontal();
    let widget = Widget::new(&context);
    let spacer = Spacer::horizontal();
    layout.add(&widget).unwrap();
    layout.add(&spacer).unwrap();
    assert_eq!(layout.item_count(), 2);

    drop(widget);
    drop(spacer);

    assert_eq!(layout.item_count(), 0);
}

#[test]
fn owned_items_live_as_long_as_the_layout() {
    let layout = Layout::horizontal();
    let spacer = Spacer::in_layout(&layout, ExpansionPolicy::ExpandBoth);
    let weak = spacer.downgrade();
    drop(spacer);
    assert!(weak.upgrade().is_some());

    drop(layout);
    assert!(weak.upgrade().is_none());
}

#[test]
fn nesting_a_layout_inside_itself_is_rejected() {
    let outer = Layout::vertical();
    let inner = Layout::nested_in(&outer, Axis::Horizontal);
    assert_eq!(inner.add(outer.clone()), Err(LayoutError::WouldCreateCycle));
    assert_eq!(outer.add(&outer), Err(LayoutError::WouldCreateCycle));
}

#[test]
fn indexed_access_checks_range_and_type() {
    let context = bare_context();
    let layout = Layout::horizontal();
    let widget = Widget::new(&context);
    layout.add(&widget).unwrap();
    layout.add_spacer();

    assert!(layout.widget_at(0).unwrap().ptr_eq(&widget));
    assert!(matches!(layout.item_at(1), Ok(ItemHandle::Spacer(_))));
    assert_eq!(
        layout.layout_at(1).unwrap_err(),
        LayoutError::WrongItemType {
            index: 1,
            expected: "layout"
        }
    );
    assert_eq!(
        layout.remove_at(2),
        Err(LayoutError::ItemIndexOutOfRange { index: 2, count: 2 })
    );
    assert_eq!(
        layout.insert(5, Spacer::vertical()),
        Err(LayoutError::ItemIndexOutOfRange { index: 5, count: 2 })
    );
}

#[test]
fn removing_items_clears_back_references() {
    let context = bare_context();
    let layout = Layout::horizontal();
    let widget = Widget::new(&context);
    layout.add(&widget).unwrap();
    layout.remove_widget(&widget).unwrap();

    assert!(widget.parent_layout().is_none());
    assert_eq!(layout.remove_widget(&widget), Err(LayoutError::ItemNotFound));

    layout.add_spacer();
    layout.add(&widget).unwrap();
    layout.remove_all();
    assert_eq!(layout.item_count(), 0);
    assert!(widget.parent_layout().is_none());
}

#[test]
fn insert_places_item_before_index() {
    let context = bare_context();
    let layout = Layout::vertical();
    let first = Widget::new(&context);
    let second = Widget::new(&context);
    layout.add(&second).unwrap();
    layout.insert(0, &first).unwrap();
    assert!(layout.widget_at(0).unwrap().ptr_eq(&first));
    assert!(layout.widget_at(1).unwrap().ptr_eq(&second));
}

#[test]
fn units_convert_overrides_through_owner_metrics() {
    let layout = Layout::horizontal();
    assert_eq!(layout.set_units(Units::Inches), Units::Pixels);
    layout
        .set_minimum_size(Some(Size::new(1.0, 0.5)), false)
        .unwrap();
    assert_eq!(layout.minimum_size(), Size::new(1.0, 0.5));

    layout.set_units(Units::Pixels);
    assert_eq!(layout.minimum_size(), Size::new(96.0, 48.0));
}

#[test]
fn style_supplies_default_margins_and_spacing() {
    let context = UiContext::new(
        Style::default()
            .with_layout_margins(Margins::uniform(3.0))
            .with_layout_spacing(Size::new(7.0, 7.0)),
    );
    let root = Widget::new(&context);
    let layout = Layout::for_widget(&root, Axis::Horizontal);
    assert!(!layout.has_margins());
    assert_eq!(layout.margins(), Margins::uniform(3.0));
    assert_eq!(layout.spacing(), Size::new(7.0, 7.0));

    layout.set_spacing(Some(Size::ZERO));
    assert_eq!(layout.spacing(), Size::ZERO);
}

#[test]
fn spacer_limits_follow_expansion_policy() {
    let spacer = Spacer::vertical();
    spacer.set_minimum_extent(12.0);
    assert_eq!(spacer.device_minimum_size(), Size::new(0.0, 12.0));
    assert_eq!(spacer.device_maximum_size().width, 0.0);
    assert!(spacer.device_maximum_size().height.is_infinite());
    assert_eq!(
        spacer.size_policy(),
        SizePolicies::new(SizePolicy::Fixed, SizePolicy::Expanding)
    );
}

#[test]
fn spacer_errors() {
    let spacer = Spacer::horizontal();
    assert_eq!(spacer.parent_layout().unwrap_err(), LayoutError::NoParentLayout);
    assert_eq!(
        spacer.set_padding(Some(Margins::uniform(1.0))),
        Err(LayoutError::PaddingUnsupported)
    );
    assert!(spacer.set_padding(None).is_ok());

    let layout = Layout::horizontal();
    let owned = layout.add_spacer();
    assert!(owned.parent_layout().unwrap().ptr_eq(&layout));
}

#[test]
fn spacer_policy_change_schedules_a_relayout() {
    let runtime = trellis_core::Runtime::new(std::sync::Arc::new(trellis_core::DefaultScheduler));
    let context = bare_context()
        .with_runtime(runtime.handle())
        .with_layout_delay(10);
    let surface = std::rc::Rc::new(crate::surface::HeadlessSurface::default());
    let root = Widget::new_root(&context, surface);
    let layout = Layout::for_widget(&root, Axis::Horizontal);
    let widget = Widget::child_of(&root);
    let spacer = layout.add_spacer();
    root.resize(Size::new(100.0, 10.0));
    runtime.advance_to(10);
    assert_close(widget.device_extents().width, 50.0);
    assert!(!runtime.has_pending_timers());

    spacer.set_expansion_policy(ExpansionPolicy::ExpandVertically);

    assert!(runtime.has_pending_timers());
    runtime.advance_to(20);
    assert_close(widget.device_extents().width, 100.0);

    spacer.set_minimum_extent(40.0);
    spacer.set_expansion_policy(ExpansionPolicy::ExpandHorizontally);
    runtime.advance_to(30);
    assert_close(widget.device_extents().width, 30.0);
    assert_close(spacer.geometry().width, 70.0);
}
