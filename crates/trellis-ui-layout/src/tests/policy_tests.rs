use crate::{Axis, ExpansionPolicy, SizeLimits, SizePolicies, SizePolicy};
use trellis_ui_graphics::{Margins, Size};

#[test]
fn expansion_policy_maps_to_size_policies() {
    let policies = ExpansionPolicy::ExpandHorizontally.size_policies();
    assert_eq!(policies.horizontal, SizePolicy::Expanding);
    assert_eq!(policies.vertical, SizePolicy::Fixed);
    assert!(ExpansionPolicy::ExpandBoth.expands(Axis::Vertical));
    assert_eq!(ExpansionPolicy::along(Axis::Vertical), ExpansionPolicy::ExpandVertically);
}

#[test]
fn size_policies_per_axis() {
    let policies = SizePolicies::uniform(SizePolicy::Minimum).with(Axis::Vertical, SizePolicy::Expanding);
    assert_eq!(policies.along(Axis::Horizontal), SizePolicy::Minimum);
    assert_eq!(policies.along(Axis::Vertical), SizePolicy::Expanding);
}

#[test]
fn limits_normalize_and_clamp() {
    let limits = SizeLimits::new(Size::new(10.0, 10.0), Size::new(5.0, 40.0)).normalized();
    assert_eq!(limits.maximum, Size::new(10.0, 40.0));
    assert_eq!(limits.clamp(Size::new(100.0, 0.0)), Size::new(10.0, 10.0));
    assert!(limits.is_fixed_along(Axis::Horizontal));
    assert!(!limits.is_fixed());
}

#[test]
fn axis_helpers_swap_components() {
    let size = Size::new(3.0, 7.0);
    assert_eq!(Axis::Vertical.main(size), 7.0);
    assert_eq!(Axis::Vertical.cross(size), 3.0);
    assert_eq!(Axis::Vertical.pack_size(7.0, 3.0), size);
    let margins = Margins::new(1.0, 2.0, 3.0, 4.0);
    assert_eq!(Axis::Horizontal.leading_margin(&margins), 1.0);
    assert_eq!(Axis::Vertical.margin_sum(&margins), 6.0);
}
