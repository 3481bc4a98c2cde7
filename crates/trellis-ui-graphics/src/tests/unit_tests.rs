use crate::{FixedDeviceMetrics, Font, Margins, Size, Units, UnitsConverter};

#[test]
fn pixels_are_passed_through() {
    let metrics = FixedDeviceMetrics::default();
    let converter = UnitsConverter::new(&metrics, Units::Pixels);
    let size = Size::new(12.5, 3.0);
    assert_eq!(converter.to_device_units(size), size);
    assert_eq!(converter.from_device_units(size), size);
}

#[test]
fn inches_use_per_axis_dpi() {
    let metrics = FixedDeviceMetrics::new(100.0, 200.0, 16.0);
    let converter = UnitsConverter::new(&metrics, Units::Inches);
    assert_eq!(
        converter.to_device_units(Size::new(1.0, 1.0)),
        Size::new(100.0, 200.0)
    );
    assert_eq!(
        converter.from_device_units(Size::new(50.0, 50.0)),
        Size::new(0.5, 0.25)
    );
}

#[test]
fn millimetres_round_trip_margins() {
    let metrics = FixedDeviceMetrics::new(254.0, 254.0, 16.0);
    let converter = UnitsConverter::new(&metrics, Units::Millimetres);
    let device = converter.to_device_units(Margins::uniform(1.0));
    assert!((device.left - 10.0).abs() < 1e-4);
    let back = converter.from_device_units(device);
    assert!((back.bottom - 1.0).abs() < 1e-4);
}

#[test]
fn ems_follow_metrics_em_size() {
    let metrics = FixedDeviceMetrics::new(96.0, 96.0, 20.0);
    let converter = UnitsConverter::new(&metrics, Units::Ems);
    assert_eq!(converter.horizontal_to_device(2.0), 40.0);
    assert_eq!(converter.vertical_from_device(10.0), 0.5);
}

#[test]
fn unbounded_extents_stay_unbounded() {
    let metrics = FixedDeviceMetrics::default();
    let converter = UnitsConverter::new(&metrics, Units::Points);
    let size = converter.to_device_units(Size::UNBOUNDED);
    assert!(size.width.is_infinite() && size.height.is_infinite());
}

#[test]
fn zero_dpi_does_not_poison_geometry() {
    let metrics = FixedDeviceMetrics::new(0.0, 0.0, 0.0);
    let converter = UnitsConverter::new(&metrics, Units::Inches);
    assert_eq!(
        converter.to_device_units(Size::new(3.0, 4.0)),
        Size::new(3.0, 4.0)
    );
}

#[test]
fn font_em_size_scales_with_dpi() {
    let font = Font::new("Sans", 12.0);
    assert_eq!(font.em_size(72.0), 12.0);
    assert_eq!(font.em_size(144.0), 24.0);
}
