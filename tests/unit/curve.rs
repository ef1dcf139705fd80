use super::*;

#[test]
fn slider_center_is_flat() {
    assert_eq!(percentage_from_slider(2500.0), 0);
    assert_eq!(angle_from_percentage(0), 0);
    assert!(CurveParams::from_slider(2500.0).is_flat());
}

#[test]
fn small_negative_offsets_round_to_zero() {
    assert_eq!(percentage_from_slider(2490.0), 0);
    assert!(!CurveParams::from_slider(2490.0).flipped);
}

#[test]
fn out_of_range_slider_clamps_and_recomputes_slider() {
    assert_eq!(percentage_from_slider(5000.0), 90);
    assert_eq!(slider_from_percentage(90), 4750.0);
    let curve = CurveParams::from_slider(5000.0);
    assert_eq!(curve.percentage, 90);
    assert_eq!(curve.slider, 4750.0);
    assert_eq!(curve.angle, 324);

    let curve = CurveParams::from_slider(0.0);
    assert_eq!(curve.percentage, -90);
    assert_eq!(curve.slider, 250.0);
}

#[test]
fn non_finite_slider_is_flat() {
    assert_eq!(percentage_from_slider(f64::NAN), 0);
}

#[test]
fn round_trip_is_stable() {
    for p in -90..=90 {
        let once = slider_from_percentage(p);
        let twice = slider_from_percentage(percentage_from_slider(once));
        assert_eq!(once, twice, "percentage {}", p);
        assert_eq!(percentage_from_slider(once), p);
    }
}

#[test]
fn flipped_follows_sign() {
    for p in (-90..=90).filter(|p| *p != 0) {
        assert_eq!(CurveParams::from_percentage(p).flipped, p < 0);
    }
}

#[test]
fn angles_scale_by_three_point_six() {
    assert_eq!(angle_from_percentage(25), 90);
    assert_eq!(angle_from_percentage(50), 180);
    assert_eq!(angle_from_percentage(-90), -324);
}

#[test]
fn percentage_input_is_clamped() {
    let curve = CurveParams::from_percentage(-400);
    assert_eq!(curve.percentage, -90);
    assert_eq!(curve.slider, slider_from_percentage(-90));
}

#[test]
fn diameter_hits_both_endpoints() {
    let config = CurveConfig::default();
    assert_eq!(diameter_for(0, 40.0, &config), config.flat_diameter);
    assert_eq!(diameter_for(90, 40.0, &config), config.tight_diameter);
    assert_eq!(diameter_for(-90, 40.0, &config), config.tight_diameter);
}

#[test]
fn diameter_shrinks_as_curvature_grows() {
    let config = CurveConfig::default();
    for p in 0..90 {
        assert!(diameter_for(p, 40.0, &config) > diameter_for(p + 1, 40.0, &config), "at {}", p);
        assert_eq!(diameter_for(p, 40.0, &config), diameter_for(-p, 40.0, &config));
    }
}

#[test]
fn diameter_scales_with_font_size() {
    let config = CurveConfig::default();
    assert_eq!(diameter_for(0, 80.0, &config), 2.0 * config.flat_diameter);
    assert!(diameter_for(90, 0.001, &config) >= 1.0);
}
