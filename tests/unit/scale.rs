use crate::cache::CacheState;
use crate::curve::CurveParams;
use crate::objects::CurvedText;
use crate::software::{MonospaceMetrics, RasterTarget, SoftwareSurface};
use crate::types::FontSpec;
use crate::config::CurveConfig;

fn curved() -> CurvedText {
    let mut c = CurvedText::new("Hello", FontSpec::default(), CurveParams::from_percentage(40), 250.0);
    c.width = 100.0;
    c
}

fn clean(c: &mut CurvedText) {
    let metrics = MonospaceMetrics::default();
    c.render(&mut RasterTarget::new(10, 10), &SoftwareSurface::new(metrics), &metrics, &CurveConfig::default());
    assert_eq!(c.cache_state(), CacheState::Clean);
}

#[test]
fn horizontal_resize_folds_into_font_and_diameter() {
    let mut c = curved();
    c.scale_x = 1.5;
    c.absorb_scale_x(1.5);
    assert_eq!(c.font().size, 60.0);
    assert_eq!(c.diameter(), 375.0);
    assert_eq!(c.width(), 150.0);
    assert_eq!(c.scale_x(), 1.0);
}

#[test]
fn absorbing_marks_the_cache_dirty() {
    let mut c = curved();
    clean(&mut c);
    c.absorb_scale_x(1.2);
    assert_eq!(c.cache_state(), CacheState::Dirty);

    clean(&mut c);
    c.absorb_scale_y(0.8);
    assert_eq!(c.cache_state(), CacheState::Dirty);
}

#[test]
fn vertical_resize_only_touches_height() {
    let mut c = curved();
    c.height = 200.0;
    c.scale_y = 0.5;
    c.absorb_scale_y(0.5);
    assert_eq!(c.height(), 100.0);
    assert_eq!(c.scale_y(), 1.0);
    assert_eq!(c.font().size, 40.0);
    assert_eq!(c.diameter(), 250.0);
}

#[test]
fn extents_never_collapse_below_one() {
    let mut c = curved();
    c.width = 0.5;
    c.height = 100.0;
    c.absorb_scale_x(0.5);
    c.absorb_scale_y(0.001);
    assert_eq!(c.width(), 1.0);
    assert_eq!(c.height(), 1.0);
    assert!(c.diameter() >= 1.0);
}

#[test]
fn degenerate_factors_are_ignored() {
    let mut c = curved();
    c.absorb_scale_x(0.0);
    c.absorb_scale_x(f64::NAN);
    c.absorb_scale_y(-2.0);
    assert_eq!(c.font().size, 40.0);
    assert_eq!(c.width(), 100.0);
    assert_eq!(c.height(), 250.0);
}
