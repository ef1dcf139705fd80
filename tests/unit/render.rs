use super::*;
use crate::config::CurveConfig;
use crate::curve::CurveParams;
use crate::software::{MonospaceMetrics, RasterTarget, SoftwareSurface};
use crate::surface::NullSink;

fn counted_engine() -> (TextEngine, std::rc::Rc<std::cell::Cell<usize>>) {
    let metrics = MonospaceMetrics::default();
    let surface = SoftwareSurface::new(metrics);
    let placed = surface.allocation_counter();
    (TextEngine::with_backends(Box::new(surface), Box::new(metrics), Box::new(NullSink)), placed)
}

#[test]
fn frame_stats_count_each_object_once() {
    let (mut engine, _) = counted_engine();
    engine.add_text("flat", 0.0, 0.0);
    let id = engine.add_text("curved", 50.0, 50.0);
    engine.set_curvature(id, CurveParams::from_percentage(40)).unwrap();
    let mut target = RasterTarget::new(800, 800);

    let first = engine.render_to(&mut target);
    assert_eq!(first, FrameStats { regenerated: 1, refreshed: 0, reused: 0, flat: 1 });
    let second = engine.render_to(&mut target);
    assert_eq!(second, FrameStats { regenerated: 0, refreshed: 0, reused: 1, flat: 1 });
    assert_eq!(target.blits, 2);
}

#[test]
fn burst_of_changes_regenerates_once_per_frame() {
    let (mut engine, placed) = counted_engine();
    let id = engine.add_text("Stamp", 0.0, 0.0);
    for p in 1..=60 {
        engine.set_curvature(id, CurveParams::from_percentage(p)).unwrap();
    }
    assert!(engine.needs_redraw());
    assert_eq!(placed.get(), 0);

    engine.render_to(&mut RasterTarget::new(800, 800));
    assert_eq!(placed.get(), 1);
    assert!(!engine.needs_redraw());

    let curved = engine.object_mut(id).unwrap().as_curved_mut().unwrap();
    curved.set_text("Seal");
    curved.set_kerning(2.0);
    curved.set_font_size(30.0);
    engine.render_to(&mut RasterTarget::new(800, 800));
    assert_eq!(placed.get(), 2);
}

#[test]
fn shadow_only_change_is_refreshed() {
    let (mut engine, placed) = counted_engine();
    let id = engine.add_text("Stamp", 0.0, 0.0);
    engine.set_curvature(id, CurveParams::from_percentage(20)).unwrap();
    let mut target = RasterTarget::new(800, 800);
    engine.render_to(&mut target);

    engine.object_mut(id).unwrap().as_curved_mut().unwrap().set_shadow(None);
    assert!(engine.needs_redraw());
    assert_eq!(engine.render_to(&mut target).refreshed, 1);
    assert_eq!(placed.get(), 1);
}

#[test]
fn hidden_objects_are_skipped() {
    let (mut engine, placed) = counted_engine();
    let id = engine.add_text("Stamp", 0.0, 0.0);
    engine.set_curvature(id, CurveParams::from_percentage(20)).unwrap();
    engine.object_mut(id).unwrap().visible = false;

    let stats = engine.render_to(&mut RasterTarget::new(100, 100));
    assert_eq!(stats, FrameStats::default());
    assert_eq!(placed.get(), 0);
}

#[test]
fn regeneration_uses_engine_config() {
    let (mut engine, _) = counted_engine();
    engine.config = CurveConfig { max_raster_side: 200, ..CurveConfig::default() };
    let id = engine.add_text("Wide badge text", 0.0, 0.0);
    engine.set_curvature(id, CurveParams::from_percentage(5)).unwrap();
    engine.render_to(&mut RasterTarget::new(100, 100));
    let raster = engine.object(id).unwrap().as_curved().unwrap().cached_raster().unwrap();
    assert!(raster.width() <= 200 && raster.height() <= 200);
}

#[test]
fn svg_export_covers_both_shapes() {
    let (mut engine, _) = counted_engine();
    engine.add_text("plain", 0.0, 0.0);
    let id = engine.add_text("arc", 0.0, 0.0);
    engine.set_curvature(id, CurveParams::from_percentage(50)).unwrap();
    engine.render_to(&mut RasterTarget::new(100, 100));

    let svg = engine.export_svg();
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg">"#));
    assert!(svg.contains("<text"));
    assert!(svg.contains("data:image/png;base64,"));
    assert!(svg.ends_with("</svg>"));
}

#[test]
fn export_before_first_frame_includes_curved_text() {
    let (mut engine, placed) = counted_engine();
    let id = engine.add_text("Stamp", 0.0, 0.0);
    engine.set_curvature(id, CurveParams::from_percentage(60)).unwrap();

    let svg = engine.export_svg();
    assert!(svg.contains("data:image/png;base64,"));
    assert!(!svg.contains("<rect"));
    assert_eq!(placed.get(), 1);

    // The export didn't paint, so the next frame still has to.
    assert!(engine.needs_redraw());
    let stats = engine.render_to(&mut RasterTarget::new(100, 100));
    assert_eq!(stats.refreshed, 1);
    assert_eq!(placed.get(), 1);
}

#[test]
fn export_after_edit_reflects_the_new_text() {
    let (mut engine, placed) = counted_engine();
    let id = engine.add_text("A", 0.0, 0.0);
    engine.set_curvature(id, CurveParams::from_percentage(60)).unwrap();
    engine.render_to(&mut RasterTarget::new(100, 100));
    let before = engine.export_svg();

    engine.object_mut(id).unwrap().as_curved_mut().unwrap().set_text("Longer text");
    let after = engine.export_svg();
    assert_ne!(before, after);
    assert!(after.contains("data:image/png;base64,"));
    assert_eq!(placed.get(), 2);
}
