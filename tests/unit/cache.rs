use super::*;
use image::Rgba;
use crate::software::{MonospaceMetrics, SoftwareSurface};
use crate::types::FontSpec;

fn render(cache: &mut RasterCache, text: &str, surface: &SoftwareSurface) -> RenderPass {
    let font = FontSpec::default();
    let layout = ArcLayout { text, diameter: 250.0, kerning: 0.0, flipped: false, font: &font, fill: "#000000", stroke: None };
    cache.render(&layout, surface, &MonospaceMetrics::default(), &CurveConfig::default())
}

#[test]
fn starts_dirty_and_empty() {
    let cache = RasterCache::default();
    assert_eq!(cache.state(), CacheState::Dirty);
    assert!(cache.raster().is_none());
    assert!(!cache.needs_refresh());
}

#[test]
fn clean_cache_is_reused_without_placing() {
    let surface = SoftwareSurface::default();
    let placed = surface.allocation_counter();
    let mut cache = RasterCache::default();

    assert_eq!(render(&mut cache, "AB", &surface), RenderPass::Regenerated { trimmed: true });
    assert_eq!(cache.state(), CacheState::Clean);
    assert_eq!(placed.get(), 1);

    assert_eq!(render(&mut cache, "AB", &surface), RenderPass::Reused);
    assert_eq!(placed.get(), 1);
}

#[test]
fn invalidation_regenerates_once() {
    let surface = SoftwareSurface::default();
    let placed = surface.allocation_counter();
    let mut cache = RasterCache::default();
    render(&mut cache, "AB", &surface);

    cache.invalidate();
    cache.invalidate();
    assert!(cache.is_dirty());
    assert!(matches!(render(&mut cache, "ABC", &surface), RenderPass::Regenerated { .. }));
    assert_eq!(placed.get(), 2);
    assert_eq!(cache.state(), CacheState::Clean);
}

#[test]
fn refresh_reblits_without_regenerating() {
    let surface = SoftwareSurface::default();
    let placed = surface.allocation_counter();
    let mut cache = RasterCache::default();
    render(&mut cache, "AB", &surface);

    cache.request_refresh();
    assert_eq!(cache.state(), CacheState::Clean);
    assert_eq!(render(&mut cache, "AB", &surface), RenderPass::Refreshed);
    assert!(!cache.needs_refresh());
    assert_eq!(render(&mut cache, "AB", &surface), RenderPass::Reused);
    assert_eq!(placed.get(), 1);
}

#[test]
fn blank_text_keeps_untrimmed_raster() {
    let surface = SoftwareSurface::default();
    let mut cache = RasterCache::default();
    assert_eq!(render(&mut cache, "   ", &surface), RenderPass::Regenerated { trimmed: false });
    assert_eq!(cache.raster().map(|r| r.dimensions()), Some((250, 250)));
    assert_eq!(cache.state(), CacheState::Clean);
    assert!(cache.is_blank());

    cache.invalidate();
    assert!(cache.is_stale());
    render(&mut cache, "AB", &surface);
    assert!(!cache.is_blank());
    assert!(!cache.is_stale());
}

#[test]
fn trim_crops_to_opaque_bounds() {
    let mut raster = RgbaImage::new(20, 20);
    raster.put_pixel(3, 4, Rgba([0, 0, 0, 10]));
    raster.put_pixel(7, 9, Rgba([0, 0, 0, 255]));
    let trimmed = trim(&raster).unwrap();
    assert_eq!(trimmed.dimensions(), (5, 6));
    assert_eq!(trimmed.get_pixel(0, 0)[3], 10);
    assert_eq!(trimmed.get_pixel(4, 5)[3], 255);
}

#[test]
fn trim_of_blank_raster_fails() {
    let raster = RgbaImage::new(8, 8);
    assert!(matches!(trim(&raster), Err(ArcTextError::Trim(_))));
}
