//! Headless backend: rasterises glyph boxes into `image` buffers.
//!
//! There is no font rasteriser here; every visible character becomes a filled (or
//! outlined) box of its advance width, which is enough for layout, trimming and
//! compositing to behave exactly as they do in the browser.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use image::{imageops, Rgba, RgbaImage};
use kurbo::{Affine, Point};
use crate::error::{ArcTextError, ArcTextResult};
use crate::objects::FlatText;
use crate::surface::{CurveEvent, CurveEventSink, DrawingSurface, FontMetrics, GlyphCanvas, PaintTarget};
use crate::types::{parse_color, FontSpec, Shadow, StrokeSpec};

/// Fixed-pitch metrics: every character advances `advance_ratio * size`.
#[derive(Clone, Copy, Debug)]
pub struct MonospaceMetrics {
    pub advance_ratio: f64,
    pub line_height_ratio: f64,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        MonospaceMetrics { advance_ratio: 0.6, line_height_ratio: 1.2 }
    }
}

fn check_size(font: &FontSpec) -> ArcTextResult<()> {
    if font.size.is_finite() && font.size > 0.0 { Ok(()) }
    else { Err(ArcTextError::layout(format!("unmeasurable font size {}", font.size))) }
}

impl FontMetrics for MonospaceMetrics {
    fn line_height(&self, font: &FontSpec, _text: &str) -> ArcTextResult<f64> {
        check_size(font)?;
        Ok(font.size * self.line_height_ratio)
    }

    fn advance(&self, font: &FontSpec, _ch: char) -> ArcTextResult<f64> {
        check_size(font)?;
        Ok(font.size * self.advance_ratio)
    }
}

pub struct SoftwareSurface {
    metrics: MonospaceMetrics,
    allocations: Rc<Cell<usize>>,
}

impl SoftwareSurface {
    pub fn new(metrics: MonospaceMetrics) -> Self {
        SoftwareSurface { metrics, allocations: Rc::new(Cell::new(0)) }
    }

    /// Shared counter of rasters handed out so far.
    pub fn allocation_counter(&self) -> Rc<Cell<usize>> {
        self.allocations.clone()
    }
}

impl Default for SoftwareSurface {
    fn default() -> Self {
        Self::new(MonospaceMetrics::default())
    }
}

impl DrawingSurface for SoftwareSurface {
    fn allocate(&self, width: u32, height: u32) -> ArcTextResult<Box<dyn GlyphCanvas>> {
        if width == 0 || height == 0 {
            return Err(ArcTextError::surface(format!("cannot allocate {}x{} raster", width, height)));
        }
        self.allocations.set(self.allocations.get() + 1);
        Ok(Box::new(SoftwareCanvas {
            image: RgbaImage::new(width, height),
            transform: Affine::IDENTITY,
            font: FontSpec::default(),
            metrics: self.metrics,
        }))
    }
}

pub struct SoftwareCanvas {
    image: RgbaImage,
    transform: Affine,
    font: FontSpec,
    metrics: MonospaceMetrics,
}

impl SoftwareCanvas {
    fn glyph_extents(&self) -> (f64, f64) {
        (self.font.size * self.metrics.advance_ratio * 0.4, self.font.size * 0.35)
    }
}

impl GlyphCanvas for SoftwareCanvas {
    fn translate(&mut self, x: f64, y: f64) {
        self.transform = self.transform * Affine::translate((x, y));
    }

    fn rotate(&mut self, radians: f64) {
        self.transform = self.transform * Affine::rotate(radians);
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.font = font.clone();
    }

    fn stroke_glyph(&mut self, ch: char, x: f64, y: f64, stroke: &StrokeSpec) {
        if ch.is_whitespace() || !stroke.is_visible() { return; }
        let (hw, hh) = self.glyph_extents();
        let half = stroke.width / 2.0;
        let inner = if hw > half && hh > half { Some((hw - half, hh - half)) } else { None };
        paint_box(&mut self.image, self.transform, Point::new(x, y), (hw + half, hh + half), inner, parse_color(&stroke.color));
    }

    fn fill_glyph(&mut self, ch: char, x: f64, y: f64, fill: &str) {
        if ch.is_whitespace() { return; }
        let extents = self.glyph_extents();
        paint_box(&mut self.image, self.transform, Point::new(x, y), extents, None, parse_color(fill));
    }

    fn finish(self: Box<Self>) -> ArcTextResult<RgbaImage> {
        Ok(self.image)
    }
}

/// Paints the box of half extents `outer` centred on `center` (local space) through
/// `transform`, leaving out `inner` when given so the box becomes an outline.
fn paint_box(image: &mut RgbaImage, transform: Affine, center: Point, outer: (f64, f64), inner: Option<(f64, f64)>, color: Rgba<u8>) {
    if color[3] == 0 { return; }
    let (hw, hh) = outer;
    let corners = [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)]
        .map(|(dx, dy)| transform * Point::new(center.x + dx, center.y + dy));
    let min_x = corners.iter().map(|p| p.x).fold(f64::INFINITY, f64::min).floor().max(0.0);
    let min_y = corners.iter().map(|p| p.y).fold(f64::INFINITY, f64::min).floor().max(0.0);
    let max_x = corners.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max).ceil().min(image.width() as f64);
    let max_y = corners.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max).ceil().min(image.height() as f64);
    if min_x >= max_x || min_y >= max_y { return; }

    let inverse = transform.inverse();
    for py in min_y as u32..max_y as u32 {
        for px in min_x as u32..max_x as u32 {
            let local = inverse * Point::new(px as f64 + 0.5, py as f64 + 0.5);
            let dx = (local.x - center.x).abs();
            let dy = (local.y - center.y).abs();
            if dx > hw || dy > hh { continue; }
            if let Some((iw, ih)) = inner {
                if dx < iw && dy < ih { continue; }
            }
            blend(image.get_pixel_mut(px, py), color);
        }
    }
}

/// Source-over compositing of straight-alpha colours.
fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let sa = src[3] as f64 / 255.0;
    if sa <= 0.0 { return; }
    let da = dst[3] as f64 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    for i in 0..3 {
        let c = (src[i] as f64 * sa + dst[i] as f64 * da * (1.0 - sa)) / out_a;
        dst[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round() as u8;
}

/// A raster page that render passes composite onto.
pub struct RasterTarget {
    pub image: RgbaImage,
    pub blits: usize,
    metrics: MonospaceMetrics,
}

impl RasterTarget {
    pub fn new(width: u32, height: u32) -> Self {
        RasterTarget { image: RgbaImage::new(width, height), blits: 0, metrics: MonospaceMetrics::default() }
    }

    fn composite(&mut self, raster: &RgbaImage, x: i64, y: i64, tint: Option<Rgba<u8>>) {
        for (sx, sy, px) in raster.enumerate_pixels() {
            let tx = x + sx as i64;
            let ty = y + sy as i64;
            if tx < 0 || ty < 0 || tx >= self.image.width() as i64 || ty >= self.image.height() as i64 { continue; }
            let src = match tint {
                Some(c) => Rgba([c[0], c[1], c[2], ((px[3] as u32 * c[3] as u32) / 255) as u8]),
                None => *px,
            };
            blend(self.image.get_pixel_mut(tx as u32, ty as u32), src);
        }
    }
}

impl PaintTarget for RasterTarget {
    fn blit(&mut self, raster: &RgbaImage, x: f64, y: f64, width: f64, height: f64, shadow: Option<&Shadow>) {
        self.blits += 1;
        let w = width.round().max(1.0) as u32;
        let h = height.round().max(1.0) as u32;
        let scaled;
        let source = if (w, h) == raster.dimensions() {
            raster
        } else {
            scaled = imageops::resize(raster, w, h, imageops::FilterType::Triangle);
            &scaled
        };
        if let Some(s) = shadow {
            // no blur; the offset silhouette is enough for a headless preview
            let tint = parse_color(&s.color);
            self.composite(source, (x + s.offset_x).round() as i64, (y + s.offset_y).round() as i64, Some(tint));
        }
        self.composite(source, x.round() as i64, y.round() as i64, None);
    }

    fn draw_flat_text(&mut self, text: &FlatText) {
        let advance = text.font.size * self.metrics.advance_ratio + text.char_spacing / 1000.0 * text.font.size;
        let extents = (text.font.size * self.metrics.advance_ratio * 0.4, text.font.size * 0.35);
        let transform = Affine::translate((text.x, text.y)) * Affine::scale_non_uniform(text.scale_x, text.scale_y);
        let fill = parse_color(&text.fill);
        let stroke = parse_color(&text.stroke.color);
        for (i, ch) in text.text.chars().enumerate() {
            if ch.is_whitespace() { continue; }
            let center = Point::new(advance * (i as f64 + 0.5), text.font.size * 0.6);
            if text.stroke.is_visible() {
                let half = text.stroke.width / 2.0;
                paint_box(&mut self.image, transform, center, (extents.0 + half, extents.1 + half), Some((extents.0 - half, extents.1 - half)), stroke);
            }
            paint_box(&mut self.image, transform, center, extents, None, fill);
        }
    }
}

/// Keeps every broadcast curvature change; clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingSink {
    events: Rc<RefCell<Vec<CurveEvent>>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<CurveEvent> {
        self.events.borrow().clone()
    }
}

impl CurveEventSink for RecordingSink {
    fn curvature_changed(&mut self, event: CurveEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[cfg(test)]
#[path = "../tests/unit/software.rs"]
mod tests;
