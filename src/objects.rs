use std::io::Cursor;
use serde::{Serialize, Deserialize};
use image::{DynamicImage, ImageOutputFormat};
use base64::{Engine as _, engine::general_purpose};
use crate::cache::{CacheState, RasterCache, RenderPass};
use crate::config::CurveConfig;
use crate::curve::CurveParams;
use crate::placer::ArcLayout;
use crate::surface::{DrawingSurface, FontMetrics, PaintTarget};
use crate::types::{FontSpec, Shadow, StrokeSpec};

/// Ordinary straight-baseline text.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FlatText {
    pub text: String,
    pub font: FontSpec,
    pub fill: String,
    pub stroke: StrokeSpec,
    pub char_spacing: f64, // thousandths of an em
    pub shadow: Option<Shadow>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl FlatText {
    pub fn new(text: &str, x: f64, y: f64) -> Self {
        let font = FontSpec::default();
        FlatText {
            text: text.to_string(),
            width: (text.chars().count().max(1) as f64) * font.size * 0.6,
            height: font.size * 1.2,
            font,
            fill: "#000000".to_string(),
            stroke: StrokeSpec::default(),
            char_spacing: 0.0,
            shadow: None,
            x,
            y,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// Best-effort flat counterpart of a curved object.
    pub fn from_curved(curved: &CurvedText) -> Self {
        let mut flat = FlatText::new(&curved.text, curved.x, curved.y);
        flat.font = curved.font.clone();
        flat.fill = curved.fill.clone();
        flat.stroke = curved.stroke.clone();
        flat.shadow = curved.shadow.clone();
        flat.char_spacing = char_spacing_from_kerning(curved.kerning);
        flat.width = (curved.text.chars().count().max(1) as f64) * curved.font.size * 0.6;
        flat.height = curved.font.size * 1.2;
        flat
    }
}

/// Kerning seeded from a flat object's character spacing; never tighter than -1.
pub fn kerning_from_char_spacing(char_spacing: f64) -> f64 {
    ((char_spacing / 100.0) * 3.0).round().max(-1.0)
}

pub fn char_spacing_from_kerning(kerning: f64) -> f64 {
    kerning / 3.0 * 100.0
}

/// Text laid out along a circular arc and drawn from a cached raster.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CurvedText {
    text: String,
    diameter: f64,
    kerning: f64,
    flipped: bool,
    percentage: i32,
    fill: String,
    stroke: StrokeSpec,
    font: FontSpec,
    shadow: Option<Shadow>,
    pub x: f64,
    pub y: f64,
    pub(crate) scale_x: f64,
    pub(crate) scale_y: f64,
    pub(crate) width: f64,
    pub(crate) height: f64,
    #[serde(skip)]
    pub(crate) cache: RasterCache,
}

impl CurvedText {
    pub fn new(text: &str, font: FontSpec, curve: CurveParams, diameter: f64) -> Self {
        let diameter = diameter.max(1.0);
        CurvedText {
            text: text.to_string(),
            diameter,
            kerning: 0.0,
            flipped: curve.flipped,
            percentage: curve.percentage,
            fill: "#000000".to_string(),
            stroke: StrokeSpec::default(),
            font,
            shadow: None,
            x: 0.0,
            y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            width: diameter,
            height: diameter,
            cache: RasterCache::default(),
        }
    }

    /// Seeds a curved object from a flat one.
    pub fn from_flat(flat: &FlatText, curve: CurveParams, diameter: f64) -> Self {
        let mut curved = CurvedText::new(&flat.text, flat.font.clone(), curve, diameter);
        curved.fill = flat.fill.clone();
        curved.stroke = flat.stroke.clone();
        curved.shadow = flat.shadow.clone();
        curved.kerning = kerning_from_char_spacing(flat.char_spacing);
        curved.x = flat.x;
        curved.y = flat.y;
        curved
    }

    pub fn text(&self) -> &str { &self.text }
    pub fn diameter(&self) -> f64 { self.diameter }
    pub fn kerning(&self) -> f64 { self.kerning }
    pub fn flipped(&self) -> bool { self.flipped }
    pub fn percentage(&self) -> i32 { self.percentage }
    pub fn fill(&self) -> &str { &self.fill }
    pub fn stroke(&self) -> &StrokeSpec { &self.stroke }
    pub fn font(&self) -> &FontSpec { &self.font }
    pub fn shadow(&self) -> Option<&Shadow> { self.shadow.as_ref() }
    pub fn width(&self) -> f64 { self.width }
    pub fn height(&self) -> f64 { self.height }
    pub fn scale_x(&self) -> f64 { self.scale_x }
    pub fn scale_y(&self) -> f64 { self.scale_y }
    pub fn cache_state(&self) -> CacheState { self.cache.state() }
    pub fn needs_refresh(&self) -> bool { self.cache.needs_refresh() }
    pub fn needs_repaint(&self) -> bool { self.cache.is_dirty() || self.cache.needs_refresh() }
    pub fn cached_raster(&self) -> Option<&image::RgbaImage> { self.cache.raster() }

    pub fn curve(&self) -> CurveParams {
        CurveParams::from_percentage(self.percentage)
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.cache.invalidate();
    }

    pub fn set_diameter(&mut self, diameter: f64) {
        self.diameter = if diameter.is_finite() { diameter.max(1.0) } else { 1.0 };
        self.cache.invalidate();
    }

    pub fn set_kerning(&mut self, kerning: f64) {
        self.kerning = kerning;
        self.cache.invalidate();
    }

    /// Flipping mirrors the curvature sign so `flipped == (percentage < 0)` holds.
    pub fn set_flipped(&mut self, flipped: bool) {
        let magnitude = self.percentage.abs();
        self.percentage = if flipped { -magnitude } else { magnitude };
        self.flipped = self.percentage < 0;
        self.cache.invalidate();
    }

    /// Applies a new curvature in place (no structural swap).
    pub fn set_curve(&mut self, curve: CurveParams, diameter: f64) {
        self.percentage = curve.percentage;
        self.flipped = curve.flipped;
        self.set_diameter(diameter);
    }

    pub fn set_font(&mut self, font: FontSpec) {
        self.font = font;
        self.cache.invalidate();
    }

    pub fn set_font_family(&mut self, family: &str) {
        self.font.family = family.to_string();
        self.cache.invalidate();
    }

    pub fn set_font_size(&mut self, size: f64) {
        self.font.size = size;
        self.cache.invalidate();
    }

    pub fn set_font_weight(&mut self, weight: &str) {
        self.font.weight = weight.to_string();
        self.cache.invalidate();
    }

    pub fn set_font_style(&mut self, style: &str) {
        self.font.style = style.to_string();
        self.cache.invalidate();
    }

    pub fn set_fill(&mut self, fill: &str) {
        self.fill = fill.to_string();
        self.cache.invalidate();
    }

    pub fn set_stroke(&mut self, stroke: StrokeSpec) {
        self.stroke = stroke;
        self.cache.invalidate();
    }

    pub fn set_stroke_color(&mut self, color: &str) {
        self.stroke.color = color.to_string();
        self.cache.invalidate();
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.stroke.width = width.max(0.0);
        self.cache.invalidate();
    }

    /// Shadows are applied at blit time, so the raster stays valid.
    pub fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.shadow = shadow;
        self.cache.request_refresh();
    }

    /// Brings the cached raster up to date and paints it onto `target`.
    pub fn render(&mut self, target: &mut dyn PaintTarget, surface: &dyn DrawingSurface, metrics: &dyn FontMetrics, config: &CurveConfig) -> RenderPass {
        let pass = self.update_raster(surface, metrics, config);
        if self.cache.is_blank() {
            return pass;
        }
        if let Some(raster) = self.cache.raster() {
            target.blit(raster, self.x, self.y, self.width * self.scale_x, self.height * self.scale_y, self.shadow.as_ref());
        }
        pass
    }

    /// Regenerates a stale raster without painting it; the next frame still re-blits.
    pub fn ensure_raster(&mut self, surface: &dyn DrawingSurface, metrics: &dyn FontMetrics, config: &CurveConfig) {
        if self.cache.is_stale() {
            self.update_raster(surface, metrics, config);
            self.cache.request_refresh();
        }
    }

    fn update_raster(&mut self, surface: &dyn DrawingSurface, metrics: &dyn FontMetrics, config: &CurveConfig) -> RenderPass {
        let layout = ArcLayout {
            text: &self.text,
            diameter: self.diameter,
            kerning: self.kerning,
            flipped: self.flipped,
            font: &self.font,
            fill: &self.fill,
            stroke: Some(&self.stroke),
        };
        let pass = self.cache.render(&layout, surface, metrics, config);
        if let (RenderPass::Regenerated { trimmed: true }, Some(raster)) = (pass, self.cache.raster()) {
            self.width = raster.width() as f64;
            self.height = raster.height() as f64;
        }
        pass
    }
}

/// The two representations one logical text object can take.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "kind")]
pub enum TextShape {
    Flat(FlatText),
    Curved(CurvedText),
}

/// A text object in the document. `id` and `name` survive Flat/Curved swaps.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct TextObject {
    pub id: u32,
    pub name: String,
    pub visible: bool,
    pub shape: TextShape,
}

impl TextObject {
    pub fn is_curved(&self) -> bool {
        matches!(self.shape, TextShape::Curved(_))
    }

    pub fn as_curved(&self) -> Option<&CurvedText> {
        match &self.shape { TextShape::Curved(c) => Some(c), TextShape::Flat(_) => None }
    }

    pub fn as_curved_mut(&mut self) -> Option<&mut CurvedText> {
        match &mut self.shape { TextShape::Curved(c) => Some(c), TextShape::Flat(_) => None }
    }

    pub fn as_flat(&self) -> Option<&FlatText> {
        match &self.shape { TextShape::Flat(f) => Some(f), TextShape::Curved(_) => None }
    }

    pub fn as_flat_mut(&mut self) -> Option<&mut FlatText> {
        match &mut self.shape { TextShape::Flat(f) => Some(f), TextShape::Curved(_) => None }
    }

    /// Current curvature; flat objects are at percentage 0.
    pub fn curve(&self) -> CurveParams {
        match &self.shape {
            TextShape::Flat(_) => CurveParams::flat(),
            TextShape::Curved(c) => c.curve(),
        }
    }

    pub fn font_size(&self) -> f64 {
        match &self.shape {
            TextShape::Flat(f) => f.font.size,
            TextShape::Curved(c) => c.font.size,
        }
    }

    pub fn into_curved(self, curve: CurveParams, diameter: f64) -> TextObject {
        let shape = match self.shape {
            TextShape::Flat(flat) => TextShape::Curved(CurvedText::from_flat(&flat, curve, diameter)),
            TextShape::Curved(mut curved) => {
                curved.set_curve(curve, diameter);
                TextShape::Curved(curved)
            }
        };
        TextObject { shape, ..self }
    }

    pub fn into_flat(self) -> TextObject {
        let shape = match self.shape {
            TextShape::Curved(curved) => TextShape::Flat(FlatText::from_curved(&curved)),
            flat => flat,
        };
        TextObject { shape, ..self }
    }

    /// SVG for this object. Curved objects export their cached raster, so callers
    /// bring the cache up to date first (see `TextEngine::export_svg`).
    pub fn to_svg_element(&self) -> String {
        if !self.visible { return String::new(); }
        match &self.shape {
            TextShape::Flat(f) => {
                let stroke = if f.stroke.is_visible() {
                    format!(r##" stroke="{}" stroke-width="{}""##, escape_xml(&f.stroke.color), f.stroke.width)
                } else { String::new() };
                format!(r##"<text x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{}" font-style="{}" fill="{}"{} letter-spacing="{}em" transform="scale({} {})">{}</text>"##,
                    f.x, f.y + f.font.size, escape_xml(&f.font.family), f.font.size, escape_xml(&f.font.weight), escape_xml(&f.font.style), escape_xml(&f.fill), stroke,
                    f.char_spacing / 1000.0, f.scale_x, f.scale_y, escape_xml(&f.text))
            }
            TextShape::Curved(c) => {
                let w = c.width * c.scale_x;
                let h = c.height * c.scale_y;
                // A stale or blank raster is never exported.
                let fresh = !c.cache.is_stale() && !c.cache.is_blank();
                match c.cache.raster().filter(|_| fresh).and_then(encode_png) {
                    Some(b64) => format!(r##"<image x="{}" y="{}" width="{}" height="{}" href="data:image/png;base64,{}" />"##,
                        c.x, c.y, w, h, b64),
                    None => format!(r##"<rect x="{}" y="{}" width="{}" height="{}" fill="none" />"##, c.x, c.y, w, h),
                }
            }
        }
    }
}

fn encode_png(raster: &image::RgbaImage) -> Option<String> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(raster.clone())
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .ok()?;
    Some(general_purpose::STANDARD.encode(bytes))
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
#[path = "../tests/unit/objects.rs"]
mod tests;
