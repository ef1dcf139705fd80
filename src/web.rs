//! Browser backend: canvas 2D contexts for drawing and measuring, and a JavaScript
//! callback for curvature broadcasts.

use image::RgbaImage;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};
use crate::engine::TextEngine;
use crate::error::{ArcTextError, ArcTextResult};
use crate::objects::FlatText;
use crate::surface::{CurveEvent, CurveEventSink, DrawingSurface, FontMetrics, GlyphCanvas, PaintTarget};
use crate::types::{FontSpec, Shadow, StrokeSpec};

fn js_err(e: JsValue) -> ArcTextError {
    ArcTextError::surface(format!("{:?}", e))
}

fn scratch_canvas(width: u32, height: u32) -> ArcTextResult<(HtmlCanvasElement, CanvasRenderingContext2d)> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ArcTextError::surface("no document available"))?;
    let canvas = document
        .create_element("canvas")
        .map_err(js_err)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| ArcTextError::surface("element is not a canvas"))?;
    canvas.set_width(width);
    canvas.set_height(height);
    let ctx = canvas
        .get_context("2d")
        .map_err(js_err)?
        .ok_or_else(|| ArcTextError::surface("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| ArcTextError::surface("not a 2d context"))?;
    Ok((canvas, ctx))
}

fn apply_shadow(ctx: &CanvasRenderingContext2d, shadow: Option<&Shadow>) {
    if let Some(s) = shadow {
        ctx.set_shadow_color(&s.color);
        ctx.set_shadow_blur(s.blur);
        ctx.set_shadow_offset_x(s.offset_x);
        ctx.set_shadow_offset_y(s.offset_y);
    }
}

/// Allocates detached `<canvas>` elements.
pub struct CanvasSurface;

impl DrawingSurface for CanvasSurface {
    fn allocate(&self, width: u32, height: u32) -> ArcTextResult<Box<dyn GlyphCanvas>> {
        let (_canvas, ctx) = scratch_canvas(width, height)?;
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        Ok(Box::new(CanvasGlyphs { ctx, width, height }))
    }
}

pub struct CanvasGlyphs {
    ctx: CanvasRenderingContext2d,
    width: u32,
    height: u32,
}

impl GlyphCanvas for CanvasGlyphs {
    fn translate(&mut self, x: f64, y: f64) {
        let _ = self.ctx.translate(x, y);
    }

    fn rotate(&mut self, radians: f64) {
        let _ = self.ctx.rotate(radians);
    }

    fn set_font(&mut self, font: &FontSpec) {
        self.ctx.set_font(&font.to_css());
    }

    fn stroke_glyph(&mut self, ch: char, x: f64, y: f64, stroke: &StrokeSpec) {
        self.ctx.set_stroke_style(&JsValue::from_str(&stroke.color));
        self.ctx.set_line_width(stroke.width);
        let _ = self.ctx.stroke_text(&ch.to_string(), x, y);
    }

    fn fill_glyph(&mut self, ch: char, x: f64, y: f64, fill: &str) {
        self.ctx.set_fill_style(&JsValue::from_str(fill));
        let _ = self.ctx.fill_text(&ch.to_string(), x, y);
    }

    fn finish(self: Box<Self>) -> ArcTextResult<RgbaImage> {
        let data = self
            .ctx
            .get_image_data(0.0, 0.0, self.width as f64, self.height as f64)
            .map_err(js_err)?;
        RgbaImage::from_raw(self.width, self.height, data.data().0)
            .ok_or_else(|| ArcTextError::surface("pixel buffer size mismatch"))
    }
}

/// Measures through a hidden canvas context.
pub struct CanvasMetrics {
    ctx: Option<CanvasRenderingContext2d>,
}

impl CanvasMetrics {
    pub fn new() -> Self {
        let ctx = match scratch_canvas(1, 1) {
            Ok((_, ctx)) => Some(ctx),
            Err(e) => {
                warn!("no measurement canvas: {}", e);
                None
            }
        };
        CanvasMetrics { ctx }
    }

    fn measure(&self, font: &FontSpec, text: &str) -> ArcTextResult<web_sys::TextMetrics> {
        let ctx = self.ctx.as_ref().ok_or_else(|| ArcTextError::layout("no measurement canvas"))?;
        ctx.set_font(&font.to_css());
        ctx.measure_text(text).map_err(|e| ArcTextError::layout(format!("{:?}", e)))
    }
}

impl Default for CanvasMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl FontMetrics for CanvasMetrics {
    fn line_height(&self, font: &FontSpec, text: &str) -> ArcTextResult<f64> {
        let m = self.measure(font, text)?;
        let height = m.font_bounding_box_ascent() + m.font_bounding_box_descent();
        if height.is_finite() && height > 0.0 { Ok(height) } else { Ok(font.size * 1.2) }
    }

    fn advance(&self, font: &FontSpec, ch: char) -> ArcTextResult<f64> {
        let width = self.measure(font, &ch.to_string())?.width();
        if width.is_finite() { Ok(width) } else { Err(ArcTextError::layout(format!("no advance for {:?}", ch))) }
    }
}

/// Paints onto the editor's visible canvas.
pub struct ContextTarget<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> ContextTarget<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        ContextTarget { ctx }
    }
}

impl PaintTarget for ContextTarget<'_> {
    fn blit(&mut self, raster: &RgbaImage, x: f64, y: f64, width: f64, height: f64, shadow: Option<&Shadow>) {
        let staged = scratch_canvas(raster.width(), raster.height()).and_then(|(canvas, scratch)| {
            let data = ImageData::new_with_u8_clamped_array_and_sh(Clamped(raster.as_raw().as_slice()), raster.width(), raster.height())
                .map_err(js_err)?;
            scratch.put_image_data(&data, 0.0, 0.0).map_err(js_err)?;
            Ok(canvas)
        });
        let canvas = match staged {
            Ok(c) => c,
            Err(e) => {
                warn!("skipping blit: {}", e);
                return;
            }
        };
        self.ctx.save();
        apply_shadow(self.ctx, shadow);
        let _ = self.ctx.draw_image_with_html_canvas_element_and_dw_and_dh(&canvas, x, y, width, height);
        self.ctx.restore();
    }

    fn draw_flat_text(&mut self, text: &FlatText) {
        let ctx = self.ctx;
        ctx.save();
        let _ = ctx.translate(text.x, text.y);
        let _ = ctx.scale(text.scale_x, text.scale_y);
        apply_shadow(ctx, text.shadow.as_ref());
        ctx.set_font(&text.font.to_css());
        ctx.set_text_align("left");
        ctx.set_text_baseline("alphabetic");
        ctx.set_fill_style(&JsValue::from_str(&text.fill));
        let _ = ctx.fill_text(&text.text, 0.0, text.font.size);
        if text.stroke.is_visible() {
            ctx.set_stroke_style(&JsValue::from_str(&text.stroke.color));
            ctx.set_line_width(text.stroke.width);
            let _ = ctx.stroke_text(&text.text, 0.0, text.font.size);
        }
        ctx.restore();
    }
}

/// Forwards curvature changes to a JavaScript function as `{id, percentage, angle}`.
pub struct JsCallbackSink {
    callback: js_sys::Function,
}

impl CurveEventSink for JsCallbackSink {
    fn curvature_changed(&mut self, event: CurveEvent) {
        let payload = match serde_wasm_bindgen::to_value(&event) {
            Ok(v) => v,
            Err(e) => {
                warn!("curve event not serializable: {}", e);
                return;
            }
        };
        if let Err(e) = self.callback.call1(&JsValue::NULL, &payload) {
            warn!("curve listener threw: {:?}", e);
        }
    }
}

#[wasm_bindgen]
impl TextEngine {
    pub fn set_curve_listener(&mut self, callback: js_sys::Function) {
        self.set_event_sink(Box::new(JsCallbackSink { callback }));
    }
}
