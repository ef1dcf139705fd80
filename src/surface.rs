//! Ports between the curved-text core and whatever actually draws pixels.
//!
//! The browser backend lives in [`crate::web`], the headless one in [`crate::software`].

use image::RgbaImage;
use serde::{Serialize, Deserialize};
use crate::error::ArcTextResult;
use crate::objects::FlatText;
use crate::types::{FontSpec, Shadow, StrokeSpec};

/// Font measurement capability.
pub trait FontMetrics {
    /// Rendered line height of `text` set in `font`.
    fn line_height(&self, font: &FontSpec, text: &str) -> ArcTextResult<f64>;
    /// Horizontal advance of a single character.
    fn advance(&self, font: &FontSpec, ch: char) -> ArcTextResult<f64>;
}

/// A 2D drawing context over an off-screen raster.
///
/// Glyphs are positioned by their centre (centre alignment, middle baseline).
pub trait GlyphCanvas {
    fn translate(&mut self, x: f64, y: f64);
    fn rotate(&mut self, radians: f64);
    fn set_font(&mut self, font: &FontSpec);
    fn stroke_glyph(&mut self, ch: char, x: f64, y: f64, stroke: &StrokeSpec);
    fn fill_glyph(&mut self, ch: char, x: f64, y: f64, fill: &str);
    /// Reads the pixels back.
    fn finish(self: Box<Self>) -> ArcTextResult<RgbaImage>;
}

/// Allocates off-screen rasters.
pub trait DrawingSurface {
    fn allocate(&self, width: u32, height: u32) -> ArcTextResult<Box<dyn GlyphCanvas>>;
}

/// The on-screen (or export) surface a render pass paints onto.
pub trait PaintTarget {
    /// Draws `raster` scaled into the rectangle at (x, y) of the given size.
    fn blit(&mut self, raster: &RgbaImage, x: f64, y: f64, width: f64, height: f64, shadow: Option<&Shadow>);
    fn draw_flat_text(&mut self, text: &FlatText);
}

/// Broadcast whenever an object's curvature changes.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct CurveEvent {
    pub id: u32,
    pub percentage: i32,
    pub angle: i32,
}

pub trait CurveEventSink {
    fn curvature_changed(&mut self, event: CurveEvent);
}

/// Sink for hosts that don't listen.
pub struct NullSink;

impl CurveEventSink for NullSink {
    fn curvature_changed(&mut self, _event: CurveEvent) {}
}
