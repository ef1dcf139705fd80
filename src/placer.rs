use image::RgbaImage;
use tracing::warn;
use crate::config::CurveConfig;
use crate::error::{ArcTextError, ArcTextResult};
use crate::surface::{DrawingSurface, FontMetrics};
use crate::types::{FontSpec, StrokeSpec};

/// Glyphs advance counter-clockwise; the pre-scan runs the other way to centre the run.
const ROTATION_DIRECTION: f64 = -1.0;

/// Everything that shapes the generated raster.
#[derive(Clone, Debug)]
pub struct ArcLayout<'a> {
    pub text: &'a str,
    pub diameter: f64,
    pub kerning: f64,
    pub flipped: bool,
    pub font: &'a FontSpec,
    pub fill: &'a str,
    pub stroke: Option<&'a StrokeSpec>,
}

/// Lays `layout.text` out along a circle and rasterises it into a
/// `diameter x diameter` image.
///
/// Never fails: a layout the metrics can't handle produces a 1x1 blank raster.
#[tracing::instrument(skip_all, fields(diameter = layout.diameter, flipped = layout.flipped))]
pub fn place(layout: &ArcLayout<'_>, surface: &dyn DrawingSurface, metrics: &dyn FontMetrics, config: &CurveConfig) -> RgbaImage {
    match place_glyphs(layout, surface, metrics, config) {
        Ok(raster) => raster,
        Err(e) => {
            warn!("arc layout failed, using blank raster: {}", e);
            RgbaImage::new(1, 1)
        }
    }
}

/// Text actually laid out. Fewer than two characters would leave the centring
/// pre-scan with nothing to balance, so short strings are padded.
pub(crate) fn layout_text(text: &str, placeholder: &str) -> String {
    match text.chars().count() {
        0 => {
            warn!("empty curved text, substituting placeholder");
            placeholder.to_string()
        }
        1 => format!(" {} ", text),
        _ => text.to_string(),
    }
}

fn place_glyphs(layout: &ArcLayout<'_>, surface: &dyn DrawingSurface, metrics: &dyn FontMetrics, config: &CurveConfig) -> ArcTextResult<RgbaImage> {
    if !(layout.diameter > 0.0) {
        return Err(ArcTextError::layout(format!("diameter must be positive, got {}", layout.diameter)));
    }
    let text = layout_text(layout.text, &config.placeholder);
    let text_height = metrics.line_height(layout.font, &text)?;

    let side = layout.diameter.round().clamp(1.0, config.max_raster_side as f64) as u32;
    let diameter = side as f64;

    let mut chars: Vec<char> = text.chars().collect();
    let mut start_angle = 0.0_f64;
    if layout.flipped {
        start_angle += 180.0_f64.to_radians();
    } else {
        chars.reverse();
    }

    // Glyphs sit on the inner edge of a band one line high.
    let radius = (diameter / 2.0 - text_height).max(1.0);

    let widths = chars
        .iter()
        .map(|&ch| metrics.advance(layout.font, ch))
        .collect::<ArcTextResult<Vec<f64>>>()?;

    // Kerning only opens the gaps between glyphs, for either facing.
    let last = widths.len().saturating_sub(1);
    let gap = |j: usize| if j == last { 0.0 } else { layout.kerning };

    for (j, w) in widths.iter().enumerate() {
        start_angle += (w + gap(j)) / radius / 2.0 * -ROTATION_DIRECTION;
    }

    let mut canvas = surface.allocate(side, side)?;
    canvas.set_font(layout.font);
    canvas.translate(diameter / 2.0, diameter / 2.0);
    canvas.rotate(start_angle);

    // Outward glyphs sit on the far side of the half-turned frame, feet away from the centre.
    let offset = if layout.flipped { radius } else { -radius };
    let stroke = layout.stroke.filter(|s| s.is_visible());
    for (j, (&ch, w)) in chars.iter().zip(&widths).enumerate() {
        canvas.rotate(w / 2.0 / radius * ROTATION_DIRECTION);
        if let Some(s) = stroke {
            canvas.stroke_glyph(ch, 0.0, offset, s);
        }
        canvas.fill_glyph(ch, 0.0, offset, layout.fill);
        canvas.rotate((w / 2.0 + gap(j)) / radius * ROTATION_DIRECTION);
    }

    canvas.finish()
}

#[cfg(test)]
#[path = "../tests/unit/placer.rs"]
mod tests;
