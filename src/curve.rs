use serde::{Serialize, Deserialize};
use wasm_bindgen::prelude::*;
use crate::config::CurveConfig;

pub const SLIDER_CENTER: f64 = 2500.0;
pub const SLIDER_STEP: f64 = 25.0;
pub const MAX_PERCENTAGE: i32 = 90;

/// Slider position (0..=5000, centred at 2500) to signed curvature percentage,
/// clamped to [-90, 90].
#[wasm_bindgen(js_name = percentageFromSlider)]
pub fn percentage_from_slider(value: f64) -> i32 {
    let raw = if value >= SLIDER_CENTER {
        ((value - SLIDER_CENTER) / SLIDER_STEP).round()
    } else {
        -((SLIDER_CENTER - value) / SLIDER_STEP).round()
    };
    if !raw.is_finite() { return 0; }
    // `as` saturates, and -0.0 becomes 0
    (raw as i32).clamp(-MAX_PERCENTAGE, MAX_PERCENTAGE)
}

#[wasm_bindgen(js_name = sliderFromPercentage)]
pub fn slider_from_percentage(percentage: i32) -> f64 {
    if percentage >= 0 {
        SLIDER_CENTER + percentage as f64 * SLIDER_STEP
    } else {
        SLIDER_CENTER - percentage.unsigned_abs() as f64 * SLIDER_STEP
    }
}

#[wasm_bindgen(js_name = angleFromPercentage)]
pub fn angle_from_percentage(percentage: i32) -> i32 {
    (percentage as f64 * 3.6).round() as i32
}

/// The three user-facing views of one curvature value, always mutually consistent.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct CurveParams {
    pub slider: f64,
    pub percentage: i32,
    pub angle: i32,
    pub flipped: bool,
}

impl CurveParams {
    pub fn from_percentage(percentage: i32) -> Self {
        let percentage = percentage.clamp(-MAX_PERCENTAGE, MAX_PERCENTAGE);
        CurveParams {
            slider: slider_from_percentage(percentage),
            percentage,
            angle: angle_from_percentage(percentage),
            flipped: percentage < 0,
        }
    }

    /// The slider is re-derived from the clamped percentage, so an out-of-range
    /// input never leaves the slider ahead of the curvature.
    pub fn from_slider(value: f64) -> Self {
        Self::from_percentage(percentage_from_slider(value))
    }

    pub fn flat() -> Self {
        Self::from_percentage(0)
    }

    pub fn is_flat(&self) -> bool {
        self.percentage == 0
    }
}

/// Circle diameter for a curvature, scaled to the font size.
///
/// Strictly decreasing in |percentage|: `flat_diameter` at 0, `tight_diameter` at 90
/// (both at the reference font size).
pub fn diameter_for(percentage: i32, font_size: f64, config: &CurveConfig) -> f64 {
    let t = percentage.unsigned_abs().min(MAX_PERCENTAGE as u32) as f64 / MAX_PERCENTAGE as f64;
    let ease = (1.0 - t) * (1.0 - t);
    let base = config.tight_diameter + (config.flat_diameter - config.tight_diameter) * ease;
    let scale = if font_size > 0.0 { font_size / config.reference_font_size } else { 1.0 };
    (base * scale).max(1.0)
}

#[cfg(test)]
#[path = "../tests/unit/curve.rs"]
mod tests;
