use serde::{Serialize, Deserialize};
use crate::error::{ArcTextError, ArcTextResult};

/// Tunable constants relating curvature to circle size.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
#[serde(default)]
pub struct CurveConfig {
    /// Diameter used at percentage 0 (the flattest visible arc).
    pub flat_diameter: f64,
    /// Diameter used at |percentage| == 90, just before glyphs start to collide.
    pub tight_diameter: f64,
    /// Font size the two diameters above are calibrated for.
    pub reference_font_size: f64,
    /// Stand-in for empty text so the layout never divides by a zero count.
    pub placeholder: String,
    /// Largest raster side the placer will allocate.
    pub max_raster_side: u32,
}

impl Default for CurveConfig {
    fn default() -> Self {
        CurveConfig {
            flat_diameter: 1500.0,
            tight_diameter: 150.0,
            reference_font_size: 40.0,
            placeholder: "  ".to_string(),
            max_raster_side: 4096,
        }
    }
}

impl CurveConfig {
    pub fn from_json(json: &serde_json::Value) -> ArcTextResult<Self> {
        let config: CurveConfig = serde_json::from_value(json.clone())?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ArcTextResult<()> {
        if !(self.tight_diameter > 0.0) || !(self.flat_diameter > 0.0) {
            return Err(ArcTextError::serde("diameters must be positive"));
        }
        if self.tight_diameter > self.flat_diameter {
            return Err(ArcTextError::serde("tight_diameter must not exceed flat_diameter"));
        }
        if !(self.reference_font_size > 0.0) {
            return Err(ArcTextError::serde("reference_font_size must be positive"));
        }
        if self.placeholder.chars().count() < 2 {
            return Err(ArcTextError::serde("placeholder needs at least two characters"));
        }
        if self.max_raster_side == 0 {
            return Err(ArcTextError::serde("max_raster_side must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
