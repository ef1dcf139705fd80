use serde::{Serialize, Deserialize};
use image::Rgba;

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct FontSpec {
    pub family: String,
    pub size: f64,
    pub weight: String, // "normal", "bold", "600", ...
    pub style: String,  // "normal" or "italic"
}

impl Default for FontSpec {
    fn default() -> Self {
        FontSpec {
            family: "Inter, sans-serif".to_string(),
            size: 40.0,
            weight: "normal".to_string(),
            style: "normal".to_string(),
        }
    }
}

impl FontSpec {
    /// CSS font shorthand, e.g. `italic bold 40px Inter, sans-serif`.
    pub fn to_css(&self) -> String {
        format!("{} {} {}px {}", self.style, self.weight, self.size, self.family)
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct StrokeSpec {
    pub color: String,
    pub width: f64,
}

impl Default for StrokeSpec {
    fn default() -> Self {
        StrokeSpec { color: "#000000".to_string(), width: 0.0 }
    }
}

impl StrokeSpec {
    pub fn is_visible(&self) -> bool {
        self.width > 0.0 && !self.color.is_empty() && self.color != "transparent"
    }
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Shadow {
    pub color: String,
    pub blur: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// Parses the colour strings the editor hands around into straight RGBA.
/// Unknown strings resolve to opaque black, matching what a canvas does with them.
pub fn parse_color(value: &str) -> Rgba<u8> {
    let v = value.trim().to_ascii_lowercase();
    if let Some(hex) = v.strip_prefix('#') {
        if !hex.is_ascii() { return Rgba([0, 0, 0, 255]); }
        let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).unwrap_or(0);
        let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        return match hex.len() {
            3 => Rgba([digit(0) * 17, digit(1) * 17, digit(2) * 17, 255]),
            4 => Rgba([digit(0) * 17, digit(1) * 17, digit(2) * 17, digit(3) * 17]),
            6 => Rgba([pair(0), pair(2), pair(4), 255]),
            8 => Rgba([pair(0), pair(2), pair(4), pair(6)]),
            _ => Rgba([0, 0, 0, 255]),
        };
    }
    if let Some(inner) = v.strip_prefix("rgba(").or_else(|| v.strip_prefix("rgb(")) {
        let parts: Vec<f64> = inner
            .trim_end_matches(')')
            .split(',')
            .filter_map(|p| p.trim().parse::<f64>().ok())
            .collect();
        if parts.len() >= 3 {
            let alpha = parts.get(3).cloned().unwrap_or(1.0);
            let c = |x: f64| x.clamp(0.0, 255.0).round() as u8;
            return Rgba([c(parts[0]), c(parts[1]), c(parts[2]), c(alpha * 255.0)]);
        }
        return Rgba([0, 0, 0, 255]);
    }
    match v.as_str() {
        "transparent" | "none" | "" => Rgba([0, 0, 0, 0]),
        "white" => Rgba([255, 255, 255, 255]),
        "red" => Rgba([255, 0, 0, 255]),
        "green" => Rgba([0, 128, 0, 255]),
        "blue" => Rgba([0, 0, 255, 255]),
        "gray" | "grey" => Rgba([128, 128, 128, 255]),
        _ => Rgba([0, 0, 0, 255]),
    }
}

#[cfg(test)]
#[path = "../tests/unit/types.rs"]
mod tests;
