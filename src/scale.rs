use crate::objects::CurvedText;

// A curved raster is regenerated from font metrics, so a stretch can't be kept as a
// transform. Interactive resizes are folded into the layout parameters instead.
impl CurvedText {
    /// Folds a horizontal resize factor into font size, diameter and width.
    pub fn absorb_scale_x(&mut self, scale_x: f64) {
        if !scale_x.is_finite() || scale_x <= 0.0 { return; }
        self.set_font_size(self.font().size * scale_x);
        self.set_diameter(self.diameter() * scale_x);
        self.width = (self.width * scale_x).max(1.0);
        self.scale_x = 1.0;
    }

    /// Folds a vertical resize factor into height.
    pub fn absorb_scale_y(&mut self, scale_y: f64) {
        if !scale_y.is_finite() || scale_y <= 0.0 { return; }
        self.height = (self.height * scale_y).max(1.0);
        self.scale_y = 1.0;
        self.cache.invalidate();
    }
}

#[cfg(test)]
#[path = "../tests/unit/scale.rs"]
mod tests;
