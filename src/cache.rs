use image::{imageops, RgbaImage};
use tracing::{debug, warn};
use crate::config::CurveConfig;
use crate::error::{ArcTextError, ArcTextResult};
use crate::placer::{self, ArcLayout};
use crate::surface::{DrawingSurface, FontMetrics};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CacheState {
    Clean,
    Dirty,
}

/// What a render step did.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RenderPass {
    /// The raster was regenerated; `trimmed` is false when trimming fell back
    /// to the untrimmed raster.
    Regenerated { trimmed: bool },
    /// Nothing changed geometrically; the stored raster is re-blitted on request.
    Refreshed,
    /// The stored raster was reused as is.
    Reused,
}

/// Cached raster of one curved text object plus its invalidation state.
#[derive(Clone, Debug)]
pub struct RasterCache {
    state: CacheState,
    refresh: bool,
    blank: bool,
    raster: Option<RgbaImage>,
}

impl Default for RasterCache {
    fn default() -> Self {
        RasterCache { state: CacheState::Dirty, refresh: false, blank: false, raster: None }
    }
}

impl RasterCache {
    pub fn state(&self) -> CacheState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state == CacheState::Dirty
    }

    pub fn needs_refresh(&self) -> bool {
        self.refresh
    }

    pub fn raster(&self) -> Option<&RgbaImage> {
        self.raster.as_ref()
    }

    /// The stored raster has no opaque pixel (trimming fell back).
    pub fn is_blank(&self) -> bool {
        self.blank
    }

    /// Whether the next render step has to run the placer.
    pub fn is_stale(&self) -> bool {
        self.state == CacheState::Dirty || self.raster.is_none()
    }

    /// A layout-affecting property changed.
    pub fn invalidate(&mut self) {
        if self.state == CacheState::Clean {
            debug!("raster cache: clean -> dirty");
        }
        self.state = CacheState::Dirty;
    }

    /// A paint-only property changed; keep the raster but blit it again.
    pub fn request_refresh(&mut self) {
        self.refresh = true;
    }

    pub fn render(&mut self, layout: &ArcLayout<'_>, surface: &dyn DrawingSurface, metrics: &dyn FontMetrics, config: &CurveConfig) -> RenderPass {
        if self.is_stale() {
            let generated = placer::place(layout, surface, metrics, config);
            let (raster, trimmed) = match trim(&generated) {
                Ok(t) => (t, true),
                Err(e) => {
                    warn!("keeping untrimmed raster: {}", e);
                    (generated, false)
                }
            };
            debug!(width = raster.width(), height = raster.height(), "raster cache: regenerated");
            self.raster = Some(raster);
            self.blank = !trimmed;
            self.state = CacheState::Clean;
            self.refresh = false;
            return RenderPass::Regenerated { trimmed };
        }
        if self.refresh {
            self.refresh = false;
            return RenderPass::Refreshed;
        }
        RenderPass::Reused
    }
}

/// Crops `raster` to the bounding box of its non-transparent pixels.
pub fn trim(raster: &RgbaImage) -> ArcTextResult<RgbaImage> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0;
    let mut max_y = 0;
    let mut found = false;
    for (x, y, px) in raster.enumerate_pixels() {
        if px[3] == 0 { continue; }
        found = true;
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    if !found {
        return Err(ArcTextError::trim(format!("no opaque pixel in {}x{} raster", raster.width(), raster.height())));
    }
    Ok(imageops::crop_imm(raster, min_x, min_y, max_x - min_x + 1, max_y - min_y + 1).to_image())
}

#[cfg(test)]
#[path = "../tests/unit/cache.rs"]
mod tests;
