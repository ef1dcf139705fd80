use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;
use crate::cache::RenderPass;
use crate::engine::TextEngine;
use crate::objects::TextShape;
use crate::surface::PaintTarget;

/// Tally of one render pass over the document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub regenerated: usize,
    pub refreshed: usize,
    pub reused: usize,
    pub flat: usize,
}

#[wasm_bindgen]
impl TextEngine {
    /// Paint callback for the browser canvas, run once per animation frame.
    pub fn render(&mut self, ctx: &CanvasRenderingContext2d) {
        let mut target = crate::web::ContextTarget::new(ctx);
        self.render_to(&mut target);
    }

    /// True when some curved object has a stale raster or a pending re-blit.
    pub fn needs_redraw(&self) -> bool {
        self.objects.iter().any(|o| o.as_curved().map(|c| c.needs_repaint()).unwrap_or(false))
    }

    /// Serialises the document, regenerating stale curved rasters first.
    pub fn export_svg(&mut self) -> String {
        let TextEngine { objects, surface, metrics, config, .. } = self;
        for curved in objects.iter_mut().filter(|o| o.visible).filter_map(|o| o.as_curved_mut()) {
            curved.ensure_raster(&**surface, &**metrics, config);
        }
        let body: String = objects.iter().map(|o| o.to_svg_element()).collect();
        format!(r##"<svg xmlns="http://www.w3.org/2000/svg">{}</svg>"##, body)
    }
}

impl TextEngine {
    /// Paints every visible object onto `target` in collection order.
    ///
    /// Curvature and property changes between two calls only mark caches; the
    /// (expensive) raster regeneration happens here, at most once per object.
    pub fn render_to(&mut self, target: &mut dyn PaintTarget) -> FrameStats {
        let TextEngine { objects, surface, metrics, config, .. } = self;
        let mut stats = FrameStats::default();
        for obj in objects.iter_mut().filter(|o| o.visible) {
            match &mut obj.shape {
                TextShape::Flat(flat) => {
                    target.draw_flat_text(flat);
                    stats.flat += 1;
                }
                TextShape::Curved(curved) => match curved.render(target, &**surface, &**metrics, config) {
                    RenderPass::Regenerated { .. } => stats.regenerated += 1,
                    RenderPass::Refreshed => stats.refreshed += 1,
                    RenderPass::Reused => stats.reused += 1,
                },
            }
        }
        stats
    }
}

#[cfg(test)]
#[path = "../tests/unit/render.rs"]
mod tests;
