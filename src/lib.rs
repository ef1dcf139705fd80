pub mod types;
pub mod error;
pub mod config;
pub mod curve;
pub mod surface;
pub mod software;
pub mod web;
pub mod placer;
pub mod cache;
pub mod objects;
pub mod scale;
pub mod switcher;
pub mod engine;
pub mod commands;
pub mod render;

pub use engine::TextEngine;
pub use error::{ArcTextError, ArcTextResult};
pub use config::CurveConfig;
pub use curve::{angle_from_percentage, percentage_from_slider, slider_from_percentage, CurveParams};
pub use cache::{CacheState, RasterCache, RenderPass};
pub use objects::{CurvedText, FlatText, TextObject, TextShape};
pub use placer::{place, ArcLayout};
pub use render::FrameStats;
pub use surface::{CurveEvent, CurveEventSink, DrawingSurface, FontMetrics, GlyphCanvas, PaintTarget};
pub use switcher::{apply_curvature, to_curved, to_flat, Conversion, CurveTransition, ObjectCollection};
pub use types::*;
