use wasm_bindgen::prelude::*;
use crate::config::CurveConfig;
use crate::objects::{FlatText, TextObject, TextShape};
use crate::software::{MonospaceMetrics, SoftwareSurface};
use crate::surface::{CurveEventSink, DrawingSurface, FontMetrics, NullSink};
use crate::switcher::ObjectCollection;

/// The text layer of the editor document: objects in paint order, the active
/// selection, and the backends curved text is rendered with.
#[wasm_bindgen]
pub struct TextEngine {
    pub(crate) objects: Vec<TextObject>,
    pub(crate) next_id: u32,
    pub(crate) active_id: Option<u32>,
    pub(crate) config: CurveConfig,
    pub(crate) surface: Box<dyn DrawingSurface>,
    pub(crate) metrics: Box<dyn FontMetrics>,
    pub(crate) events: Box<dyn CurveEventSink>,
}

#[wasm_bindgen]
impl TextEngine {
    /// Browser constructor: canvas-backed surfaces and metrics.
    #[wasm_bindgen(constructor)]
    pub fn new() -> TextEngine {
        console_error_panic_hook::set_once();
        TextEngine::with_backends(
            Box::new(crate::web::CanvasSurface),
            Box::new(crate::web::CanvasMetrics::new()),
            Box::new(NullSink),
        )
    }

    /// Headless engine rendering with the software backend.
    pub fn headless() -> TextEngine {
        let metrics = MonospaceMetrics::default();
        TextEngine::with_backends(Box::new(SoftwareSurface::new(metrics)), Box::new(metrics), Box::new(NullSink))
    }

    pub fn add_text(&mut self, text: &str, x: f64, y: f64) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.objects.push(TextObject {
            id,
            name: format!("Text {}", id),
            visible: true,
            shape: TextShape::Flat(FlatText::new(text, x, y)),
        });
        self.active_id = Some(id);
        id
    }

    pub fn get_objects_json(&self) -> String {
        serde_json::to_string(&self.objects).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn get_active_id(&self) -> Option<u32> {
        self.active_id
    }

    pub fn get_config(&self) -> String {
        serde_json::to_string(&self.config).unwrap_or("{}".to_string())
    }
}

impl Default for TextEngine {
    fn default() -> Self {
        TextEngine::headless()
    }
}

impl TextEngine {
    pub fn with_backends(surface: Box<dyn DrawingSurface>, metrics: Box<dyn FontMetrics>, events: Box<dyn CurveEventSink>) -> TextEngine {
        TextEngine {
            objects: Vec::new(),
            next_id: 1,
            active_id: None,
            config: CurveConfig::default(),
            surface,
            metrics,
            events,
        }
    }

    pub fn set_event_sink(&mut self, events: Box<dyn CurveEventSink>) {
        self.events = events;
    }

    pub fn config(&self) -> &CurveConfig {
        &self.config
    }

    pub fn objects(&self) -> &[TextObject] {
        &self.objects
    }

    pub fn object(&self, id: u32) -> Option<&TextObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn object_mut(&mut self, id: u32) -> Option<&mut TextObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub(crate) fn delete_object(&mut self, id: u32) -> bool {
        let initial_len = self.objects.len();
        self.objects.retain(|o| o.id != id);
        if self.active_id == Some(id) {
            self.active_id = None;
        }
        self.objects.len() < initial_len
    }
}

impl ObjectCollection for TextEngine {
    fn index_of(&self, id: u32) -> Option<usize> {
        self.objects.iter().position(|o| o.id == id)
    }

    fn remove(&mut self, id: u32) -> Option<TextObject> {
        let pos = self.index_of(id)?;
        Some(self.objects.remove(pos))
    }

    fn insert_at(&mut self, index: usize, object: TextObject) {
        let index = index.min(self.objects.len());
        self.objects.insert(index, object);
    }

    fn len(&self) -> usize {
        self.objects.len()
    }

    fn set_active(&mut self, id: u32) {
        self.active_id = Some(id);
    }

    fn get(&self, id: u32) -> Option<&TextObject> {
        self.object(id)
    }

    fn get_mut(&mut self, id: u32) -> Option<&mut TextObject> {
        self.object_mut(id)
    }
}

#[cfg(test)]
#[path = "../tests/unit/engine.rs"]
mod tests;
