use wasm_bindgen::prelude::*;
use serde::Deserialize;
use serde_json::json;
use crate::config::CurveConfig;
use crate::curve::CurveParams;
use crate::engine::TextEngine;
use crate::objects::TextShape;
use crate::switcher::{apply_curvature, CurveTransition};
use crate::types::Shadow;

fn error_reply(msg: impl std::fmt::Display) -> String {
    json!({ "error": msg.to_string() }).to_string()
}

#[wasm_bindgen]
impl TextEngine {
    pub fn execute_command(&mut self, cmd_json: &str) -> String {
        #[derive(Deserialize)]
        struct Command {
            action: String,
            #[serde(default)]
            params: serde_json::Value,
        }

        let cmd: Command = match serde_json::from_str(cmd_json) {
            Ok(c) => c,
            Err(e) => return error_reply(format!("Invalid JSON: {}", e)),
        };
        // Ids start at 1, so 0 never matches an object.
        let id = match cmd.params["id"].as_u64().map(u32::try_from) {
            Some(Ok(id)) => id,
            Some(Err(_)) => return error_reply("Object not found"),
            None => 0,
        };

        match cmd.action.as_str() {
            "add_text" => {
                let text = cmd.params["text"].as_str().unwrap_or("Type here...");
                let new_id = self.add_text(text, cmd.params["x"].as_f64().unwrap_or(0.0), cmd.params["y"].as_f64().unwrap_or(0.0));
                self.update_object(new_id, &cmd.params);
                json!({ "success": true, "id": new_id }).to_string()
            }
            "update" => {
                if self.update_object(id, &cmd.params) { json!({ "success": true }).to_string() }
                else { error_reply("Object not found") }
            }
            "delete" => {
                if self.delete_object(id) { json!({ "success": true }).to_string() }
                else { error_reply("Object not found") }
            }
            "select" => {
                if cmd.params["id"].is_null() { self.active_id = None; }
                else if self.object(id).is_some() { self.active_id = Some(id); }
                else { return error_reply("Object not found"); }
                json!({ "success": true }).to_string()
            }
            "set_curvature" => match cmd.params["slider"].as_f64() {
                Some(slider) => self.curvature_reply(id, CurveParams::from_slider(slider)),
                None => error_reply("Missing slider value"),
            },
            "set_percentage" => match cmd.params["percentage"].as_i64() {
                Some(p) => self.curvature_reply(id, CurveParams::from_percentage(p.clamp(i32::MIN as i64, i32::MAX as i64) as i32)),
                None => error_reply("Missing percentage value"),
            },
            "get_curve" => match self.object(id) {
                Some(obj) => serde_json::to_string(&obj.curve()).unwrap_or_else(|e| error_reply(e)),
                None => error_reply("Object not found"),
            },
            "scale" => {
                let sx = cmd.params["scale_x"].as_f64();
                let sy = cmd.params["scale_y"].as_f64();
                match self.object_mut(id).map(|o| &mut o.shape) {
                    Some(TextShape::Curved(c)) => {
                        if let Some(v) = sx { c.absorb_scale_x(v); }
                        if let Some(v) = sy { c.absorb_scale_y(v); }
                    }
                    Some(TextShape::Flat(f)) => {
                        if let Some(v) = sx { f.scale_x = v; }
                        if let Some(v) = sy { f.scale_y = v; }
                    }
                    None => return error_reply("Object not found"),
                }
                json!({ "success": true }).to_string()
            }
            "configure" => match CurveConfig::from_json(&cmd.params) {
                Ok(config) => {
                    self.config = config;
                    json!({ "success": true }).to_string()
                }
                Err(e) => error_reply(e),
            },
            "export_svg" => json!({ "svg": self.export_svg() }).to_string(),
            _ => error_reply(format!("Unknown action: {}", cmd.action)),
        }
    }
}

impl TextEngine {
    /// Drives one curvature change through the switcher and reports what happened.
    pub fn set_curvature(&mut self, id: u32, curve: CurveParams) -> crate::error::ArcTextResult<CurveTransition> {
        let config = self.config.clone();
        let mut events = std::mem::replace(&mut self.events, Box::new(crate::surface::NullSink));
        let result = apply_curvature(self, id, curve, &config, events.as_mut());
        self.events = events;
        result
    }

    fn curvature_reply(&mut self, id: u32, curve: CurveParams) -> String {
        match self.set_curvature(id, curve) {
            Ok(transition) => {
                let (kind, warning) = match &transition {
                    CurveTransition::Unchanged => ("unchanged", None),
                    CurveTransition::Updated => ("updated", None),
                    CurveTransition::ToCurved(c) => ("curved", c.warning.as_ref()),
                    CurveTransition::ToFlat(c) => ("flat", c.warning.as_ref()),
                };
                let mut reply = json!({
                    "success": true,
                    "transition": kind,
                    "percentage": curve.percentage,
                    "angle": curve.angle,
                    "slider": curve.slider,
                });
                if let Some(w) = warning {
                    reply["warning"] = json!(w.to_string());
                }
                reply.to_string()
            }
            Err(e) => error_reply(e),
        }
    }

    pub(crate) fn update_object(&mut self, id: u32, params: &serde_json::Value) -> bool {
        let obj = match self.object_mut(id) { Some(o) => o, None => return false };
        if let Some(v) = params["name"].as_str() { obj.name = v.to_string(); }
        if let Some(v) = params["visible"].as_bool() { obj.visible = v; }
        let shadow = match params.get("shadow") {
            Some(serde_json::Value::Null) => Some(None),
            Some(v) => serde_json::from_value::<Shadow>(v.clone()).ok().map(Some),
            None => None,
        };

        match &mut obj.shape {
            TextShape::Curved(c) => {
                if let Some(v) = params["x"].as_f64() { c.x = v; }
                if let Some(v) = params["y"].as_f64() { c.y = v; }
                if let Some(v) = params["text"].as_str() { c.set_text(v); }
                if let Some(v) = params["diameter"].as_f64() { c.set_diameter(v); }
                if let Some(v) = params["kerning"].as_f64() { c.set_kerning(v); }
                if let Some(v) = params["flipped"].as_bool() { c.set_flipped(v); }
                if let Some(v) = params["font_family"].as_str() { c.set_font_family(v); }
                if let Some(v) = params["font_size"].as_f64() { c.set_font_size(v); }
                if let Some(v) = params["font_weight"].as_str() { c.set_font_weight(v); }
                if let Some(v) = params["font_style"].as_str() { c.set_font_style(v); }
                if let Some(v) = params["fill"].as_str() { c.set_fill(v); }
                if let Some(v) = params["stroke"].as_str() { c.set_stroke_color(v); }
                if let Some(v) = params["stroke_width"].as_f64() { c.set_stroke_width(v); }
                if let Some(s) = shadow { c.set_shadow(s); }
            }
            TextShape::Flat(f) => {
                if let Some(v) = params["x"].as_f64() { f.x = v; }
                if let Some(v) = params["y"].as_f64() { f.y = v; }
                if let Some(v) = params["text"].as_str() { f.text = v.to_string(); }
                if let Some(v) = params["font_family"].as_str() { f.font.family = v.to_string(); }
                if let Some(v) = params["font_size"].as_f64() { f.font.size = v; }
                if let Some(v) = params["font_weight"].as_str() { f.font.weight = v.to_string(); }
                if let Some(v) = params["font_style"].as_str() { f.font.style = v.to_string(); }
                if let Some(v) = params["fill"].as_str() { f.fill = v.to_string(); }
                if let Some(v) = params["stroke"].as_str() { f.stroke.color = v.to_string(); }
                if let Some(v) = params["stroke_width"].as_f64() { f.stroke.width = v.max(0.0); }
                if let Some(v) = params["char_spacing"].as_f64() { f.char_spacing = v; }
                if let Some(s) = shadow { f.shadow = s; }
            }
        }
        true
    }
}

#[cfg(test)]
#[path = "../tests/unit/commands.rs"]
mod tests;
