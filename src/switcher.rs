//! Flat/Curved transitions of a text object inside its parent collection.
//!
//! A swap removes the object and reinserts its converted form at the index it came
//! from, so paint order never changes. The object keeps its id and name.

use tracing::{debug, warn};
use crate::config::CurveConfig;
use crate::curve::{diameter_for, CurveParams};
use crate::error::{ArcTextError, ArcTextResult};
use crate::objects::TextObject;
use crate::surface::{CurveEvent, CurveEventSink};

/// Ordered, paint-order collection of text objects.
pub trait ObjectCollection {
    fn index_of(&self, id: u32) -> Option<usize>;
    fn remove(&mut self, id: u32) -> Option<TextObject>;
    fn insert_at(&mut self, index: usize, object: TextObject);
    fn len(&self) -> usize;
    fn set_active(&mut self, id: u32);
    fn get(&self, id: u32) -> Option<&TextObject>;
    fn get_mut(&mut self, id: u32) -> Option<&mut TextObject>;
}

/// Where a swapped object ended up.
#[derive(Clone, Debug, PartialEq)]
pub struct Conversion {
    pub id: u32,
    pub index: usize,
    /// Set when the source was missing from the collection and got appended.
    pub warning: Option<ArcTextError>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum CurveTransition {
    Unchanged,
    ToCurved(Conversion),
    ToFlat(Conversion),
    Updated,
}

pub fn to_curved(collection: &mut dyn ObjectCollection, source: TextObject, curve: CurveParams, diameter: f64) -> Conversion {
    swap(collection, source, |object| object.into_curved(curve, diameter))
}

pub fn to_flat(collection: &mut dyn ObjectCollection, source: TextObject) -> Conversion {
    swap(collection, source, TextObject::into_flat)
}

fn swap(collection: &mut dyn ObjectCollection, source: TextObject, convert: impl FnOnce(TextObject) -> TextObject) -> Conversion {
    let id = source.id;
    let (index, object, warning) = match collection.index_of(id) {
        Some(index) => {
            let live = collection.remove(id).unwrap_or(source);
            (index, live, None)
        }
        None => {
            let index = collection.len();
            warn!(id = id, index = index, "text object missing from collection, appending converted object");
            let warning = ArcTextError::conversion(format!("object {} not found, appended at {}", id, index));
            (index, source, Some(warning))
        }
    };
    let converted = convert(object);
    debug!(id = id, index = index, curved = converted.is_curved(), "text object swapped");
    collection.insert_at(index, converted);
    collection.set_active(id);
    Conversion { id, index, warning }
}

/// Moves object `id` to `curve`, swapping representation when curvature crosses 0,
/// and broadcasts the new curvature when anything changed.
pub fn apply_curvature(
    collection: &mut dyn ObjectCollection,
    id: u32,
    curve: CurveParams,
    config: &CurveConfig,
    sink: &mut dyn CurveEventSink,
) -> ArcTextResult<CurveTransition> {
    let object = collection
        .get(id)
        .ok_or_else(|| ArcTextError::conversion(format!("object {} not found", id)))?;
    let before = object.curve().percentage;
    let diameter = diameter_for(curve.percentage, object.font_size(), config);

    let transition = match (before == 0, curve.is_flat()) {
        (true, true) => CurveTransition::Unchanged,
        (true, false) => {
            let source = object.clone();
            CurveTransition::ToCurved(to_curved(collection, source, curve, diameter))
        }
        (false, true) => {
            let source = object.clone();
            CurveTransition::ToFlat(to_flat(collection, source))
        }
        (false, false) if before == curve.percentage => CurveTransition::Unchanged,
        (false, false) => {
            if let Some(curved) = collection.get_mut(id).and_then(|o| o.as_curved_mut()) {
                curved.set_curve(curve, diameter);
            }
            CurveTransition::Updated
        }
    };

    if transition != CurveTransition::Unchanged {
        sink.curvature_changed(CurveEvent { id, percentage: curve.percentage, angle: curve.angle });
    }
    Ok(transition)
}

#[cfg(test)]
#[path = "../tests/unit/switcher.rs"]
mod tests;
