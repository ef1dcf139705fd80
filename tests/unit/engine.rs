use super::*;

#[test]
fn add_text_assigns_ids_names_and_selection() {
    let mut engine = TextEngine::headless();
    let a = engine.add_text("first", 0.0, 0.0);
    let b = engine.add_text("second", 5.0, 6.0);
    assert_eq!((a, b), (1, 2));
    assert_eq!(engine.object(b).unwrap().name, "Text 2");
    assert_eq!(engine.get_active_id(), Some(2));
    let flat = engine.object(b).unwrap().as_flat().unwrap();
    assert_eq!((flat.x, flat.y), (5.0, 6.0));
}

#[test]
fn deleting_active_object_clears_selection() {
    let mut engine = TextEngine::headless();
    let a = engine.add_text("first", 0.0, 0.0);
    let b = engine.add_text("second", 0.0, 0.0);
    assert!(engine.delete_object(b));
    assert_eq!(engine.get_active_id(), None);
    assert!(!engine.delete_object(b));
    assert!(engine.object(a).is_some());
    assert_eq!(engine.add_text("third", 0.0, 0.0), 3);
}

#[test]
fn collection_insert_clamps_to_end() {
    let mut engine = TextEngine::headless();
    engine.add_text("a", 0.0, 0.0);
    let b = engine.add_text("b", 0.0, 0.0);
    let obj = engine.remove(b).unwrap();
    assert_eq!(ObjectCollection::len(&engine), 1);
    engine.insert_at(10, obj);
    assert_eq!(engine.index_of(b), Some(1));
    assert!(engine.remove(42).is_none());
}

#[test]
fn json_views_are_valid() {
    let mut engine = TextEngine::headless();
    engine.add_text("hi", 0.0, 0.0);
    let objects: serde_json::Value = serde_json::from_str(&engine.get_objects_json()).unwrap();
    assert_eq!(objects[0]["shape"]["kind"], "Flat");
    assert_eq!(objects[0]["shape"]["text"], "hi");

    let config: serde_json::Value = serde_json::from_str(&engine.get_config()).unwrap();
    assert_eq!(config["flat_diameter"], 1500.0);
    assert_eq!(config["max_raster_side"], 4096);
}
