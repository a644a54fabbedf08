//! Integration tests: persisted JSON → validated scene → JSON / MessagePack.

use fp_core::id::ElementId;
use fp_core::model::*;
use fp_core::{scene_from_json, scene_from_msgpack, scene_to_json, scene_to_msgpack};
use pretty_assertions::assert_eq;

fn studio() -> Scene {
    scene_from_json(include_str!("fixtures/studio.json")).expect("studio fixture should load")
}

#[test]
fn fixture_loads_in_paint_order() {
    let scene = studio();
    let ids: Vec<&str> = scene.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "studio_room",
            "studio_wall_n",
            "studio_door",
            "studio_window",
            "studio_sofa"
        ]
    );
}

#[test]
fn missing_optional_fields_take_defaults() {
    let scene = studio();
    let window = &scene[3];
    assert_eq!(window.kind, ElementKind::Window);
    assert_eq!(window.variant, ShapeVariant::Rectangle);
    assert_eq!(window.color, None);
    assert_eq!(window.vertical_extent, None);
    assert_eq!(window.display_color(), "#bae6fd");

    let sofa = &scene[4];
    assert_eq!(sofa.variant, ShapeVariant::LShape);
    assert_eq!(sofa.opacity, Some(0.8));
    assert_eq!(sofa.rotation, 90.0);
}

#[test]
fn json_export_reimports_identically() {
    let scene = studio();
    let json = scene_to_json(&scene).unwrap();
    let back = scene_from_json(&json).unwrap();
    assert_eq!(back, scene);
}

#[test]
fn msgpack_snapshot_matches_json_scene() {
    let scene = studio();
    let bytes = scene_to_msgpack(&scene).unwrap();
    let back = scene_from_msgpack(&bytes).unwrap();
    assert_eq!(back, scene);
    assert_eq!(back[0].id, ElementId::intern("studio_room"));
}

#[test]
fn duplicate_ids_are_rejected_at_import() {
    let err = scene_from_json(include_str!("fixtures/duplicate_ids.json")).unwrap_err();
    assert!(err.contains("duplicate-id"), "{err}");
}

#[test]
fn unknown_material_is_rejected() {
    let json = r#"[{"id": "x", "type": "wall", "x": 0, "y": 0, "width": 1, "height": 1, "material": "marble"}]"#;
    assert!(scene_from_json(json).is_err());
}

#[test]
fn truncated_snapshot_is_rejected() {
    let bytes = scene_to_msgpack(&studio()).unwrap();
    assert!(scene_from_msgpack(&bytes[..bytes.len() / 2]).is_err());
}
