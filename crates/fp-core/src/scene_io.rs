//! Scene import/export boundary.
//!
//! The persisted form of a scene is a plain JSON array of elements, the
//! same shape the browser keeps in local storage. A MessagePack encoding of
//! the same array is available for compact snapshots. Storage itself (local
//! storage, files) belongs to the host; this module only converts and
//! validates.

use crate::id::ElementId;
use crate::lint::check_scene;
use crate::model::{Element, ElementKind, Material, Scene, ShapeVariant};
use serde::Deserialize;

/// Serialize a scene as a JSON array.
///
/// # Errors
/// Propagates serializer failures (not expected for well-formed elements).
pub fn scene_to_json(elements: &[Element]) -> Result<String, String> {
    serde_json::to_string(elements).map_err(|e| format!("failed to serialize scene: {e}"))
}

/// Parse and validate a JSON array of elements.
///
/// # Errors
/// Rejects malformed JSON and any scene with an error-level lint finding
/// (duplicate ids, non-positive sizes, non-finite numbers).
pub fn scene_from_json(json: &str) -> Result<Scene, String> {
    let scene: Scene =
        serde_json::from_str(json).map_err(|e| format!("invalid scene JSON: {e}"))?;
    validated(scene)
}

/// Encode a scene as MessagePack.
///
/// # Errors
/// Propagates encoder failures.
pub fn scene_to_msgpack(elements: &[Element]) -> Result<Vec<u8>, String> {
    rmp_serde::to_vec_named(elements).map_err(|e| format!("failed to encode scene: {e}"))
}

/// Decode and validate a MessagePack scene.
///
/// # Errors
/// Rejects undecodable bytes and scenes that fail validation.
pub fn scene_from_msgpack(bytes: &[u8]) -> Result<Scene, String> {
    let scene: Scene =
        rmp_serde::from_slice(bytes).map_err(|e| format!("invalid scene snapshot: {e}"))?;
    validated(scene)
}

fn validated(scene: Scene) -> Result<Scene, String> {
    if let Err(e) = check_scene(&scene) {
        log::warn!("rejecting imported scene: {e}");
        return Err(e);
    }
    log::debug!("imported scene with {} elements", scene.len());
    Ok(scene)
}

// ─── Generated layouts ───────────────────────────────────────────────────

/// One element as returned by the layout generator: no id, no rotation.
#[derive(Debug, Clone, Deserialize)]
struct LayoutDraft {
    #[serde(rename = "type")]
    kind: String,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    #[serde(default)]
    label: Option<String>,
}

/// Turn a generated layout (JSON array of drafts) into a scene.
///
/// Each draft gets a fresh id, rotation 0 and `default_extent` as its
/// vertical extent. Material and color are left to their defaults.
///
/// # Errors
/// Rejects malformed JSON, unknown element types, and drafts that would
/// break scene invariants. Nothing is partially accepted.
pub fn scene_from_layout_json(json: &str, default_extent: f32) -> Result<Scene, String> {
    let drafts: Vec<LayoutDraft> =
        serde_json::from_str(json).map_err(|e| format!("invalid layout JSON: {e}"))?;

    let mut scene = Scene::with_capacity(drafts.len());
    for (i, draft) in drafts.into_iter().enumerate() {
        let kind = ElementKind::parse(&draft.kind)
            .ok_or_else(|| format!("element {i}: unknown type `{}`", draft.kind))?;
        let id = ElementId::fresh(kind.as_str(), |id| scene.iter().any(|e| e.id == id));
        scene.push(Element {
            id,
            kind,
            variant: ShapeVariant::Rectangle,
            x: draft.x,
            y: draft.y,
            width: draft.width,
            height: draft.height,
            rotation: 0.0,
            vertical_extent: Some(default_extent),
            color: None,
            material: Material::default(),
            opacity: None,
            label: draft.label,
        });
    }
    validated(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_drafts_get_ids_and_defaults() {
        let json = r#"[
            {"type": "room", "x": 0, "y": 0, "width": 300, "height": 200, "label": "Kitchen"},
            {"type": "door", "x": 120, "y": 196, "width": 40, "height": 8}
        ]"#;
        let scene = scene_from_layout_json(json, 120.0).unwrap();
        assert_eq!(scene.len(), 2);
        assert_ne!(scene[0].id, scene[1].id);
        assert!(scene[0].id.as_str().starts_with("room_"));
        assert_eq!(scene[0].label.as_deref(), Some("Kitchen"));
        assert_eq!(scene[1].rotation, 0.0);
        assert_eq!(scene[1].vertical_extent, Some(120.0));
    }

    #[test]
    fn unknown_layout_type_rejects_everything() {
        let json = r#"[{"type": "staircase", "x": 0, "y": 0, "width": 10, "height": 10}]"#;
        let err = scene_from_layout_json(json, 120.0).unwrap_err();
        assert!(err.contains("staircase"), "{err}");
    }

    #[test]
    fn layout_must_be_an_array() {
        assert!(scene_from_layout_json(r#"{"type": "room"}"#, 120.0).is_err());
        assert!(scene_from_layout_json("not json", 120.0).is_err());
    }

    #[test]
    fn negative_layout_size_is_rejected() {
        let json = r#"[{"type": "wall", "x": 0, "y": 0, "width": -5, "height": 10}]"#;
        assert!(scene_from_layout_json(json, 120.0).is_err());
    }
}
