//! WASM bridge for FP — exposes the floor-plan editor engine to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page keeps doing the
//! painting (2D canvas and the 3D scene graph) and the network calls to the
//! layout assistant; everything that decides what the plan looks like runs
//! through `FloorPlanCanvas`.

mod console;

use fp_core::config::EditorConfig;
use fp_core::id::ElementId;
use fp_core::lint::lint_scene;
use fp_core::model::{ElementKind, Material, ShapeVariant};
use fp_core::palette::SHAPE_PALETTE;
use fp_core::scene_io::{scene_from_json, scene_from_msgpack, scene_to_msgpack};
use fp_editor::assist::{Advisory, LayoutTicket};
use fp_editor::input::{InputEvent, Modifiers};
use fp_editor::inspector::InspectorEdit;
use fp_editor::session::{EditorSession, ViewMode};
use fp_render::hit::hit_test_rect;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// The main WASM-facing editor controller.
///
/// Holds the editing session. All interaction from the page goes through
/// this struct.
#[wasm_bindgen]
pub struct FloorPlanCanvas {
    session: EditorSession,
}

#[wasm_bindgen]
impl FloorPlanCanvas {
    /// Create an editor with the default config and an empty plan.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        console::setup();
        Self::from_session(EditorSession::new(EditorConfig::default()))
    }

    /// Create an editor from a JSON config and a persisted scene (either may
    /// be empty). Returns `undefined` if either is rejected; the reason is
    /// logged to the console.
    pub fn restore(config_json: &str, scene_json: &str) -> Option<FloorPlanCanvas> {
        console::setup();
        match build_session(config_json, scene_json) {
            Ok(session) => Some(Self::from_session(session)),
            Err(e) => {
                log::error!("restore failed: {e}");
                None
            }
        }
    }

    // ─── Scene ───────────────────────────────────────────────────────────

    /// The scene to paint, with any live drag/resize preview applied.
    pub fn get_elements_json(&self) -> String {
        to_json(&*self.session.visible_elements())
    }

    /// Change counter; persist whenever it moves.
    pub fn revision(&self) -> f64 {
        self.session.editor().revision() as f64
    }

    /// Serialize the committed scene for storage or download.
    pub fn export_json(&self) -> String {
        match self.session.export_json() {
            Ok(json) => json,
            Err(e) => {
                log::error!("{e}");
                "[]".to_string()
            }
        }
    }

    /// Replace the plan with an imported scene (undoable).
    /// Returns JSON: `{"ok":true}` or `{"ok":false,"error":"..."}`.
    pub fn import_json(&mut self, json: &str) -> String {
        ok_or_error(self.session.import_json(json))
    }

    /// Compact binary snapshot of the committed scene.
    pub fn export_snapshot(&self) -> js_sys::Uint8Array {
        match scene_to_msgpack(self.session.editor().elements()) {
            Ok(bytes) => js_sys::Uint8Array::from(bytes.as_slice()),
            Err(e) => {
                log::error!("{e}");
                js_sys::Uint8Array::new_with_length(0)
            }
        }
    }

    /// Replace the plan with a binary snapshot (undoable). Same result JSON
    /// as `import_json`.
    pub fn import_snapshot(&mut self, bytes: &[u8]) -> String {
        ok_or_error(scene_from_msgpack(bytes).map(|scene| self.session.load_scene(scene)))
    }

    // ─── Editing ─────────────────────────────────────────────────────────

    /// Insert a palette item. Returns the new element's id, or an empty
    /// string for an unknown kind/variant.
    pub fn add_element(&mut self, kind: &str, variant: &str) -> String {
        let (Some(kind), Some(variant)) = (ElementKind::parse(kind), ShapeVariant::parse(variant))
        else {
            log::warn!("add_element: unknown kind {kind:?} or variant {variant:?}");
            return String::new();
        };
        self.session.add_from_palette(kind, variant).to_string()
    }

    pub fn get_selected_id(&self) -> String {
        self.session
            .selected()
            .map(|e| e.id.to_string())
            .unwrap_or_default()
    }

    /// Select by id; an empty string clears. Returns `true` if an element is
    /// now selected.
    pub fn select_by_id(&mut self, id: &str) -> bool {
        let id = (!id.is_empty()).then(|| ElementId::intern(id));
        self.session.select(id);
        self.session.selected_id().is_some()
    }

    /// The selected element as JSON, or `null`.
    pub fn get_selected_props(&self) -> String {
        to_json(&self.session.selected())
    }

    /// Apply an inspector field to the selected element.
    ///
    /// Keys: `label`, `rotation`, `wallHeight`, `width`, `height`, `color`,
    /// `material`. Returns `true` if a change was committed.
    pub fn set_prop(&mut self, key: &str, value: &str) -> bool {
        match inspector_edit(&self.session, key, value) {
            Some(edit) => self.session.inspector_edit(edit),
            None => false,
        }
    }

    pub fn delete_selected(&mut self) -> bool {
        self.session.delete_selected()
    }

    pub fn clear_all(&mut self) {
        self.session.clear_all();
    }

    pub fn undo(&mut self) -> bool {
        self.session.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.session.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.session.editor().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.session.editor().can_redo()
    }

    // ─── Pointer + keyboard ──────────────────────────────────────────────

    /// Returns `true` if the canvas should repaint.
    pub fn handle_pointer_down(
        &mut self,
        x: f32,
        y: f32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        let modifiers = mods(shift, ctrl, alt, meta);
        self.session
            .handle_pointer(InputEvent::PointerDown { x, y, modifiers })
    }

    pub fn handle_pointer_move(
        &mut self,
        x: f32,
        y: f32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        let modifiers = mods(shift, ctrl, alt, meta);
        self.session
            .handle_pointer(InputEvent::PointerMove { x, y, modifiers })
    }

    pub fn handle_pointer_up(
        &mut self,
        x: f32,
        y: f32,
        shift: bool,
        ctrl: bool,
        alt: bool,
        meta: bool,
    ) -> bool {
        let modifiers = mods(shift, ctrl, alt, meta);
        self.session
            .handle_pointer(InputEvent::PointerUp { x, y, modifiers })
    }

    /// Handle a keyboard event. Returns JSON:
    /// `{"changed":bool,"action":"<action_name>"}`.
    pub fn handle_key(
        &mut self,
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
        in_text_field: bool,
    ) -> String {
        match self
            .session
            .handle_key(key, mods(shift, ctrl, alt, meta), in_text_field)
        {
            Some((action, changed)) => {
                format!(r#"{{"changed":{changed},"action":"{}"}}"#, action.as_str())
            }
            None => r#"{"changed":false,"action":"none"}"#.to_string(),
        }
    }

    /// Ids of elements overlapping a marquee rectangle, as a JSON array.
    pub fn elements_in_rect(&self, x: f32, y: f32, w: f32, h: f32) -> String {
        let ids: Vec<String> = hit_test_rect(self.session.editor().elements(), x, y, w, h)
            .into_iter()
            .map(|id| id.to_string())
            .collect();
        to_json(&ids)
    }

    // ─── View ────────────────────────────────────────────────────────────

    pub fn show_grid(&self) -> bool {
        self.session.show_grid()
    }

    pub fn toggle_grid(&mut self) {
        self.session.toggle_grid();
    }

    pub fn get_view_mode(&self) -> String {
        self.session.view_mode().as_str().to_string()
    }

    /// `"2d"` or `"3d"`. Returns `false` for anything else.
    pub fn set_view_mode(&mut self, mode: &str) -> bool {
        match ViewMode::parse(mode) {
            Some(mode) => {
                self.session.set_view_mode(mode);
                true
            }
            None => false,
        }
    }

    /// Mesh descriptions for the 3D view, as JSON.
    pub fn get_meshes_json(&self) -> String {
        to_json(&self.session.meshes())
    }

    // ─── Layout assistant ────────────────────────────────────────────────

    /// Call right before sending a layout request. Keep the returned handle
    /// with that request and pass it to `apply_layout_response`.
    pub fn begin_layout_request(&self) -> f64 {
        self.session.begin_layout_request().revision() as f64
    }

    /// Hand back the assistant's layout response for the request `handle`
    /// came from. `error` is non-empty when the request itself failed.
    /// Returns advisory JSON `{"kind","text"}`.
    pub fn apply_layout_response(&mut self, handle: f64, json: &str, error: &str) -> String {
        let ticket = LayoutTicket::at_revision(handle as u64);
        let response = if error.is_empty() {
            Ok(json.to_string())
        } else {
            Err(error.to_string())
        };
        advisory_json(&self.session.apply_generated_layout(ticket, response))
    }

    /// Hand back the assistant's critique. Never changes the plan.
    pub fn apply_suggestion_response(&self, text: &str, error: &str) -> String {
        let response = if error.is_empty() {
            Ok(Some(text.to_string()))
        } else {
            Err(error.to_string())
        };
        advisory_json(&self.session.apply_suggestion(response))
    }
}

impl FloorPlanCanvas {
    fn from_session(session: EditorSession) -> Self {
        Self { session }
    }
}

impl Default for FloorPlanCanvas {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────

fn build_session(config_json: &str, scene_json: &str) -> Result<EditorSession, String> {
    let config = if config_json.trim().is_empty() {
        EditorConfig::default()
    } else {
        EditorConfig::from_json(config_json)?
    };
    let scene = if scene_json.trim().is_empty() {
        Vec::new()
    } else {
        scene_from_json(scene_json)?
    };
    Ok(EditorSession::with_scene(config, scene))
}

fn inspector_edit(session: &EditorSession, key: &str, value: &str) -> Option<InspectorEdit> {
    let edit = match key {
        "label" => InspectorEdit::Label(value.to_string()),
        "rotation" => InspectorEdit::Rotation(value.to_string()),
        "wallHeight" => InspectorEdit::VerticalExtent(value.to_string()),
        "width" | "height" => {
            let el = session.selected()?;
            let (width, height) = if key == "width" {
                (value.to_string(), el.height.to_string())
            } else {
                (el.width.to_string(), value.to_string())
            };
            InspectorEdit::Size { width, height }
        }
        "color" => InspectorEdit::Color(value.to_string()),
        "material" => InspectorEdit::Material(Material::parse(value)?),
        _ => {
            log::warn!("set_prop: unknown key {key:?}");
            return None;
        }
    };
    Some(edit)
}

fn mods(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Modifiers {
    Modifiers {
        shift,
        ctrl,
        alt,
        meta,
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("serialization failed: {e}");
        "null".to_string()
    })
}

fn advisory_json(advisory: &Advisory) -> String {
    to_json(advisory)
}

fn ok_or_error(result: Result<(), String>) -> String {
    match result {
        Ok(()) => r#"{"ok":true}"#.to_string(),
        Err(e) => serde_json::json!({ "ok": false, "error": e }).to_string(),
    }
}

// ─── Standalone functions (no editor needed) ─────────────────────────────

/// Lint a scene JSON. Returns `{"ok":true,"diagnostics":[...]}` or
/// `{"ok":false,"error":"..."}` when the JSON itself is unreadable.
#[wasm_bindgen]
pub fn validate_scene(json: &str) -> String {
    match serde_json::from_str::<fp_core::model::Scene>(json) {
        Ok(scene) => {
            let diagnostics = lint_scene(&scene);
            serde_json::json!({ "ok": true, "diagnostics": diagnostics }).to_string()
        }
        Err(e) => serde_json::json!({ "ok": false, "error": e.to_string() }).to_string(),
    }
}

/// The insertion palette as JSON, in display order.
#[wasm_bindgen]
pub fn palette_json() -> String {
    let items: Vec<serde_json::Value> = SHAPE_PALETTE
        .iter()
        .map(|item| {
            serde_json::json!({
                "type": item.kind,
                "label": item.label,
                "color": item.color,
                "material": item.material,
                "width": item.default_width,
                "height": item.default_height,
            })
        })
        .collect();
    to_json(&items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SCENE: &str = r##"[
        {"id": "hall", "type": "room", "x": 0, "y": 0, "width": 200, "height": 100, "rotation": 0, "material": "plaster"},
        {"id": "rug", "type": "furniture", "x": 40, "y": 20, "width": 60, "height": 40, "rotation": 0, "material": "wood", "color": "#aa0000"}
    ]"##;

    fn canvas() -> FloorPlanCanvas {
        FloorPlanCanvas::restore("", SCENE).expect("scene should load")
    }

    #[test]
    fn restore_rejects_bad_config() {
        assert!(FloorPlanCanvas::restore(r#"{"gridSize": 0}"#, "").is_none());
        assert!(FloorPlanCanvas::restore(r#"{"historyCapacity": 10}"#, "").is_some());
    }

    #[test]
    fn add_element_reports_new_id() {
        let mut c = FloorPlanCanvas::new();
        let id = c.add_element("room", "rectangle");
        assert!(id.starts_with("room_"));
        assert_eq!(c.get_selected_id(), id);
        let elements: serde_json::Value = serde_json::from_str(&c.get_elements_json()).unwrap();
        assert_eq!(elements.as_array().map(Vec::len), Some(5));
        assert_eq!(c.add_element("moat", "rectangle"), "");
    }

    #[test]
    fn set_prop_width_keeps_height() {
        let mut c = canvas();
        assert!(c.select_by_id("rug"));
        assert!(c.set_prop("width", "90"));
        let props: serde_json::Value = serde_json::from_str(&c.get_selected_props()).unwrap();
        assert_eq!(props["width"], 90.0);
        assert_eq!(props["height"], 40.0);
        assert!(!c.set_prop("material", "cardboard"));
        assert!(!c.set_prop("nonsense", "1"));
    }

    #[test]
    fn key_json_reports_action() {
        let mut c = canvas();
        c.select_by_id("rug");
        assert_eq!(
            c.handle_key("Delete", false, false, false, false, false),
            r#"{"changed":true,"action":"delete"}"#
        );
        assert_eq!(
            c.handle_key("z", true, false, false, false, false),
            r#"{"changed":true,"action":"undo"}"#
        );
        assert_eq!(
            c.handle_key("q", false, false, false, false, false),
            r#"{"changed":false,"action":"none"}"#
        );
    }

    #[test]
    fn import_result_json() {
        let mut c = canvas();
        assert_eq!(c.import_json(SCENE), r#"{"ok":true}"#);
        let bad: serde_json::Value = serde_json::from_str(&c.import_json("[1]")).unwrap();
        assert_eq!(bad["ok"], false);
        assert!(c.can_undo());
    }

    #[test]
    fn layout_response_round_trip() {
        let mut c = canvas();
        let handle = c.begin_layout_request();
        let advisory = c.apply_layout_response(handle, "", "offline");
        assert_eq!(advisory, r#"{"kind":"info","text":"Failed to dream up layout."}"#);
        assert_eq!(c.session.editor().elements().len(), 2);

        let handle = c.begin_layout_request();
        let layout = r#"[{"type": "room", "x": 0, "y": 0, "width": 100, "height": 100}]"#;
        let advisory = c.apply_layout_response(handle, layout, "");
        assert_eq!(
            advisory,
            r#"{"kind":"success","text":"Layout synthesized successfully."}"#
        );
        assert_eq!(c.session.editor().elements().len(), 1);
    }

    #[test]
    fn overlapping_layout_requests_are_judged_separately() {
        let mut c = FloorPlanCanvas::restore(r#"{"staleLayouts": "discard"}"#, SCENE)
            .expect("scene should load");
        let layout = r#"[{"type": "room", "x": 0, "y": 0, "width": 100, "height": 100}]"#;

        let first = c.begin_layout_request();
        assert!(c.select_by_id("hall"));
        assert!(c.set_prop("label", "Hallway"));
        let second = c.begin_layout_request();

        assert_eq!(
            c.apply_layout_response(first, layout, ""),
            r#"{"kind":"info","text":"Layout discarded: the plan changed while it was being generated."}"#
        );
        assert_eq!(c.session.editor().elements().len(), 2);
        assert_eq!(
            c.apply_layout_response(second, layout, ""),
            r#"{"kind":"success","text":"Layout synthesized successfully."}"#
        );
        assert_eq!(c.session.editor().elements().len(), 1);
    }

    #[test]
    fn oversized_prop_is_rejected_and_export_still_imports() {
        let mut c = canvas();
        assert!(c.select_by_id("rug"));
        let huge = "9".repeat(60);
        assert!(!c.set_prop("width", &huge));
        assert!(!c.set_prop("rotation", &huge));
        assert!(!c.set_prop("wallHeight", &huge));

        let exported = c.export_json();
        assert!(!exported.contains("null"));
        let mut fresh = FloorPlanCanvas::new();
        assert_eq!(fresh.import_json(&exported), r#"{"ok":true}"#);
        assert_eq!(fresh.session.editor().elements(), c.session.editor().elements());
    }

    #[test]
    fn meshes_follow_view() {
        let mut c = canvas();
        assert!(c.set_view_mode("3d"));
        assert!(!c.set_view_mode("4d"));
        let meshes: serde_json::Value = serde_json::from_str(&c.get_meshes_json()).unwrap();
        assert_eq!(meshes.as_array().map(Vec::len), Some(2));
        assert_eq!(c.get_view_mode(), "3d");
    }

    #[test]
    fn marquee_ids() {
        let c = canvas();
        assert_eq!(c.elements_in_rect(150.0, 50.0, 10.0, 10.0), r#"["hall"]"#);
    }

    #[test]
    fn validate_scene_reports_lint() {
        let dupes = r#"[
            {"id": "a", "type": "wall", "x": 0, "y": 0, "width": 10, "height": 10},
            {"id": "a", "type": "wall", "x": 0, "y": 0, "width": 10, "height": 10}
        ]"#;
        let report: serde_json::Value = serde_json::from_str(&validate_scene(dupes)).unwrap();
        assert_eq!(report["ok"], true);
        assert_eq!(report["diagnostics"][0]["rule"], "duplicate-id");

        let broken: serde_json::Value = serde_json::from_str(&validate_scene("{")).unwrap();
        assert_eq!(broken["ok"], false);
    }

    #[test]
    fn palette_lists_five_items() {
        let items: serde_json::Value = serde_json::from_str(&palette_json()).unwrap();
        assert_eq!(items.as_array().map(Vec::len), Some(5));
        assert_eq!(items[0]["label"], "Living Space");
        assert_eq!(items[4]["type"], "furniture");
    }
}
