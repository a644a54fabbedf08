//! Integration tests: scene history (fp-editor).
//!
//! Drives `SceneEditor` and `EditorSession` through realistic edit
//! sequences and checks the linear undo/redo contract end to end.

use fp_core::config::EditorConfig;
use fp_core::id::ElementId;
use fp_core::model::*;
use fp_core::palette::{ElementTemplate, palette_item};
use fp_core::scene_from_json;
use fp_editor::SceneEditor;
use fp_editor::input::{InputEvent, Modifiers};
use fp_editor::session::EditorSession;
use pretty_assertions::assert_eq;

fn bedroom() -> Scene {
    scene_from_json(include_str!("fixtures/bedroom.json")).expect("bedroom fixture should load")
}

fn make_editor() -> SceneEditor {
    SceneEditor::with_scene(EditorConfig::default(), bedroom())
}

fn template(kind: ElementKind) -> ElementTemplate {
    palette_item(kind).template(ShapeVariant::Rectangle, 100.0, 100.0)
}

// ─── The room scenario ──────────────────────────────────────────────────

#[test]
fn den_scenario() {
    let mut ed = SceneEditor::new(EditorConfig::default());

    let room = ed.add_element(&template(ElementKind::Room));
    assert_eq!(ed.elements().len(), 5);
    assert_eq!(ed.get(room).and_then(|e| e.label.clone()), None);

    ed.update_element(room, &ElementPatch::label("Den"));
    assert_eq!(ed.elements().len(), 5);
    assert_eq!(ed.get(room).and_then(|e| e.label.as_deref()), Some("Den"));

    assert!(ed.undo());
    assert_eq!(ed.get(room).and_then(|e| e.label.clone()), None);

    assert!(ed.undo());
    assert!(ed.elements().is_empty());

    assert!(ed.redo());
    assert!(ed.redo());
    assert_eq!(ed.elements().len(), 5);
    assert_eq!(ed.get(room).and_then(|e| e.label.as_deref()), Some("Den"));
    assert!(!ed.redo());
}

#[test]
fn room_walls_enclose_the_room() {
    let mut ed = SceneEditor::new(EditorConfig::default());
    ed.add_element(&template(ElementKind::Room));
    let bounds: Vec<(f32, f32, f32, f32)> = ed
        .elements()
        .iter()
        .map(|e| (e.x, e.y, e.width, e.height))
        .collect();
    assert_eq!(
        bounds,
        vec![
            (100.0, 100.0, 160.0, 120.0),
            (90.0, 90.0, 180.0, 10.0),
            (90.0, 220.0, 180.0, 10.0),
            (90.0, 100.0, 10.0, 120.0),
            (260.0, 100.0, 10.0, 120.0),
        ]
    );
    assert_eq!(ed.history().past_len(), 1);
    assert!(ed.undo());
    assert!(ed.elements().is_empty(), "one undo removes room and walls together");
}

// ─── Linear history ─────────────────────────────────────────────────────

#[test]
fn n_operations_then_n_undos_restore_the_original() {
    let original = bedroom();
    let mut ed = make_editor();
    let bed = ElementId::intern("bed");

    ed.add_element(&template(ElementKind::Window));
    ed.update_element(bed, &ElementPatch::position(200.0, 220.0));
    ed.remove_element(ElementId::intern("bedroom_door"));
    ed.add_element(&template(ElementKind::Room));
    ed.replace_all(Scene::new());
    ed.update_element(ElementId::intern("ghost"), &ElementPatch::label("nobody"));

    for _ in 0..6 {
        assert!(ed.undo());
    }
    assert_eq!(ed.elements(), original.as_slice());
    assert!(!ed.undo());
}

#[test]
fn redo_restores_exactly_what_was_undone() {
    let mut ed = make_editor();
    ed.update_element(ElementId::intern("bed"), &ElementPatch::size(90.0, 200.0));
    let edited = ed.elements().to_vec();
    ed.undo();
    ed.redo();
    assert_eq!(ed.elements(), edited.as_slice());
}

#[test]
fn new_edit_after_undo_discards_redo_branch() {
    let mut ed = make_editor();
    ed.add_element(&template(ElementKind::Door));
    ed.add_element(&template(ElementKind::Window));
    ed.undo();
    ed.undo();
    assert_eq!(ed.history().future_len(), 2);

    ed.update_element(ElementId::intern("bed"), &ElementPatch::label("Guest Bed"));
    assert!(!ed.can_redo());
    assert!(!ed.redo());
    assert_eq!(ed.elements().len(), 3);
}

#[test]
fn remove_then_undo_restores_identical_element() {
    let mut ed = make_editor();
    let door = ElementId::intern("bedroom_door");
    let before = ed.get(door).cloned();
    ed.remove_element(door);
    assert!(!ed.contains(door));
    ed.undo();
    assert_eq!(ed.get(door).cloned(), before);
    // Paint order is restored too.
    assert_eq!(ed.elements()[1].id, door);
}

// ─── Capacity ───────────────────────────────────────────────────────────

#[test]
fn oldest_scene_is_unrecoverable_past_capacity() {
    let config = EditorConfig {
        history_capacity: 5,
        ..EditorConfig::default()
    };
    let mut ed = SceneEditor::new(config);
    for _ in 0..6 {
        ed.add_element(&template(ElementKind::Furniture));
    }
    assert_eq!(ed.history().past_len(), 5);
    while ed.undo() {}
    // The empty scene was evicted; the earliest reachable one has one element.
    assert_eq!(ed.elements().len(), 1);
}

#[test]
fn past_never_exceeds_capacity_across_redo() {
    let config = EditorConfig {
        history_capacity: 3,
        ..EditorConfig::default()
    };
    let mut ed = SceneEditor::new(config);
    for _ in 0..3 {
        ed.add_element(&template(ElementKind::Wall));
    }
    ed.undo();
    while ed.redo() {
        assert!(ed.history().past_len() <= 3);
    }
    assert_eq!(ed.history().past_len(), 3);
}

// ─── Session ────────────────────────────────────────────────────────────

#[test]
fn session_drag_then_undo_redo() {
    let mut s = EditorSession::with_scene(EditorConfig::default(), bedroom());
    let bed = ElementId::intern("bed");
    let mods = Modifiers::default();

    s.handle_pointer(InputEvent::PointerDown {
        x: 150.0,
        y: 150.0,
        modifiers: mods,
    });
    assert_eq!(s.selected_id(), Some(bed));
    s.handle_pointer(InputEvent::PointerMove {
        x: 230.0,
        y: 190.0,
        modifiers: mods,
    });
    s.handle_pointer(InputEvent::PointerUp {
        x: 230.0,
        y: 190.0,
        modifiers: mods,
    });

    let moved = s.editor().get(bed).map(|e| (e.x, e.y));
    assert_eq!(moved, Some((220.0, 180.0)));
    assert_eq!(s.editor().history().past_len(), 1);

    s.handle_key("z", Modifiers { meta: true, ..mods }, false);
    assert_eq!(s.editor().get(bed).map(|e| (e.x, e.y)), Some((140.0, 140.0)));
    s.handle_key("Z", Modifiers { meta: true, shift: true, ..mods }, false);
    assert_eq!(s.editor().get(bed).map(|e| (e.x, e.y)), Some((220.0, 180.0)));
    assert_eq!(s.selected_id(), Some(bed));
}

#[test]
fn session_selection_follows_the_scene() {
    let mut s = EditorSession::with_scene(EditorConfig::default(), bedroom());
    s.select(Some(ElementId::intern("bedroom_door")));
    s.delete_selected();
    assert_eq!(s.selected_id(), None);

    s.select(Some(ElementId::intern("bed")));
    s.clear_all();
    assert_eq!(s.selected_id(), None);
    assert!(s.undo());
    assert_eq!(s.editor().elements().len(), 2);

    s.select(Some(ElementId::intern("no_such_thing")));
    assert_eq!(s.selected_id(), None);
}
