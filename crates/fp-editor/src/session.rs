//! One open floor plan: editor, selection, active gesture and view state.
//!
//! `EditorSession` is what a host (the WASM bridge, a native shell, a test)
//! drives. It routes pointer and key events to the select tool, turns tool
//! actions into editor operations, and reconciles the selection after
//! anything that can make it dangle.

use crate::assist::{self, Advisory, LayoutTicket};
use crate::editor::SceneEditor;
use crate::input::{InputEvent, Modifiers};
use crate::inspector::InspectorEdit;
use crate::selection::Selection;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::tools::{SelectTool, ToolAction};
use fp_core::config::EditorConfig;
use fp_core::id::ElementId;
use fp_core::model::{Element, ElementKind, ElementPatch, Scene, ShapeVariant};
use fp_core::palette::palette_item;
use fp_core::scene_io::{scene_from_json, scene_to_json};
use fp_render::extrude::{MeshSpec, project_scene};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Plan2D,
    Render3D,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Plan2D => "2d",
            ViewMode::Render3D => "3d",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "2d" => Some(ViewMode::Plan2D),
            "3d" => Some(ViewMode::Render3D),
            _ => None,
        }
    }
}

pub struct EditorSession {
    editor: SceneEditor,
    selection: Selection,
    tool: SelectTool,
    show_grid: bool,
    view_mode: ViewMode,
}

impl EditorSession {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_scene(config, Scene::new())
    }

    pub fn with_scene(config: EditorConfig, initial: Scene) -> Self {
        Self {
            tool: SelectTool::new(&config),
            editor: SceneEditor::with_scene(config, initial),
            selection: Selection::default(),
            show_grid: true,
            view_mode: ViewMode::default(),
        }
    }

    // ─── State ───────────────────────────────────────────────────────────

    pub fn editor(&self) -> &SceneEditor {
        &self.editor
    }

    pub fn selected_id(&self) -> Option<ElementId> {
        self.selection.id()
    }

    pub fn selected(&self) -> Option<&Element> {
        self.selection.resolve(self.editor.elements())
    }

    /// Select an element by id. Unknown ids clear the selection.
    pub fn select(&mut self, id: Option<ElementId>) {
        self.selection.set(id);
        self.selection.reconcile(self.editor.elements());
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        if mode != self.view_mode {
            self.tool.cancel();
            self.view_mode = mode;
        }
    }

    /// The present scene with any live gesture preview swapped in. This is
    /// what painters draw; it is never committed as-is.
    pub fn visible_elements(&self) -> Cow<'_, [Element]> {
        let elements = self.editor.elements();
        match self.tool.preview() {
            None => Cow::Borrowed(elements),
            Some(preview) => Cow::Owned(
                elements
                    .iter()
                    .map(|e| if e.id == preview.id { preview.clone() } else { e.clone() })
                    .collect(),
            ),
        }
    }

    /// 3D mesh descriptions for the visible scene.
    pub fn meshes(&self) -> Vec<MeshSpec> {
        project_scene(
            &self.visible_elements(),
            self.editor.config().default_vertical_extent(),
        )
    }

    // ─── Editing ─────────────────────────────────────────────────────────

    /// Insert a palette shape at the spawn point and select it.
    pub fn add_from_palette(&mut self, kind: ElementKind, variant: ShapeVariant) -> ElementId {
        self.tool.cancel();
        let config = self.editor.config();
        let template = palette_item(kind).template(variant, config.spawn_x, config.spawn_y);
        let id = self.editor.add_element(&template);
        self.selection.select(id);
        id
    }

    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) {
        self.tool.cancel();
        self.editor.update_element(id, patch);
    }

    /// Apply an inspector field to the selected element. Returns `false`
    /// when nothing is selected or the value was rejected.
    pub fn inspector_edit(&mut self, edit: InspectorEdit) -> bool {
        let Some(id) = self.selected().map(|e| e.id) else {
            return false;
        };
        let Some(patch) = edit.into_patch() else {
            log::debug!("inspector edit rejected for {id}");
            return false;
        };
        self.update_element(id, &patch);
        true
    }

    /// Remove the selected element. Returns `false` when nothing is
    /// selected.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.selected().map(|e| e.id) else {
            return false;
        };
        self.tool.cancel();
        self.editor.remove_element(id);
        self.selection.clear();
        true
    }

    /// Empty the plan. Undoable like any other edit.
    pub fn clear_all(&mut self) {
        self.tool.cancel();
        self.editor.replace_all(Scene::new());
        self.selection.clear();
    }

    pub fn undo(&mut self) -> bool {
        self.tool.cancel();
        let changed = self.editor.undo();
        self.selection.reconcile(self.editor.elements());
        changed
    }

    pub fn redo(&mut self) -> bool {
        self.tool.cancel();
        let changed = self.editor.redo();
        self.selection.reconcile(self.editor.elements());
        changed
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Replace the plan with an imported scene. A rejected import leaves
    /// the plan and its history untouched.
    pub fn import_json(&mut self, json: &str) -> Result<(), String> {
        let scene = scene_from_json(json)?;
        self.load_scene(scene);
        Ok(())
    }

    /// Replace the plan with an already-validated scene (undoable).
    pub fn load_scene(&mut self, scene: Scene) {
        self.tool.cancel();
        self.editor.replace_all(scene);
        self.selection.reconcile(self.editor.elements());
    }

    pub fn export_json(&self) -> Result<String, String> {
        scene_to_json(self.editor.elements())
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Route a pointer event. Returns `true` if the selection, the scene or
    /// the preview changed and the canvas should repaint.
    pub fn handle_pointer(&mut self, event: InputEvent) -> bool {
        if self.view_mode != ViewMode::Plan2D {
            return false;
        }
        let was_active = self.tool.is_active();
        let actions = {
            let elements = self.editor.elements();
            let selected = self.selection.resolve(elements);
            self.tool.handle(&event, elements, selected)
        };
        let acted = !actions.is_empty();
        for action in actions {
            match action {
                ToolAction::Select(id) => self.selection.set(id),
                ToolAction::Update { id, patch } => self.editor.update_element(id, &patch),
            }
        }
        acted || was_active || self.tool.is_active()
    }

    /// Handle a key press. `in_text_field` is set while a form input has
    /// focus; plain keys then belong to the field, not the canvas.
    ///
    /// Returns the resolved action (if any) and whether anything changed.
    pub fn handle_key(
        &mut self,
        key: &str,
        modifiers: Modifiers,
        in_text_field: bool,
    ) -> Option<(ShortcutAction, bool)> {
        if in_text_field && !modifiers.command() {
            return None;
        }
        let action = ShortcutMap::resolve(
            key,
            modifiers.ctrl,
            modifiers.shift,
            modifiers.alt,
            modifiers.meta,
        )?;
        let changed = match action {
            ShortcutAction::Undo => self.undo(),
            ShortcutAction::Redo => self.redo(),
            ShortcutAction::Delete => self.delete_selected(),
            ShortcutAction::ToggleGrid => {
                self.toggle_grid();
                true
            }
            ShortcutAction::Deselect => {
                self.tool.cancel();
                let had = self.selection.id().is_some();
                self.selection.clear();
                had
            }
        };
        Some((action, changed))
    }

    // ─── Assistant ───────────────────────────────────────────────────────

    /// Call before sending a layout request; pass the ticket back with the
    /// response.
    pub fn begin_layout_request(&self) -> LayoutTicket {
        LayoutTicket::issue(&self.editor)
    }

    pub fn apply_generated_layout(
        &mut self,
        ticket: LayoutTicket,
        response: Result<String, String>,
    ) -> Advisory {
        let (advisory, changed) = assist::apply_layout(&mut self.editor, ticket, response);
        if changed {
            self.tool.cancel();
            self.selection.reconcile(self.editor.elements());
        }
        advisory
    }

    pub fn apply_suggestion(&self, response: Result<Option<String>, String>) -> Advisory {
        assist::suggestion_advisory(response)
    }
}
