//! The scene history manager.
//!
//! `SceneEditor` owns the canonical scene and is the only way to change it.
//! Every editing surface (canvas tools, inspector, import, generated
//! layouts) goes through one of the operations below, and each operation is
//! exactly one history entry.
//!
//! The operations are total: a missing id is not an error, it simply leaves
//! the scene as it was while still consuming an undo slot.

use crate::history::History;
use fp_core::config::EditorConfig;
use fp_core::id::ElementId;
use fp_core::model::{Element, ElementPatch, Scene};
use fp_core::palette::{ElementTemplate, perimeter_walls};

pub struct SceneEditor {
    history: History,
    config: EditorConfig,
    /// Bumped on every change to `present` (commit, undo, redo).
    revision: u64,
}

impl SceneEditor {
    /// Start from an empty scene.
    pub fn new(config: EditorConfig) -> Self {
        Self::with_scene(config, Scene::new())
    }

    /// Start from a previously persisted scene. The scene is trusted; run
    /// it through the import boundary first if it came from outside.
    pub fn with_scene(config: EditorConfig, initial: Scene) -> Self {
        Self {
            history: History::new(initial, config.history_capacity),
            config,
            revision: 0,
        }
    }

    // ─── Reads ───────────────────────────────────────────────────────────

    /// The present scene, in paint order.
    pub fn elements(&self) -> &[Element] {
        self.history.present()
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements().iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_some()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Monotonic change counter. A persister can save whenever it moves;
    /// async callers use it to notice intervening edits.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ─── Operations ──────────────────────────────────────────────────────

    /// Replace the present scene wholesale. No validation.
    pub fn commit(&mut self, next: Scene) {
        self.history.commit(next);
        self.revision += 1;
    }

    /// Append a new element built from `template` and return its id.
    ///
    /// A rectangular room also gets four perimeter walls; room and walls
    /// land in the same history entry.
    pub fn add_element(&mut self, template: &ElementTemplate) -> ElementId {
        let extent = self.config.default_vertical_extent();
        let mut next = self.elements().to_vec();

        let id = fresh_id(&next, template);
        let element = template.instantiate(id, extent);
        let walls = if template.wants_perimeter() {
            Some(perimeter_walls(&element, self.config.wall_thickness))
        } else {
            None
        };
        next.push(element);
        for wall in walls.iter().flatten() {
            let wall_id = fresh_id(&next, wall);
            next.push(wall.instantiate(wall_id, extent));
        }

        log::debug!("add_element {id} ({})", template.kind.as_str());
        self.commit(next);
        id
    }

    /// Merge `patch` into the element with `id`. Commits even if no
    /// element matches.
    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) {
        let mut next = self.elements().to_vec();
        match next.iter_mut().find(|e| e.id == id) {
            Some(el) => patch.apply_to(el),
            None => log::debug!("update_element: no element {id}"),
        }
        self.commit(next);
    }

    /// Drop the element with `id`. Commits even if no element matches.
    pub fn remove_element(&mut self, id: ElementId) {
        let next: Scene = self
            .elements()
            .iter()
            .filter(|e| e.id != id)
            .cloned()
            .collect();
        self.commit(next);
    }

    /// Swap in a whole new scene (generated layout, import, clear-all).
    pub fn replace_all(&mut self, elements: Scene) {
        self.commit(elements);
    }

    /// Returns `true` if the scene changed.
    pub fn undo(&mut self) -> bool {
        let changed = self.history.undo();
        if changed {
            self.revision += 1;
        }
        changed
    }

    /// Returns `true` if the scene changed.
    pub fn redo(&mut self) -> bool {
        let changed = self.history.redo();
        if changed {
            self.revision += 1;
        }
        changed
    }
}

fn fresh_id(scene: &[Element], template: &ElementTemplate) -> ElementId {
    ElementId::fresh(template.kind.as_str(), |id| scene.iter().any(|e| e.id == id))
}
