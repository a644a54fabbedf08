//! Canvas select/move/resize tool.
//!
//! Pointer-down picks a gesture: the selected element's resize handle
//! starts a resize, any other element is selected and starts a move, and
//! empty canvas clears the selection. While the pointer moves the gesture
//! only updates a live preview; pointer-up turns the whole gesture into a
//! single `update_element`, so one drag is one undo step.
//!
//! ## Modifier behaviors
//!
//! | Modifier | Move | Resize |
//! |----------|------|--------|
//! | **Shift** | Lock to the dominant axis | — |

use crate::input::InputEvent;
use fp_core::config::EditorConfig;
use fp_core::id::ElementId;
use fp_core::model::{Element, ElementPatch};
use fp_render::hit::{hit_test, resize_handle_hit};

/// What the host should do in response to an event.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolAction {
    /// Change the selection (`None` clears it).
    Select(Option<ElementId>),
    /// Commit a finished gesture.
    Update { id: ElementId, patch: ElementPatch },
}

#[derive(Debug, Clone)]
enum Gesture {
    Idle,
    Moving {
        original: Element,
        preview: Element,
        /// Pointer position relative to the element anchor at grab time.
        grab_dx: f32,
        grab_dy: f32,
    },
    Resizing {
        original: Element,
        preview: Element,
    },
}

/// Snap a plan coordinate to the nearest grid line.
pub fn snap(v: f32, grid: f32) -> f32 {
    (v / grid).round() * grid
}

pub struct SelectTool {
    gesture: Gesture,
    grid: f32,
    handle_radius: f32,
}

impl SelectTool {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            gesture: Gesture::Idle,
            grid: config.grid_size,
            handle_radius: config.handle_radius,
        }
    }

    /// The element as it currently looks mid-gesture, if a gesture is
    /// active. Painters draw this in place of the committed element.
    pub fn preview(&self) -> Option<&Element> {
        match &self.gesture {
            Gesture::Idle => None,
            Gesture::Moving { preview, .. } | Gesture::Resizing { preview, .. } => Some(preview),
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }

    /// Abandon the current gesture without committing anything.
    pub fn cancel(&mut self) {
        self.gesture = Gesture::Idle;
    }

    /// Handle an event against the present scene and current selection.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        elements: &[Element],
        selected: Option<&Element>,
    ) -> Vec<ToolAction> {
        match *event {
            InputEvent::PointerDown { x, y, .. } => self.pointer_down(x, y, elements, selected),
            InputEvent::PointerMove { x, y, modifiers } => {
                self.pointer_move(x, y, modifiers.shift);
                vec![]
            }
            InputEvent::PointerUp { .. } => self.pointer_up(),
        }
    }

    fn pointer_down(
        &mut self,
        x: f32,
        y: f32,
        elements: &[Element],
        selected: Option<&Element>,
    ) -> Vec<ToolAction> {
        if let Some(el) = selected
            && resize_handle_hit(el, x, y, self.handle_radius)
        {
            self.gesture = Gesture::Resizing {
                original: el.clone(),
                preview: el.clone(),
            };
            return vec![];
        }

        let hit = hit_test(elements, x, y).and_then(|id| elements.iter().find(|e| e.id == id));
        match hit {
            Some(el) => {
                self.gesture = Gesture::Moving {
                    original: el.clone(),
                    preview: el.clone(),
                    grab_dx: x - el.x,
                    grab_dy: y - el.y,
                };
                vec![ToolAction::Select(Some(el.id))]
            }
            None => {
                self.gesture = Gesture::Idle;
                vec![ToolAction::Select(None)]
            }
        }
    }

    fn pointer_move(&mut self, x: f32, y: f32, axis_lock: bool) {
        let grid = self.grid;
        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Moving {
                original,
                preview,
                grab_dx,
                grab_dy,
            } => {
                let mut nx = snap(x - *grab_dx, grid);
                let mut ny = snap(y - *grab_dy, grid);
                if axis_lock {
                    if (nx - original.x).abs() >= (ny - original.y).abs() {
                        ny = original.y;
                    } else {
                        nx = original.x;
                    }
                }
                preview.x = nx;
                preview.y = ny;
            }
            Gesture::Resizing { preview, .. } => {
                preview.width = snap(x - preview.x, grid).max(grid);
                preview.height = snap(y - preview.y, grid).max(grid);
            }
        }
    }

    fn pointer_up(&mut self) -> Vec<ToolAction> {
        let (id, patch) = match std::mem::replace(&mut self.gesture, Gesture::Idle) {
            Gesture::Idle => return vec![],
            Gesture::Moving {
                original, preview, ..
            } => (
                original.id,
                (preview.x != original.x || preview.y != original.y)
                    .then(|| ElementPatch::position(preview.x, preview.y)),
            ),
            Gesture::Resizing { original, preview } => (
                original.id,
                (preview.width != original.width || preview.height != original.height)
                    .then(|| ElementPatch::size(preview.width, preview.height)),
            ),
        };
        patch
            .map(|patch| vec![ToolAction::Update { id, patch }])
            .unwrap_or_default()
    }
}
