//! Current selection, kept beside (not inside) the history.
//!
//! The selection is just an id. It may outlive its element — after a
//! delete, an undo past the element's creation, or a bulk replace — so
//! every lookup goes through the present scene and a dangling id resolves
//! to "nothing selected".

use fp_core::id::ElementId;
use fp_core::model::Element;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<ElementId>,
}

impl Selection {
    pub fn select(&mut self, id: ElementId) {
        self.selected = Some(id);
    }

    pub fn set(&mut self, id: Option<ElementId>) {
        self.selected = id;
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// The raw selected id, which may no longer exist.
    pub fn id(&self) -> Option<ElementId> {
        self.selected
    }

    /// The selected element, if it still exists in `elements`.
    pub fn resolve<'a>(&self, elements: &'a [Element]) -> Option<&'a Element> {
        let id = self.selected?;
        elements.iter().find(|e| e.id == id)
    }

    /// Drop the selection if its element is gone. Returns `true` if it was
    /// cleared.
    pub fn reconcile(&mut self, elements: &[Element]) -> bool {
        if self.selected.is_some() && self.resolve(elements).is_none() {
            log::debug!("selection {:?} no longer exists; clearing", self.selected);
            self.selected = None;
            return true;
        }
        false
    }
}
