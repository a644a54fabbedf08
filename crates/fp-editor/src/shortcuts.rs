//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s. The map lives
//! in Rust so the browser bridge and native hosts agree on bindings.

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Undo,
    Redo,
    /// Remove the selected element.
    Delete,
    ToggleGrid,
    Deselect,
}

impl ShortcutAction {
    /// Name reported to the host.
    pub fn as_str(self) -> &'static str {
        match self {
            ShortcutAction::Undo => "undo",
            ShortcutAction::Redo => "redo",
            ShortcutAction::Delete => "delete",
            ShortcutAction::ToggleGrid => "toggleGrid",
            ShortcutAction::Deselect => "deselect",
        }
    }
}

/// Resolves key events into shortcut actions.
///
/// Uses platform-aware modifier detection: on macOS `meta` is ⌘,
/// on other platforms `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"z"`, `"Delete"`).
    /// Returns `None` if the key combo has no binding.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        _alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        let cmd = ctrl || meta;

        if cmd && shift {
            return match key {
                "z" | "Z" => Some(ShortcutAction::Redo),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "z" => Some(ShortcutAction::Undo),
                "y" => Some(ShortcutAction::Redo),
                _ => None,
            };
        }

        match key {
            "Delete" | "Backspace" => Some(ShortcutAction::Delete),
            "g" => Some(ShortcutAction::ToggleGrid),
            "Escape" => Some(ShortcutAction::Deselect),
            _ => None,
        }
    }
}
