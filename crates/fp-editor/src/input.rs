//! Input abstraction layer.
//!
//! Normalizes mouse and touch events into plan-space `InputEvent`s. The
//! host converts client coordinates to canvas coordinates before calling in.

/// Modifier key state at the time of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// ⌘ on macOS, Ctrl elsewhere.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A normalized pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Mouse down or touch start.
    PointerDown { x: f32, y: f32, modifiers: Modifiers },
    /// Mouse or touch move.
    PointerMove { x: f32, y: f32, modifiers: Modifiers },
    /// Mouse up, touch end, or the pointer leaving the canvas.
    PointerUp { x: f32, y: f32, modifiers: Modifiers },
}

impl InputEvent {
    pub fn position(&self) -> (f32, f32) {
        match *self {
            Self::PointerDown { x, y, .. }
            | Self::PointerMove { x, y, .. }
            | Self::PointerUp { x, y, .. } => (x, y),
        }
    }
}
