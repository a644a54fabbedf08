//! Linear undo/redo history over whole-scene snapshots.
//!
//! The history is the triple `(past, present, future)`. A commit pushes the
//! old present onto `past` and discards the redo branch; undo and redo move
//! exactly one snapshot between the three. `past` never holds more than
//! `capacity` snapshots: pushes beyond that evict the oldest entry, on
//! commit and on redo alike.

use fp_core::model::Scene;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct History {
    /// Oldest at the front, most recent at the back.
    past: VecDeque<Scene>,
    present: Scene,
    /// Next redo at the front.
    future: VecDeque<Scene>,
    /// Maximum undo depth.
    capacity: usize,
}

impl History {
    pub fn new(initial: Scene, capacity: usize) -> Self {
        Self {
            past: VecDeque::with_capacity(capacity.min(64)),
            present: initial,
            future: VecDeque::new(),
            capacity,
        }
    }

    pub fn present(&self) -> &Scene {
        &self.present
    }

    /// Replace the present with `next`. The old present becomes the most
    /// recent undo entry and the redo branch is discarded.
    pub fn commit(&mut self, next: Scene) {
        let previous = std::mem::replace(&mut self.present, next);
        self.push_past(previous);
        self.future.clear();
        log::debug!(
            "commit: {} elements, past={} future=0",
            self.present.len(),
            self.past.len()
        );
    }

    /// Step back one snapshot. Returns `false` (and changes nothing) when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        log::debug!(
            "undo: past={} future={}",
            self.past.len(),
            self.future.len()
        );
        true
    }

    /// Re-apply the most recently undone snapshot. Returns `false` when the
    /// redo branch is empty.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.push_past(current);
        log::debug!(
            "redo: past={} future={}",
            self.past.len(),
            self.future.len()
        );
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the undo depth. Existing entries are kept until the next push.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
    }

    fn push_past(&mut self, scene: Scene) {
        self.past.push_back(scene);
        while self.past.len() > self.capacity {
            self.past.pop_front();
        }
    }
}
