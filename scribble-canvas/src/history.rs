// Undo/redo history for the canvas.
//
// Both stacks hold whole-canvas snapshots. The undo side is a bounded deque:
// pushes and pops happen at the back, capacity eviction drops from the front.

use std::collections::VecDeque;

use tracing::{debug, trace, warn};

use crate::canvas::{Canvas, Snapshot};

pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

/// Largest capacity the config loader accepts. Each state is a full canvas copy.
pub const MAX_HISTORY_CAPACITY: usize = 100;

#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<Snapshot>,
    redo: Vec<Snapshot>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        debug!("Creating history with capacity {}", capacity);
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            capacity,
        }
    }

    /// Records the canvas as it is right before a stroke and drops any redo states.
    pub fn begin_stroke(&mut self, canvas: &Canvas) {
        self.record(canvas.snapshot());
    }

    /// Like [`History::begin_stroke`], for a snapshot taken earlier.
    pub fn record(&mut self, snapshot: Snapshot) {
        self.push_undo(snapshot);
        if !self.redo.is_empty() {
            debug!("Discarding {} redo states", self.redo.len());
            self.redo.clear();
        }
    }

    /// Returns false when there is nothing to undo, or the stored state is from a
    /// canvas of another size; both stacks are then left as they were.
    pub fn undo(&mut self, canvas: &mut Canvas) -> bool {
        let Some(previous) = self.undo.pop_back() else {
            trace!("Undo requested with empty history");
            return false;
        };
        if !canvas.fits(&previous) {
            warn!("Undo state does not fit a {}x{} canvas", canvas.width(), canvas.height());
            self.undo.push_back(previous);
            return false;
        }
        self.redo.push(canvas.snapshot());
        canvas.replace_with(previous);
        debug!(undo = self.undo.len(), redo = self.redo.len(), "Undo applied");
        true
    }

    /// Returns false when there is nothing to redo, or the stored state is from a
    /// canvas of another size.
    pub fn redo(&mut self, canvas: &mut Canvas) -> bool {
        let Some(next) = self.redo.pop() else {
            trace!("Redo requested with empty redo stack");
            return false;
        };
        if !canvas.fits(&next) {
            warn!("Redo state does not fit a {}x{} canvas", canvas.width(), canvas.height());
            self.redo.push(next);
            return false;
        }
        // Capacity applies here too, so undo/redo cycling can't grow the stack.
        self.push_undo(canvas.snapshot());
        canvas.replace_with(next);
        debug!(undo = self.undo.len(), redo = self.redo.len(), "Redo applied");
        true
    }

    fn push_undo(&mut self, snapshot: Snapshot) {
        self.undo.push_back(snapshot);
        while self.undo.len() > self.capacity {
            self.undo.pop_front();
            trace!("Evicted oldest undo state");
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drops every stored state.
    pub fn reset(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

impl Default for History {
    fn default() -> Self {
        History::new(DEFAULT_HISTORY_CAPACITY)
    }
}
