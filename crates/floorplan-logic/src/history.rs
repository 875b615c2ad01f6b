//! Linear undo/redo over whole-state snapshots.
//!
//! Each entry stores the state before and after one discrete edit. The
//! cursor counts applied entries, so the externally visible
//! [`History::index`] is `cursor - 1` and ranges over `[-1, len - 1]`, with
//! `-1` meaning nothing left to undo.
//!
//! Pushing after an undo drops the redo future. Once `capacity` is
//! exceeded the oldest entry is evicted.
//!
//! Snapshots are expected to be cheap to clone (the paint grid shares its
//! cells through an `Arc`), so keeping both sides of every edit costs one
//! pointer per side until the state diverges.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
struct Entry<S> {
    before: S,
    after: S,
}

#[derive(Debug, Clone)]
pub struct History<S> {
    entries: VecDeque<Entry<S>>,
    cursor: usize,
    capacity: usize,
}

impl<S: Clone> History<S> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Record an edit that turned `before` into `after`.
    pub fn push(&mut self, before: S, after: S) {
        self.entries.truncate(self.cursor);
        self.entries.push_back(Entry { before, after });
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len();
    }

    /// Step back one edit, returning the state to restore.
    pub fn undo(&mut self) -> Option<&S> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor].before)
    }

    /// Re-apply the next undone edit, returning the state to restore.
    pub fn redo(&mut self) -> Option<&S> {
        if self.cursor == self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor - 1].after)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Position of the current state, `-1` when nothing is applied.
    pub fn index(&self) -> isize {
        self.cursor as isize - 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}
