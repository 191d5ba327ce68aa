// SPDX-License-Identifier: MIT OR Apache-2.0
//! Snapshot-based undo/redo history.
//!
//! The history is a linear sequence of full-state snapshots with a single
//! cursor. Undo and redo move the cursor; recording after an undo discards
//! everything past the cursor. When the cap is reached the oldest entry is
//! dropped and the cursor stays put, so undo depth at the cap is unchanged.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use thiserror::Error;

/// Maximum undo history depth
const MAX_HISTORY: usize = 100;

/// History errors
#[derive(Debug, Error)]
pub enum HistoryError {
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

/// Result type for history operations
pub type Result<T> = std::result::Result<T, HistoryError>;

/// An immutable serialized snapshot of the full document state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Serialized state
    pub data: Vec<u8>,
    /// Size in bytes
    pub size: usize,
}

impl HistoryEntry {
    /// Create from serializable state
    pub fn from_value<T: Serialize>(value: &T) -> Result<Self> {
        let data = bincode::serialize(value)?;
        let size = data.len();
        Ok(Self { data, size })
    }

    /// Deserialize back to state
    pub fn to_value<T: for<'de> Deserialize<'de>>(&self) -> Result<T> {
        Ok(bincode::deserialize(&self.data)?)
    }
}

/// Undo/redo history manager
#[derive(Debug)]
pub struct History {
    /// Recorded entries, oldest first
    entries: VecDeque<HistoryEntry>,
    /// Index of the entry representing the current state
    cursor: usize,
    /// Maximum history depth
    max_depth: usize,
}

impl History {
    /// Create a new empty history
    pub fn new() -> Self {
        Self::with_max_depth(MAX_HISTORY)
    }

    /// Create with a custom maximum depth
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: 0,
            max_depth,
        }
    }

    /// Record a new entry as the current state.
    ///
    /// Any redo branch past the cursor is discarded first. Over the cap, the
    /// oldest entry is dropped instead of advancing the cursor.
    pub fn record(&mut self, entry: HistoryEntry) {
        if self.cursor + 1 < self.entries.len() {
            self.entries.truncate(self.cursor + 1);
        }

        self.entries.push_back(entry);

        if self.entries.len() > self.max_depth {
            self.entries.pop_front();
        } else if self.entries.len() > 1 {
            self.cursor += 1;
        }
    }

    /// Step the cursor back and return the entry to restore.
    ///
    /// Returns `None` at the beginning of history; that is a no-op, not an
    /// error.
    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        if self.cursor == 0 || self.entries.is_empty() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Step the cursor forward and return the entry to restore.
    ///
    /// Returns `None` at the end of history.
    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current cursor position
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(tag: u32) -> HistoryEntry {
        HistoryEntry::from_value(&tag).unwrap()
    }

    fn tag_of(entry: &HistoryEntry) -> u32 {
        entry.to_value().unwrap()
    }

    #[test]
    fn test_undo_redo_walk() {
        let mut history = History::new();
        history.record(entry(0)); // A
        history.record(entry(1)); // B
        history.record(entry(2)); // C

        assert_eq!(history.undo().map(tag_of), Some(1));
        assert_eq!(history.undo().map(tag_of), Some(0));
        assert_eq!(history.redo().map(tag_of), Some(1));
    }

    #[test]
    fn test_boundaries_are_no_ops() {
        let mut history = History::new();
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());

        history.record(entry(0));
        assert!(history.undo().is_none());
        assert!(history.redo().is_none());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_record_after_undo_discards_redo_branch() {
        let mut history = History::new();
        history.record(entry(0)); // A
        history.record(entry(1)); // B
        history.record(entry(2)); // C
        history.undo();
        history.undo(); // back at A
        history.record(entry(3)); // D

        assert!(!history.can_redo());
        assert_eq!(history.len(), 2);
        assert_eq!(history.undo().map(tag_of), Some(0));
        assert_eq!(history.redo().map(tag_of), Some(3));
    }

    #[test]
    fn test_cap_drops_oldest_without_moving_cursor() {
        let mut history = History::new();
        for i in 0..101u32 {
            history.record(entry(i));
        }

        assert_eq!(history.len(), 100);
        assert_eq!(history.cursor(), 99);
        // oldest entry (tag 0) was discarded; first undo lands on tag 99
        assert_eq!(history.undo().map(tag_of), Some(99));

        let mut steps = 1;
        while history.undo().is_some() {
            steps += 1;
        }
        assert_eq!(steps, 99);
    }

    #[test]
    fn test_small_cap() {
        let mut history = History::with_max_depth(3);
        for i in 0..5u32 {
            history.record(entry(i));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.undo().map(tag_of), Some(3));
        assert_eq!(history.undo().map(tag_of), Some(2));
        assert!(history.undo().is_none());
    }
}
