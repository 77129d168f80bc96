//! Track stack and undo history.
//!
//! The stack keeps its top at the end of the backing vector; all callers go
//! through `peek_top` / `pop` / `push_back` so the empty and single-entry cases
//! are handled in one place.

use std::collections::HashSet;

use super::types::{Source, TrackEntry};

#[derive(Clone, Debug, Default)]
pub struct TrackStack {
    entries: Vec<TrackEntry>,
}

impl TrackStack {
    /// Build a stack whose first presented entry is `entries[0]`.
    ///
    /// Duplicate track ids keep their first occurrence.
    pub fn from_presentation_order(entries: Vec<TrackEntry>) -> Self {
        let mut seen = HashSet::new();
        let mut unique: Vec<TrackEntry> = entries
            .into_iter()
            .filter(|e| seen.insert(e.track.id.clone()))
            .collect();
        unique.reverse();
        Self { entries: unique }
    }

    pub fn peek_top(&self) -> Option<&TrackEntry> {
        self.entries.last()
    }

    pub fn pop(&mut self) -> Option<TrackEntry> {
        self.entries.pop()
    }

    /// Put an entry on top of the stack.
    pub fn push_back(&mut self, entry: TrackEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn contains(&self, track_id: &str) -> bool {
        self.entries.iter().any(|e| e.track.id == track_id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries from the top down, i.e. in presentation order.
    pub fn iter_from_top(&self) -> impl Iterator<Item = &TrackEntry> {
        self.entries.iter().rev()
    }
}

/// A rejected entry together with the collection it was deleted from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemovedEntry {
    pub entry: TrackEntry,
    pub source: Source,
}

/// LIFO record of deletions available for reversal
#[derive(Clone, Debug, Default)]
pub struct UndoHistory {
    records: Vec<RemovedEntry>,
}

impl UndoHistory {
    pub fn push(&mut self, entry: TrackEntry, source: Source) {
        self.records.push(RemovedEntry { entry, source });
    }

    pub fn pop(&mut self) -> Option<RemovedEntry> {
        self.records.pop()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[cfg(test)]
    pub fn contains(&self, track_id: &str) -> bool {
        self.records.iter().any(|r| r.entry.track.id == track_id)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::entry;

    #[test]
    fn presentation_order_puts_first_entry_on_top() {
        let stack = TrackStack::from_presentation_order(vec![entry("a"), entry("b"), entry("c")]);
        assert_eq!(stack.peek_top().map(|e| e.id()), Some("a"));
        let order: Vec<&str> = stack.iter_from_top().map(|e| e.id()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let stack = TrackStack::from_presentation_order(vec![entry("a"), entry("b"), entry("a")]);
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.peek_top().map(|e| e.id()), Some("a"));
    }

    #[test]
    fn singleton_pop_leaves_empty_stack() {
        let mut stack = TrackStack::from_presentation_order(vec![entry("a")]);
        assert_eq!(stack.pop().map(|e| e.track.id), Some("a".to_string()));
        assert!(stack.is_empty());
        assert!(stack.peek_top().is_none());
        assert!(stack.pop().is_none());
    }

    #[test]
    fn push_back_becomes_new_top() {
        let mut stack = TrackStack::from_presentation_order(vec![entry("a"), entry("b")]);
        stack.push_back(entry("z"));
        assert_eq!(stack.peek_top().map(|e| e.id()), Some("z"));
        assert_eq!(stack.len(), 3);
    }

    #[test]
    fn history_is_lifo() {
        let mut history = UndoHistory::default();
        history.push(entry("a"), Source::Library);
        history.push(entry("b"), Source::Playlist("p".into()));
        let last = history.pop().unwrap();
        assert_eq!(last.entry.id(), "b");
        assert_eq!(last.source, Source::Playlist("p".into()));
        assert_eq!(history.len(), 1);
    }
}
