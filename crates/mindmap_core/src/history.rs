//! Bounded undo/redo history of structural snapshots.
//!
//! # Responsibility
//! - Keep a linear log of deep-copied `(nodes, edges)` snapshots.
//! - Invalidate the redo tail on push; evict the oldest past capacity.
//!
//! # Invariants
//! - Entries never alias canonical state; later in-place mutation of the
//!   document cannot corrupt history.
//! - `undo` at the first entry and `redo` at the last are silent no-ops.

use crate::model::edge::Edge;
use crate::model::node::Node;

/// Immutable snapshot of the whole graph state at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Linear snapshot log with a cursor.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    entries: Vec<HistoryEntry>,
    cursor: usize,
    capacity: usize,
}

impl HistoryStack {
    /// Creates an empty stack retaining at most `capacity` snapshots.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Records a deep copy of the given state as the newest entry.
    ///
    /// Any entries ahead of the cursor (undone states) are discarded, and
    /// the oldest entry is evicted once the log exceeds capacity.
    pub fn push(&mut self, nodes: &[Node], edges: &[Edge]) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(HistoryEntry {
            nodes: nodes.to_vec(),
            edges: edges.to_vec(),
        });
        if self.entries.len() > self.capacity {
            let excess = self.entries.len() - self.capacity;
            self.entries.drain(0..excess);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Steps the cursor back and returns a copy of that snapshot.
    /// Returns `None` when already at the oldest entry.
    pub fn undo(&mut self) -> Option<HistoryEntry> {
        if self.entries.is_empty() || self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).cloned()
    }

    /// Steps the cursor forward and returns a copy of that snapshot.
    /// Returns `None` when already at the newest entry.
    pub fn redo(&mut self) -> Option<HistoryEntry> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor).cloned()
    }

    /// Number of retained snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current cursor index into the retained snapshots.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::HistoryStack;
    use crate::model::node::Node;

    fn snapshot(label: &str) -> Vec<Node> {
        vec![Node::with_id("n", label, 1)]
    }

    #[test]
    fn undo_at_the_start_is_a_no_op() {
        let mut history = HistoryStack::new(10);
        assert!(history.undo().is_none());
        history.push(&snapshot("s0"), &[]);
        assert!(history.undo().is_none());
    }

    #[test]
    fn push_after_undo_discards_the_redo_tail() {
        let mut history = HistoryStack::new(10);
        history.push(&snapshot("s0"), &[]);
        history.push(&snapshot("s1"), &[]);
        history.push(&snapshot("s2"), &[]);

        let back = history.undo().expect("one step back");
        assert_eq!(back.nodes[0].data.label, "s1");
        history.push(&snapshot("fork"), &[]);

        assert!(history.redo().is_none());
        assert_eq!(history.len(), 3);
        assert_eq!(
            history.undo().expect("back to s1").nodes[0].data.label,
            "s1"
        );
    }

    #[test]
    fn capacity_evicts_the_oldest_entries() {
        let mut history = HistoryStack::new(100);
        for i in 0..150 {
            history.push(&snapshot(&format!("s{i}")), &[]);
        }
        assert_eq!(history.len(), 100);
        // Walk all the way back: the oldest retained snapshot is s50.
        let mut last = None;
        while let Some(entry) = history.undo() {
            last = Some(entry);
        }
        assert_eq!(last.expect("entries present").nodes[0].data.label, "s50");
    }

    #[test]
    fn entries_are_deep_copies() {
        let mut history = HistoryStack::new(10);
        let mut nodes = snapshot("original");
        history.push(&nodes, &[]);
        history.push(&snapshot("second"), &[]);
        nodes[0].data.label = "mutated".to_string();

        let entry = history.undo().expect("first entry");
        assert_eq!(entry.nodes[0].data.label, "original");
    }
}
