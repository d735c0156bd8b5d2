use crate::document::Document;

/// Linear undo/redo over whole-document snapshots.
///
/// Starts with one empty snapshot. The visible document is always the
/// snapshot at the current index.
#[derive(Debug, Clone)]
pub struct History {
    snapshots: Vec<Document>,
    index: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self {
            snapshots: vec![Document::new()],
            index: 0,
        }
    }

    /// Drop every snapshot after the current one and append `document`.
    pub fn commit(&mut self, document: Document) {
        self.snapshots.truncate(self.index + 1);
        self.snapshots.push(document);
        self.index += 1;
        log::debug!("history commit, {} snapshots", self.snapshots.len());
    }

    /// Replace the current snapshot in place.
    pub fn update(&mut self, document: Document) {
        self.snapshots[self.index] = document;
    }

    /// Abandon the current snapshot and everything after it, stepping back
    /// to the previous one. Used when a freshly opened step turns out empty.
    pub fn rollback(&mut self) {
        if self.index == 0 {
            return;
        }
        self.snapshots.truncate(self.index);
        self.index -= 1;
    }

    pub fn undo(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn redo(&mut self) -> bool {
        if self.index + 1 >= self.snapshots.len() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn current(&self) -> &Document {
        &self.snapshots[self.index]
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.snapshots.len()
    }

    /// Number of snapshots, the initial empty one included.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }
}
