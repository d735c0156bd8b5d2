use crate::element::ElementId;

/// Hands out element ids for one canvas session.
///
/// Ids only ever grow, so an id is never reused after its element is
/// removed, undone, or reset away.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate_id(&mut self) -> ElementId {
        let id = ElementId(self.next);
        self.next += 1;
        id
    }
}
