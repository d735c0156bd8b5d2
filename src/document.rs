use std::collections::BTreeMap;

use crate::element::{Element, ElementId};

/// The element list of one canvas snapshot.
///
/// Elements are keyed by id. Ids are handed out in increasing order, so
/// iteration order is creation order, which is both paint order and
/// hit-test precedence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    elements: BTreeMap<ElementId, Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_element(&mut self, element: Element) {
        self.elements.insert(element.id(), element);
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    pub fn remove_element(&mut self, id: ElementId) -> Option<Element> {
        self.elements.remove(&id)
    }

    /// Elements in creation order.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl FromIterator<Element> for Document {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        let mut document = Document::new();
        for element in iter {
            document.add_element(element);
        }
        document
    }
}
