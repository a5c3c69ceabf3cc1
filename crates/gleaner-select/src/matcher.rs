//! Selector matching against DOM nodes

use gleaner_dom::{ElementData, Node};

use crate::Selector;

impl Selector {
    /// Match an element. Every filter that is set must hold:
    /// exact tag (case-sensitive), exact `id`, and each class present
    /// in the whitespace-separated `class` attribute(s).
    pub fn matches(&self, element: &ElementData) -> bool {
        if let Some(tag) = self.tag() {
            if element.tag() != tag {
                return false;
            }
        }

        if let Some(id) = self.id_name() {
            if element.id() != Some(id) {
                return false;
            }
        }

        self.class_names().all(|class| element.has_class(class))
    }

    /// Match any node; only elements can match
    pub fn matches_node(&self, node: &Node) -> bool {
        node.as_element().is_some_and(|e| self.matches(e))
    }
}
