//! Pre-order tree walk
//!
//! Iterative depth-first traversal over a [`DomTree`] with an explicit stack.
//! Children are pushed last-to-first so nodes come out in document order.

use crate::{DomTree, Node, NodeId};

/// Depth limit used when the caller has no opinion
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Pre-order iterator over a subtree, starting node included.
///
/// Nodes deeper than `max_depth` (the start node has depth 0) are neither
/// yielded nor entered; [`Descendants::truncated`] reports whether that happened.
pub struct Descendants<'a> {
    tree: &'a DomTree,
    stack: Vec<(NodeId, usize)>,
    max_depth: usize,
    truncated: bool,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(tree: &'a DomTree, start: NodeId, max_depth: usize) -> Self {
        let mut stack = Vec::with_capacity(32);
        if tree.get(start).is_some() {
            stack.push((start, 0));
        }
        Self {
            tree,
            stack,
            max_depth,
            truncated: false,
        }
    }

    /// Whether some subtree was cut off by the depth limit
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Depth of the next node to be yielded, if any
    pub fn peek_depth(&self) -> Option<usize> {
        self.stack.last().map(|&(_, depth)| depth)
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        let node = self.tree.get(id)?;

        if node.first_child.is_valid() {
            if depth < self.max_depth {
                let mut child = node.last_child;
                while let Some(c) = self.tree.get(child) {
                    self.stack.push((child, depth + 1));
                    child = c.prev_sibling;
                }
            } else if !self.truncated {
                self.truncated = true;
                tracing::warn!("Depth limit {} reached, skipping deeper nodes", self.max_depth);
            }
        }

        Some((id, node))
    }
}

impl DomTree {
    /// Walk the subtree under `start` (inclusive) in document order
    pub fn descendants(&self, start: NodeId) -> Descendants<'_> {
        Descendants::new(self, start, DEFAULT_MAX_DEPTH)
    }

    /// Walk the subtree under `start` (inclusive), entering at most `max_depth` levels
    pub fn descendants_with_limit(&self, start: NodeId, max_depth: usize) -> Descendants<'_> {
        Descendants::new(self, start, max_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag_of(tree: &DomTree, id: NodeId) -> String {
        match tree.get(id).and_then(|n| n.as_element()) {
            Some(e) => e.name.clone(),
            None => "#".to_string(),
        }
    }

    /// div > (p > em), ul > (li, li)
    fn sample() -> DomTree {
        let mut tree = DomTree::new();
        let div = tree.create_element("div");
        let p = tree.create_element("p");
        let em = tree.create_element("em");
        let ul = tree.create_element("ul");
        let li1 = tree.create_element("li");
        let li2 = tree.create_element("li");
        tree.append_child(tree.root(), div);
        tree.append_child(div, p);
        tree.append_child(p, em);
        tree.append_child(div, ul);
        tree.append_child(ul, li1);
        tree.append_child(ul, li2);
        tree
    }

    #[test]
    fn test_document_order() {
        let tree = sample();
        let tags: Vec<_> = tree.descendants(tree.root())
            .map(|(id, _)| tag_of(&tree, id))
            .collect();
        assert_eq!(tags, vec!["#", "div", "p", "em", "ul", "li", "li"]);
    }

    #[test]
    fn test_depth_limit() {
        let tree = sample();
        let mut walk = tree.descendants_with_limit(tree.root(), 2);
        let tags: Vec<_> = walk.by_ref().map(|(id, _)| tag_of(&tree, id)).collect();

        assert_eq!(tags, vec!["#", "div", "p", "ul"]);
        assert!(walk.truncated());
    }

    #[test]
    fn test_no_truncation_when_shallow() {
        let tree = sample();
        let mut walk = tree.descendants_with_limit(tree.root(), 3);
        assert_eq!(walk.by_ref().count(), 7);
        assert!(!walk.truncated());
    }

    #[test]
    fn test_deep_chain_does_not_recurse() {
        let mut tree = DomTree::new();
        let mut parent = tree.root();
        for _ in 0..100_000 {
            let div = tree.create_element("div");
            tree.append_child(parent, div);
            parent = div;
        }
        assert_eq!(tree.descendants_with_limit(tree.root(), usize::MAX).count(), 100_001);
    }

    #[test]
    fn test_unknown_start() {
        let tree = sample();
        assert_eq!(tree.descendants(NodeId::NONE).count(), 0);
    }
}
