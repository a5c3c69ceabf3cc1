//! Node queries used inside callbacks
//!
//! [`NodeWrapper`] is a non-owning, possibly empty handle to one node.
//! [`NodeCollection`] is an immutable ordered list of handles; iteration goes
//! through a separate [`Iter`] cursor, so independent walks never share position.

use std::fmt;

use gleaner_dom::{DomTree, ElementData, Node, NodeId, DEFAULT_MAX_DEPTH};
use gleaner_select::{Selector, SelectorError};

/// Handle to a node of a borrowed tree, or to nothing
#[derive(Clone, Copy)]
pub struct NodeWrapper<'d> {
    inner: Option<(&'d DomTree, NodeId)>,
    max_depth: usize,
}

impl<'d> NodeWrapper<'d> {
    /// Wrap `id`; an id unknown to `tree` gives an empty handle
    pub fn new(tree: &'d DomTree, id: NodeId) -> Self {
        Self {
            inner: tree.get(id).map(|_| (tree, id)),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// The handle that points at nothing
    pub fn empty() -> Self {
        Self { inner: None, max_depth: DEFAULT_MAX_DEPTH }
    }

    /// Limit how deep [`find`](Self::find) and [`text`](Self::text) descend
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn wrap(&self, id: NodeId) -> Self {
        match self.inner {
            Some((tree, _)) => Self::new(tree, id).with_max_depth(self.max_depth),
            None => Self::empty(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_none()
    }

    pub fn node_id(&self) -> Option<NodeId> {
        self.inner.map(|(_, id)| id)
    }

    pub fn node(&self) -> Option<&'d Node> {
        let (tree, id) = self.inner?;
        tree.get(id)
    }

    pub fn element(&self) -> Option<&'d ElementData> {
        self.node()?.as_element()
    }

    /// Tag name, for elements
    pub fn tag(&self) -> Option<&'d str> {
        self.element().map(|e| e.tag())
    }

    /// First attribute named `name`
    pub fn attr(&self, name: &str) -> Option<&'d str> {
        self.element()?.get_attr(name)
    }

    pub fn id(&self) -> Option<&'d str> {
        self.element()?.id()
    }

    pub fn classes(&self) -> Vec<&'d str> {
        self.element().map(|e| e.classes().collect()).unwrap_or_default()
    }

    /// Parent node; empty for the document node and for empty handles
    pub fn parent(&self) -> Self {
        match self.inner.and_then(|(tree, id)| tree.parent(id)) {
            Some(parent) => self.wrap(parent),
            None => Self::empty(),
        }
    }

    /// All descendant elements matching `selector`, in document order.
    ///
    /// The node itself is not included. An invalid selector yields an empty
    /// collection; use [`try_find`](Self::try_find) to see the error.
    pub fn find(&self, selector: &str) -> NodeCollection<'d> {
        self.try_find(selector).unwrap_or_else(|err| {
            tracing::warn!("find: {}", err);
            NodeCollection::default()
        })
    }

    pub fn try_find(&self, selector: &str) -> Result<NodeCollection<'d>, SelectorError> {
        Ok(self.find_selector(&Selector::parse(selector)?))
    }

    pub fn find_selector(&self, selector: &Selector) -> NodeCollection<'d> {
        let Some((tree, id)) = self.inner else {
            return NodeCollection::default();
        };
        tree.descendants_with_limit(id, self.max_depth)
            .skip(1)
            .filter(|(_, node)| selector.matches_node(node))
            .map(|(child, _)| self.wrap(child))
            .collect()
    }

    /// Direct children matching `selector` (not recursive).
    /// An invalid selector yields an empty collection.
    pub fn children(&self, selector: &str) -> NodeCollection<'d> {
        self.try_children(selector).unwrap_or_else(|err| {
            tracing::warn!("children: {}", err);
            NodeCollection::default()
        })
    }

    pub fn try_children(&self, selector: &str) -> Result<NodeCollection<'d>, SelectorError> {
        Ok(self.children_selector(&Selector::parse(selector)?))
    }

    pub fn children_selector(&self, selector: &Selector) -> NodeCollection<'d> {
        let Some((tree, id)) = self.inner else {
            return NodeCollection::default();
        };
        tree.children(id)
            .filter(|(_, node)| selector.matches_node(node))
            .map(|(child, _)| self.wrap(child))
            .collect()
    }

    /// Trimmed text payloads under this node, in document order, joined by one space.
    /// Empty handles give the empty string.
    pub fn text(&self) -> String {
        let Some((tree, id)) = self.inner else {
            return String::new();
        };
        tree.descendants_with_limit(id, self.max_depth)
            .filter_map(|(_, node)| node.as_text())
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Text of the first descendant matching `selector`
    pub fn select_text(&self, selector: &str) -> String {
        self.find(selector).first().text()
    }
}

impl Default for NodeWrapper<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for NodeWrapper<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.node_id(), self.node()) {
            (Some(id), Some(node)) => match node.as_element() {
                Some(e) => write!(f, "NodeWrapper({:?} <{}>)", id, e.tag()),
                None => write!(f, "NodeWrapper({:?})", id),
            },
            _ => f.write_str("NodeWrapper(empty)"),
        }
    }
}

/// Ordered, immutable sequence of matched nodes
#[derive(Debug, Clone, Default)]
pub struct NodeCollection<'d> {
    items: Vec<NodeWrapper<'d>>,
}

impl<'d> NodeCollection<'d> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Element at `index`; out of range gives an empty handle
    pub fn eq(&self, index: usize) -> NodeWrapper<'d> {
        self.items.get(index).copied().unwrap_or_default()
    }

    pub fn first(&self) -> NodeWrapper<'d> {
        self.eq(0)
    }

    pub fn last(&self) -> NodeWrapper<'d> {
        self.items.last().copied().unwrap_or_default()
    }

    /// Call `callback` once per element, in collection order
    pub fn each(&self, mut callback: impl FnMut(&NodeWrapper<'d>)) {
        for item in &self.items {
            callback(item);
        }
    }

    /// Fresh cursor over the collection
    pub fn iter(&self) -> Iter<'_, 'd> {
        Iter { inner: self.items.iter() }
    }

    /// `text()` of every element
    pub fn texts(&self) -> Vec<String> {
        self.iter().map(|n| n.text()).collect()
    }
}

impl<'d> FromIterator<NodeWrapper<'d>> for NodeCollection<'d> {
    fn from_iter<I: IntoIterator<Item = NodeWrapper<'d>>>(iter: I) -> Self {
        Self { items: iter.into_iter().collect() }
    }
}

/// Cursor over a [`NodeCollection`]
pub struct Iter<'c, 'd> {
    inner: std::slice::Iter<'c, NodeWrapper<'d>>,
}

impl<'d> Iterator for Iter<'_, 'd> {
    type Item = NodeWrapper<'d>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_, '_> {}

impl<'c, 'd> IntoIterator for &'c NodeCollection<'d> {
    type Item = NodeWrapper<'d>;
    type IntoIter = Iter<'c, 'd>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'d> IntoIterator for NodeCollection<'d> {
    type Item = NodeWrapper<'d>;
    type IntoIter = std::vec::IntoIter<NodeWrapper<'d>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
