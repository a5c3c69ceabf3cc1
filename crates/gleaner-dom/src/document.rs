//! Document - parsed tree plus where it came from

use crate::{DomTree, NodeId};

/// HTML Document
#[derive(Debug, Clone)]
pub struct Document {
    /// The DOM tree
    pub tree: DomTree,
    /// Document URL
    url: String,
    /// Recovery messages reported while parsing
    parse_errors: Vec<String>,
}

impl Document {
    /// Create an empty document (document node only)
    pub fn empty(url: &str) -> Self {
        Self {
            tree: DomTree::new(),
            url: url.to_string(),
            parse_errors: Vec::new(),
        }
    }

    /// Wrap an already built tree
    pub fn from_tree(url: &str, tree: DomTree) -> Self {
        Self {
            tree,
            url: url.to_string(),
            parse_errors: Vec::new(),
        }
    }

    /// Get document URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Messages the parser emitted while recovering from malformed markup
    pub fn parse_errors(&self) -> &[String] {
        &self.parse_errors
    }

    /// Record a parser recovery message
    pub fn push_parse_error(&mut self, message: impl Into<String>) {
        self.parse_errors.push(message.into());
    }

    /// Get document title (text of the first `<title>`)
    pub fn title(&self) -> String {
        for (id, node) in self.tree.descendants(self.tree.root()) {
            if node.as_element().is_some_and(|e| e.name == "title") {
                return self.tree.children(id)
                    .filter_map(|(_, child)| child.as_text())
                    .map(str::trim)
                    .collect::<Vec<_>>()
                    .join(" ");
            }
        }
        String::new()
    }

    /// Get the first element whose `id` attribute equals `id`
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.descendants(self.tree.root())
            .find(|(_, node)| node.as_element().and_then(|e| e.id()) == Some(id))
            .map(|(node_id, _)| node_id)
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty("about:blank")
    }
}
