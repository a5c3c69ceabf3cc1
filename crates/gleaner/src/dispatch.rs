//! Tree walk and callback dispatch
//!
//! One pre-order pass over the document. Each element is resolved against the
//! ranked registry and at most one callback fires for it.

use gleaner_dom::Document;

use crate::{NodeWrapper, Registry};

/// Counters from one dispatch pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    /// Nodes visited, text and document nodes included
    pub visited: usize,
    /// Elements for which a callback fired
    pub matched: usize,
    /// Whether the depth limit cut off part of the tree
    pub truncated: bool,
}

/// Walk `document` and invoke the winning callback for each element
pub fn dispatch(registry: &mut Registry<'_>, document: &Document, max_depth: usize) -> DispatchStats {
    let tree = document.tree();
    let mut stats = DispatchStats::default();

    if registry.is_empty() {
        tracing::debug!("No selectors registered, skipping walk of {}", document.url());
        return stats;
    }

    let mut walk = tree.descendants_with_limit(tree.root(), max_depth);
    for (id, node) in walk.by_ref() {
        stats.visited += 1;
        let Some(element) = node.as_element() else {
            continue;
        };
        if let Some(index) = registry.resolve_index(element) {
            stats.matched += 1;
            let wrapper = NodeWrapper::new(tree, id).with_max_depth(max_depth);
            registry.invoke(index, &wrapper);
        }
    }
    stats.truncated = walk.truncated();

    tracing::debug!(
        "Dispatched {}: {} nodes visited, {} callbacks",
        document.url(),
        stats.visited,
        stats.matched
    );
    stats
}
