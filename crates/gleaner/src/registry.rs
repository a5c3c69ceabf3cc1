//! Selector registry
//!
//! Entries are kept ranked by descending weight at all times; an insertion
//! lands after every entry of equal or higher weight, so equal-weight
//! selectors keep registration order and no sort is needed at visit time.

use std::fmt;

use gleaner_dom::ElementData;
use gleaner_select::{Selector, SelectorError};

use crate::NodeWrapper;

/// Callback invoked with the node that a selector won
pub type Callback<'a> = Box<dyn FnMut(&NodeWrapper<'_>) + 'a>;

struct Entry<'a> {
    selector: Selector,
    callback: Callback<'a>,
}

/// Ranked (selector, callback) pairs keyed by raw selector string
#[derive(Default)]
pub struct Registry<'a> {
    entries: Vec<Entry<'a>>,
}

impl<'a> Registry<'a> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Register `callback` for `raw`.
    ///
    /// Re-registering the same raw string replaces the callback and keeps the
    /// entry's rank. Invalid selectors are rejected and leave the registry as is.
    pub fn register(
        &mut self,
        raw: &str,
        callback: impl FnMut(&NodeWrapper<'_>) + 'a,
    ) -> Result<&Selector, SelectorError> {
        let selector = Selector::parse(raw)?;

        let index = match self.position(raw) {
            Some(index) => {
                tracing::debug!("Replacing callback for {:?}", raw);
                self.entries[index].callback = Box::new(callback);
                index
            }
            None => {
                let weight = selector.weight();
                let index = self.entries.partition_point(|e| e.selector.weight() >= weight);
                tracing::debug!("Registered {:?} (weight {}) at rank {}", raw, weight, index);
                self.entries.insert(index, Entry {
                    selector,
                    callback: Box::new(callback),
                });
                index
            }
        };
        Ok(&self.entries[index].selector)
    }

    /// Drop the entry for `raw`; returns whether one existed
    pub fn unregister(&mut self, raw: &str) -> bool {
        match self.position(raw) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    fn position(&self, raw: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.selector.raw() == raw)
    }

    /// Highest-ranked selector matching `element`
    pub fn resolve(&self, element: &ElementData) -> Option<&Selector> {
        self.resolve_index(element).map(|i| &self.entries[i].selector)
    }

    pub(crate) fn resolve_index(&self, element: &ElementData) -> Option<usize> {
        self.entries.iter().position(|e| e.selector.matches(element))
    }

    pub(crate) fn invoke(&mut self, index: usize, node: &NodeWrapper<'_>) {
        if let Some(entry) = self.entries.get_mut(index) {
            (entry.callback)(node);
        }
    }

    /// Selectors in rank order
    pub fn selectors(&self) -> impl Iterator<Item = &Selector> {
        self.entries.iter().map(|e| &e.selector)
    }

    pub fn contains(&self, raw: &str) -> bool {
        self.position(raw).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Registry<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| (e.selector.raw(), e.selector.weight())))
            .finish()
    }
}
