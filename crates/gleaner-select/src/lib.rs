//! Gleaner Selectors
//!
//! Compact selectors: an optional tag name followed by `#id` and `.class`
//! qualifiers, e.g. `li`, `ul.main-list`, `div#first`, `#test.radv.test`.
//! No combinators, attribute or pseudo selectors.

mod parser;
mod matcher;

pub use parser::Selector;

/// Weight contributed by an id qualifier
pub const ID_WEIGHT: u32 = 1000;
/// Weight contributed by each class qualifier
pub const CLASS_WEIGHT: u32 = 10;

/// Parse a selector string
pub fn parse(raw: &str) -> Result<Selector, SelectorError> {
    Selector::parse(raw)
}

/// Selector syntax error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("Invalid selector {selector:?}: unexpected {found:?} at {position}")]
    InvalidCharacter { selector: String, position: usize, found: char },

    #[error("Invalid selector {selector:?}: empty qualifier at {position}")]
    EmptyQualifier { selector: String, position: usize },
}
