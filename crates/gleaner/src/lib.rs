//! Gleaner
//!
//! Selector-driven traversal of HTML documents.
//!
//! Register `(selector, callback)` pairs, then visit a document: the tree is
//! walked once in document order and, for every element, the callback of the
//! single most specific matching selector is invoked with a [`NodeWrapper`].
//!
//! # Example
//! ```rust,no_run
//! use std::cell::RefCell;
//! use gleaner::Scraper;
//!
//! let titles = RefCell::new(Vec::new());
//! let mut scraper = Scraper::new();
//! scraper.on_element(".single-book", |book| {
//!     titles.borrow_mut().push(book.select_text(".book-title"));
//! })?;
//! scraper.visit("https://example.com/catalogue")?;
//! # Ok::<(), gleaner::ScrapeError>(())
//! ```

mod config;
mod dispatch;
mod query;
mod registry;
mod scraper;
mod source;

pub use config::ScraperConfig;
pub use dispatch::{dispatch, DispatchStats};
pub use query::{Iter, NodeCollection, NodeWrapper};
pub use registry::{Callback, Registry};
pub use scraper::Scraper;
pub use source::Source;

pub use gleaner_dom::{Document, NodeId};
pub use gleaner_html::ParseError;
pub use gleaner_net::{Fetch, FetchConfig, HttpFetcher, NetError, Response};
pub use gleaner_select::{Selector, SelectorError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Errors surfaced by registration and visits
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Invalid selector syntax: {0}")]
    InvalidSelectorSyntax(#[from] SelectorError),

    #[error("Failed to acquire {url}: {source}")]
    AcquisitionFailure {
        url: String,
        #[source]
        source: NetError,
    },

    #[error("Failed to parse document: {0}")]
    DocumentParseFailure(#[from] ParseError),
}
