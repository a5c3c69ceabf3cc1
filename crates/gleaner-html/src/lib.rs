//! Gleaner HTML Parser
//!
//! HTML5 parsing built on html5ever, converted into a [`gleaner_dom::Document`].

mod parser;

pub use parser::HtmlParser;
pub use gleaner_dom::Document;

/// Parse an HTML string with the default (lenient) parser
pub fn parse(html: &str) -> Result<Document, ParseError> {
    HtmlParser::new().parse(html)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to read document {url}: {source}")]
    Io {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed document {url}: {count} error(s), first: {first}")]
    Malformed { url: String, count: usize, first: String },
}
