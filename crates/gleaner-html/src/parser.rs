//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it to the gleaner arena tree.

use gleaner_dom::{Document, DomTree, NodeId};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::ParseError;

/// HTML5 parser
#[derive(Debug, Clone, Default)]
pub struct HtmlParser {
    strict: bool,
}

impl HtmlParser {
    /// Create a lenient parser: recovery messages are recorded, not fatal
    pub fn new() -> Self {
        Self { strict: false }
    }

    /// Reject documents the tokenizer had to recover from
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Result<Document, ParseError> {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a base URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Result<Document, ParseError> {
        self.parse_bytes(html.as_bytes(), url)
    }

    /// Parse raw bytes; invalid UTF-8 sequences are replaced
    pub fn parse_bytes(&self, bytes: &[u8], url: &str) -> Result<Document, ParseError> {
        tracing::debug!("Parsing HTML document: {} ({} bytes)", url, bytes.len());

        let mut input = bytes;
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut input)
            .map_err(|source| ParseError::Io { url: url.to_string(), source })?;

        let errors = dom.errors.take();
        if self.strict {
            if let Some(first) = errors.first() {
                return Err(ParseError::Malformed {
                    url: url.to_string(),
                    count: errors.len(),
                    first: first.to_string(),
                });
            }
        }

        let mut document = Document::empty(url);
        let root = document.tree().root();
        convert_node(&dom.document, document.tree_mut(), root);
        for message in errors {
            document.push_parse_error(message.to_string());
        }

        tracing::debug!(
            "Parsed {} nodes ({} recovered errors)",
            document.tree().len(),
            document.parse_errors().len()
        );
        Ok(document)
    }
}

/// Convert an RcDom node (and its subtree) into `tree` under `parent`
fn convert_node(handle: &Handle, tree: &mut DomTree, parent: NodeId) {
    // Explicit stack: RcDom itself imposes no depth limit
    let mut stack: Vec<(Handle, NodeId)> = vec![(handle.clone(), parent)];

    while let Some((handle, parent)) = stack.pop() {
        let target = match &handle.data {
            RcNodeData::Document => parent,
            RcNodeData::Doctype { name, .. } => {
                let id = tree.create_doctype(name);
                tree.append_child(parent, id);
                continue;
            }
            RcNodeData::Text { contents } => {
                let text = contents.borrow();
                if !text.trim().is_empty() {
                    let id = tree.create_text(&text);
                    tree.append_child(parent, id);
                }
                continue;
            }
            RcNodeData::Comment { contents } => {
                let id = tree.create_comment(contents);
                tree.append_child(parent, id);
                continue;
            }
            RcNodeData::Element { name, attrs, .. } => {
                let id = tree.create_element(&name.local);
                if let Some(elem) = tree.get_mut(id).and_then(|n| n.as_element_mut()) {
                    for attr in attrs.borrow().iter() {
                        elem.push_attr(&attr.name.local, &attr.value);
                    }
                }
                tree.append_child(parent, id);
                id
            }
            RcNodeData::ProcessingInstruction { .. } => continue,
        };

        // Reverse push keeps append order equal to document order
        for child in handle.children.borrow().iter().rev() {
            stack.push((child.clone(), target));
        }
    }
}
