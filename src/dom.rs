//! Owned HTML document tree.
//!
//! The feed pipeline operates on a small owned tree instead of the HTML
//! parser's internal representation: the parser runs once per request in the
//! fetch layer, and everything downstream reads an immutable
//! [`Document`] of [`Node`]s. Keeping the tree type closed (element or text,
//! nothing else) makes traversal exhaustive and lets tests build documents
//! by hand.

use ego_tree::NodeRef;
use scraper::Html;

/// Maximum element nesting depth kept when converting parsed HTML.
/// Subtrees nested deeper are dropped — prevents stack exhaustion on
/// maliciously deep markup, since extraction recurses over the tree.
const MAX_DOM_DEPTH: usize = 256;

/// A single node in a parsed HTML document.
///
/// Comments, doctypes and processing instructions are discarded at parse
/// time; nothing downstream inspects them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element such as `<a href="...">`.
    Element {
        /// Tag name, lowercased by the parser.
        name: String,
        /// Attributes in stored order.
        attrs: Vec<(String, String)>,
        /// Child nodes in document order.
        children: Vec<Node>,
    },
    /// A text run between elements.
    Text(String),
}

impl Node {
    /// Returns the first child element with the given tag name, if any.
    pub fn first_child_element(&self, name: &str) -> Option<&Node> {
        first_element_in(self.children(), name)
    }

    /// Returns the content of the first text-type child, or `""` if there
    /// is none.
    ///
    /// Only the first immediate text child counts — descendant text is not
    /// concatenated, so `<a><b>x</b>label</a>` yields `"label"` and
    /// `<a><b>x</b></a>` yields `""`.
    pub fn first_text(&self) -> &str {
        self.children()
            .iter()
            .find_map(|child| match child {
                Node::Text(content) => Some(content.as_str()),
                Node::Element { .. } => None,
            })
            .unwrap_or("")
    }

    /// Child nodes in document order (empty for text nodes).
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            Node::Text(_) => &[],
        }
    }
}

/// An immutable parsed HTML document, owned by one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// Top-level nodes; for well-formed pages this is the `<html>` element.
    pub children: Vec<Node>,
}

impl Document {
    /// Returns the first top-level element with the given tag name, if any.
    pub fn first_element(&self, name: &str) -> Option<&Node> {
        first_element_in(&self.children, name)
    }
}

fn first_element_in<'a>(children: &'a [Node], name: &str) -> Option<&'a Node> {
    children
        .iter()
        .find(|node| matches!(node, Node::Element { name: n, .. } if n == name))
}

/// Parses HTML into an owned [`Document`].
///
/// Parsing is error-recovering and never fails: any input produces a tree,
/// with the implied `html`/`head`/`body` structure inserted where the
/// markup omits it. Tag and attribute names are lowercased by the parser.
pub fn parse_document(html: &str) -> Document {
    let parsed = Html::parse_document(html);
    let children = parsed
        .tree
        .root()
        .children()
        .filter_map(|child| convert(child, 0))
        .collect();
    Document { children }
}

fn convert(node: NodeRef<'_, scraper::Node>, depth: usize) -> Option<Node> {
    if depth > MAX_DOM_DEPTH {
        tracing::warn!(depth = depth, "Dropping HTML subtree nested beyond depth limit");
        return None;
    }

    match node.value() {
        scraper::Node::Element(element) => Some(Node::Element {
            name: element.name().to_owned(),
            attrs: element
                .attrs()
                .map(|(key, value)| (key.to_owned(), value.to_owned()))
                .collect(),
            children: node
                .children()
                .filter_map(|child| convert(child, depth + 1))
                .collect(),
        }),
        scraper::Node::Text(text) => Some(Node::Text(text.text.to_string())),
        _ => None,
    }
}
