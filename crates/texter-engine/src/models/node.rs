use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Attribute name → value mapping for an element.
///
/// Ordered so that attribute serialization and equality are deterministic;
/// two attribute sets are equal exactly when they contain the same keys with
/// the same values.
pub type AttrMap = BTreeMap<String, String>;

/// One node of the document tree: literal text or an element with children.
///
/// Only text contributes to the flat offset space; element boundaries have
/// zero width. The tree is an owned value, not a view into a live document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    Text(String),
    Element(Element),
}

/// An element node: tag name, attributes, and ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Tag name, normalized to ASCII lowercase.
    pub name: String,
    pub attrs: AttrMap,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            attrs: AttrMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter, mainly for tests and tree construction.
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    /// Builder-style child appender.
    pub fn child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }

    pub fn into_node(self) -> Node {
        Node::Element(self)
    }
}

impl Node {
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    /// Number of characters this node contributes to the flat offset space.
    pub fn text_len(&self) -> usize {
        match self {
            Node::Text(s) => s.chars().count(),
            Node::Element(el) => text_len_of(&el.children),
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(s) => out.push_str(s),
            Node::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

/// Concatenation, in document order, of all text node contents.
pub fn text_of(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.collect_text(&mut out);
    }
    out
}

/// Total character count of all text under `nodes`.
pub fn text_len_of(nodes: &[Node]) -> usize {
    nodes.iter().map(Node::text_len).sum()
}
