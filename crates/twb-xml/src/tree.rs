//! Labeled document tree built from workbook XML.
//!
//! Nodes live in an arena owned by [`DocumentTree`] and refer to each other by
//! [`NodeId`]. The arena is filled in document order, each node keeps its
//! children in order and a back-reference to its parent for upward traversal.

use std::collections::BTreeMap;
use std::str;

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

use crate::error::DocumentError;

/// Index of a node inside its [`DocumentTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// One element: label, attributes, and ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    label: String,
    attributes: BTreeMap<String, String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Node {
    /// Element name as written, including any namespace prefix.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Unescaped attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Read-only tree view over a parsed workbook.
#[derive(Debug, Clone, Default)]
pub struct DocumentTree {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl DocumentTree {
    /// Parse XML text into a tree.
    ///
    /// Text content, comments, processing instructions and the declaration
    /// are dropped. A document with no element yields an empty tree; more
    /// than one top-level element is a syntax error.
    pub fn parse(text: &str) -> Result<Self, DocumentError> {
        let mut reader = Reader::from_str(text);
        let mut tree = Self::default();
        let mut open: Vec<NodeId> = Vec::new();

        loop {
            let position = reader.buffer_position() as u64;
            match reader.read_event() {
                Ok(Event::Start(element)) => {
                    let id = tree.push_element(&element, open.last().copied(), position)?;
                    open.push(id);
                }
                Ok(Event::Empty(element)) => {
                    tree.push_element(&element, open.last().copied(), position)?;
                }
                Ok(Event::End(_)) => {
                    open.pop();
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(error) => {
                    return Err(DocumentError::syntax(
                        reader.error_position() as u64,
                        error.to_string(),
                    ));
                }
            }
        }

        if let Some(&unclosed) = open.last() {
            return Err(DocumentError::syntax(
                text.len() as u64,
                format!("unclosed element <{}>", tree.nodes[unclosed.0].label),
            ));
        }
        Ok(tree)
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.root
    }

    pub fn root(&self) -> Option<&Node> {
        self.root.map(|id| &self.nodes[id.0])
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Number of element nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first walk from the root in document order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: self.root.into_iter().collect(),
        }
    }

    /// All nodes with the given label, anywhere in the tree, in document order.
    pub fn find_all<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.descendants()
            .map(|(_, node)| node)
            .filter(move |node| node.label == label)
    }

    pub fn count(&self, label: &str) -> usize {
        self.find_all(label).count()
    }

    /// Ancestors of `id`, nearest first, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.get(id).and_then(Node::parent), move |current| {
            self.get(*current).and_then(Node::parent)
        })
    }

    /// Slash-separated labels from the root down to `id`.
    pub fn path(&self, id: NodeId) -> String {
        let mut labels: Vec<&str> = self
            .ancestors(id)
            .filter_map(|ancestor| self.get(ancestor))
            .map(Node::label)
            .collect();
        labels.reverse();
        if let Some(node) = self.get(id) {
            labels.push(node.label());
        }
        labels.join("/")
    }

    fn push_element(
        &mut self,
        element: &BytesStart<'_>,
        parent: Option<NodeId>,
        position: u64,
    ) -> Result<NodeId, DocumentError> {
        let label = decode(element.name().as_ref(), position)?.to_string();

        let mut attributes = BTreeMap::new();
        for attribute in element.attributes() {
            let attribute =
                attribute.map_err(|error| DocumentError::syntax(position, error.to_string()))?;
            let key = decode(attribute.key.as_ref(), position)?;
            let raw = decode(&attribute.value, position)?;
            let value = unescape(raw)
                .map_err(|error| DocumentError::syntax(position, error.to_string()))?;
            attributes.insert(key.to_string(), value.into_owned());
        }

        let id = NodeId(self.nodes.len());
        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None if self.root.is_none() => self.root = Some(id),
            None => {
                return Err(DocumentError::syntax(
                    position,
                    format!("unexpected second root element <{label}>"),
                ));
            }
        }
        self.nodes.push(Node {
            label,
            attributes,
            children: Vec::new(),
            parent,
        });
        Ok(id)
    }
}

fn decode(bytes: &[u8], position: u64) -> Result<&str, DocumentError> {
    str::from_utf8(bytes).map_err(|error| DocumentError::syntax(position, error.to_string()))
}

/// Iterator returned by [`DocumentTree::descendants`].
pub struct Descendants<'a> {
    tree: &'a DocumentTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (NodeId, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.tree.nodes[id.0];
        self.stack.extend(node.children.iter().rev().copied());
        Some((id, node))
    }
}
