//! In-memory DOM used as the default [`Document`] implementation.
//!
//! Nodes live in a single arena and are addressed by [`NodeId`], a `u32`
//! index. Nothing is ever freed: detached nodes stay in the arena until the
//! `Dom` is dropped, which keeps ids stable and lookups O(1).

use crate::document::{Attr, Document, NodeRole};

/// Handle to a node inside a [`Dom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    /// Position of the node in its arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Payload of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    Document,
    Fragment,
    Element {
        tag: String,
        /// Attributes in insertion order.
        attributes: Vec<(String, String)>,
    },
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
struct DomNode {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed node tree.
///
/// All methods taking a [`NodeId`] panic if the id was not issued by this
/// `Dom`.
#[derive(Debug, Clone, Default)]
pub struct Dom {
    nodes: Vec<DomNode>,
}

impl Dom {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(DomNode {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn create_document(&mut self) -> NodeId {
        self.push(NodeData::Document)
    }

    pub fn create_fragment(&mut self) -> NodeId {
        self.push(NodeData::Fragment)
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element {
            tag: tag.to_string(),
            attributes: Vec::new(),
        })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Comment(text.to_string()))
    }

    /// Append `child` to `parent`. A child that is already attached elsewhere
    /// is moved.
    ///
    /// # Panics
    ///
    /// Panics if `child` is `parent` or one of its ancestors, since the move
    /// would detach the subtree into a cycle.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        assert!(
            !self.is_inclusive_ancestor(child, parent),
            "cannot append node {:?} under its own descendant {:?}",
            child,
            parent
        );
        if let Some(old) = self.nodes[child.index()].parent.take() {
            self.nodes[old.index()].children.retain(|&c| c != child);
        }
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    /// Is `ancestor` the node `node` itself or one of its ancestors?
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()].data
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match self.data(id) {
            NodeData::Element { tag, .. } => Some(tag),
            _ => None,
        }
    }

    pub fn attributes(&self, id: NodeId) -> &[(String, String)] {
        match self.data(id) {
            NodeData::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute on an element, replacing an existing value in place.
    /// Ignored for non-elements.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let NodeData::Element { attributes, .. } = &mut self.nodes[id.index()].data {
            match attributes.iter_mut().find(|(key, _)| key == name) {
                Some((_, existing)) => *existing = value.to_string(),
                None => attributes.push((name.to_string(), value.to_string())),
            }
        }
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let mut stack = vec![id];
        while let Some(node) = stack.pop() {
            match self.data(node) {
                NodeData::Text(text) => out.push_str(text),
                NodeData::Comment(_) => {}
                _ => stack.extend(self.children(node).iter().rev()),
            }
        }
    }

    pub fn role(&self, id: NodeId) -> NodeRole {
        match self.data(id) {
            NodeData::Document => NodeRole::Document,
            NodeData::Fragment => NodeRole::Fragment,
            NodeData::Element { .. } => NodeRole::Element,
            NodeData::Text(_) => NodeRole::Text,
            NodeData::Comment(_) => NodeRole::Comment,
        }
    }

    /// Number of nodes ever created in this arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Document for Dom {
    type Node = NodeId;

    fn create_element(&mut self, tag: &str) -> NodeId {
        Dom::create_element(self, tag)
    }

    fn create_text(&mut self, text: &str) -> NodeId {
        Dom::create_text(self, text)
    }

    fn append_child(&mut self, parent: &NodeId, child: NodeId) {
        Dom::append_child(self, *parent, child)
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        Dom::children(self, *node).to_vec()
    }

    fn role(&self, node: &NodeId) -> NodeRole {
        Dom::role(self, *node)
    }

    fn attribute(&self, node: &NodeId, attr: Attr) -> Option<&str> {
        self.get_attribute(*node, attr.attribute_name())
    }

    fn set_attribute(&mut self, node: &NodeId, attr: Attr, value: &str) {
        Dom::set_attribute(self, *node, attr.attribute_name(), value)
    }
}
