//! The document capability the mapper is written against.
//!
//! The encoder and decoder never touch a concrete tree API. Anything that can
//! create elements and text, attach children in order, list children, report
//! a node's structural role and read/write the three data attributes can back
//! a [`Mapper`](crate::Mapper). [`Dom`](crate::Dom) is the in-memory adapter
//! shipped with this crate.

/// The three data attributes the mapper reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attr {
    /// The kind marker (`string`, `number`, ...).
    Type,
    /// The textual value of a primitive.
    Value,
    /// The member name of a node inside an object.
    Name,
}

impl Attr {
    /// Key as seen through an element's dataset.
    pub const fn key(self) -> &'static str {
        match self {
            Attr::Type => "type",
            Attr::Value => "value",
            Attr::Name => "name",
        }
    }

    /// Full attribute name as written in markup.
    pub const fn attribute_name(self) -> &'static str {
        match self {
            Attr::Type => "data-type",
            Attr::Value => "data-value",
            Attr::Name => "data-name",
        }
    }
}

/// Structural role of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Element,
    Text,
    Comment,
    Document,
    Fragment,
}

impl NodeRole {
    /// Elements, documents and fragments can hold data nodes.
    pub fn is_parent(self) -> bool {
        matches!(self, NodeRole::Element | NodeRole::Document | NodeRole::Fragment)
    }
}

/// Capability set required from a node tree implementation.
pub trait Document {
    /// Handle to a node owned by this document.
    type Node: Clone;

    /// Create a detached element with the given tag name.
    fn create_element(&mut self, tag: &str) -> Self::Node;

    /// Create a detached text node.
    fn create_text(&mut self, text: &str) -> Self::Node;

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: &Self::Node, child: Self::Node);

    /// Ordered children of `node`, including text and wrapper nodes.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    fn role(&self, node: &Self::Node) -> NodeRole;

    /// Read a data attribute. Non-elements have none.
    fn attribute(&self, node: &Self::Node, attr: Attr) -> Option<&str>;

    /// Write a data attribute, replacing any previous value.
    fn set_attribute(&mut self, node: &Self::Node, attr: Attr, value: &str);
}
