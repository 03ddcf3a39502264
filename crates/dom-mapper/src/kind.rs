//! Type predicates: which of the six kinds a node or a value carries.
//!
//! A node is a *data node* when it is an element whose `type` marker names one
//! of the six kinds. Everything else (text, comments, unmarked elements and
//! elements with an unknown marker) is structural and only searched through.

use std::fmt;
use std::str::FromStr;

use crate::document::{Attr, Document, NodeRole};
use crate::value::Value;

/// The six value kinds, as written in the `type` marker attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Number,
    Boolean,
    Null,
    Array,
    Object,
}

impl Kind {
    pub const ALL: [Kind; 6] = [
        Kind::String,
        Kind::Number,
        Kind::Boolean,
        Kind::Null,
        Kind::Array,
        Kind::Object,
    ];

    /// Marker text for this kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::Null => "null",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }

    /// Runtime kind of a value.
    pub fn of(value: &Value) -> Kind {
        match value {
            Value::String(_) => Kind::String,
            Value::Number(_) => Kind::Number,
            Value::Boolean(_) => Kind::Boolean,
            Value::Null => Kind::Null,
            Value::Array(_) => Kind::Array,
            Value::Object(_) => Kind::Object,
        }
    }

    pub fn is_primitive(self) -> bool {
        !self.is_container()
    }

    pub fn is_container(self) -> bool {
        matches!(self, Kind::Array | Kind::Object)
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Kind::String => 0,
            Kind::Number => 1,
            Kind::Boolean => 2,
            Kind::Null => 3,
            Kind::Array => 4,
            Kind::Object => 5,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a marker does not name one of the six kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownKind(pub String);

impl fmt::Display for UnknownKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown kind marker: {:?}", self.0)
    }
}

impl std::error::Error for UnknownKind {}

impl FromStr for Kind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Kind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_string()))
    }
}

/// The kind a node declares, or `None` if it is not a data node.
pub fn node_kind<D: Document + ?Sized>(doc: &D, node: &D::Node) -> Option<Kind> {
    if doc.role(node) != NodeRole::Element {
        return None;
    }
    doc.attribute(node, Attr::Type)?.parse().ok()
}

/// Per-kind predicate: does `node` encode a value of `kind`?
pub fn is_kind<D: Document + ?Sized>(doc: &D, node: &D::Node, kind: Kind) -> bool {
    node_kind(doc, node) == Some(kind)
}

pub fn is_data_node<D: Document + ?Sized>(doc: &D, node: &D::Node) -> bool {
    node_kind(doc, node).is_some()
}

/// Fixed-size table holding one optional entry per kind.
pub(crate) struct KindMap<T> {
    slots: [Option<T>; 6],
}

impl<T> KindMap<T> {
    pub(crate) fn get(&self, kind: Kind) -> Option<&T> {
        self.slots[kind.index()].as_ref()
    }

    pub(crate) fn insert(&mut self, kind: Kind, entry: T) {
        self.slots[kind.index()] = Some(entry);
    }
}

impl<T> Default for KindMap<T> {
    fn default() -> Self {
        Self {
            slots: [None, None, None, None, None, None],
        }
    }
}
