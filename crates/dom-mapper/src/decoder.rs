//! Decoder: reconstructs a [`Value`] from a node tree.
//!
//! Decoding is total. Every node yields a value:
//!
//! - A data node decodes according to its `type` marker.
//! - A structural node (plain element, document or fragment) is read as a
//!   fragment: its data descendants decode as an array, and a single result is
//!   returned unwrapped.
//! - Anything else (text, comments) is `Null`.
//!
//! # Key design decisions
//!
//! - **Leniency over errors**: a primitive without a `value` attribute is
//!   `Null`. Numbers are read with a prefix parse (`"12px"` is `12`) and any
//!   text that yields no finite number is `Null`.
//! - **Wrapper transparency**: containers find their data descendants through
//!   any number of unmarked wrapper nodes, so hand-written markup may group
//!   members freely. See [`Discovery`] for the two search modes.
//! - **Last write wins**: an object with two members of the same name keeps
//!   the later value at the earlier position.

use std::cell::Cell;

use crate::document::{Attr, Document};
use crate::kind::{is_data_node, node_kind, Kind};
use crate::options::{Discovery, Settings};
use crate::value::{Members, Value};

/// Recursive decoder state for a single `from` call.
pub struct Decoder<'a, D: Document> {
    doc: &'a D,
    settings: &'a Settings<D>,
    depth: Cell<usize>,
}

impl<'a, D: Document> Decoder<'a, D> {
    pub(crate) fn new(doc: &'a D, settings: &'a Settings<D>) -> Self {
        Self {
            doc,
            settings,
            depth: Cell::new(0),
        }
    }

    pub fn document(&self) -> &D {
        self.doc
    }

    /// Decode any node.
    pub fn decode(&self, node: &D::Node) -> Value {
        match node_kind(self.doc, node) {
            Some(kind) => self.decode_kind(kind, node),
            None if self.doc.role(node).is_parent() => self.decode_fragment(node),
            None => Value::Null,
        }
    }

    fn decode_kind(&self, kind: Kind, node: &D::Node) -> Value {
        let depth = self.depth.get();
        if depth >= self.settings.max_depth {
            return Value::Null;
        }
        self.depth.set(depth + 1);
        let value = match self.settings.from.get(kind) {
            Some(custom) => custom(self, node),
            None => self.decode_builtin(kind, node),
        };
        self.depth.set(depth);
        value
    }

    /// The built-in decoding of `node` as `kind`, bypassing any override
    /// registered for that kind. Nested nodes still go through overrides.
    pub fn decode_builtin(&self, kind: Kind, node: &D::Node) -> Value {
        let raw = self.doc.attribute(node, Attr::Value);
        match kind {
            Kind::String => raw.map_or(Value::Null, |s| Value::String(s.to_string())),
            Kind::Number => raw.and_then(parse_number).map_or(Value::Null, Value::Number),
            Kind::Boolean => raw.map_or(Value::Null, |s| Value::Boolean(s == "true")),
            Kind::Null => Value::Null,
            Kind::Array => Value::Array(self.decode_elements(node)),
            Kind::Object => Value::Object(self.decode_members(node)),
        }
    }

    /// Decode a structural root: one data descendant is returned as is,
    /// zero or several come back as an array.
    pub fn decode_fragment(&self, node: &D::Node) -> Value {
        let mut items = self.decode_elements(node);
        if items.len() == 1 {
            items.swap_remove(0)
        } else {
            Value::Array(items)
        }
    }

    fn decode_elements(&self, node: &D::Node) -> Vec<Value> {
        self.data_descendants(node)
            .iter()
            .map(|child| self.decode(child))
            .collect()
    }

    fn decode_members(&self, node: &D::Node) -> Members {
        let mut members = Members::new();
        for child in self.data_descendants(node) {
            let name = match self.doc.attribute(&child, Attr::Name) {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => continue,
            };
            let value = self.decode(&child);
            members.insert(name, value);
        }
        members
    }

    /// Data nodes below `node`, in document order, found according to the
    /// configured [`Discovery`] mode.
    pub fn data_descendants(&self, node: &D::Node) -> Vec<D::Node> {
        match self.settings.discovery {
            Discovery::Outermost => self.outermost_data_nodes(node),
            Discovery::FirstPerChild => self
                .doc
                .children(node)
                .into_iter()
                .filter_map(|child| self.first_data_node(child))
                .collect(),
        }
    }

    fn outermost_data_nodes(&self, node: &D::Node) -> Vec<D::Node> {
        let mut found = Vec::new();
        let mut stack: Vec<D::Node> = self.doc.children(node).into_iter().rev().collect();
        while let Some(current) = stack.pop() {
            if is_data_node(self.doc, &current) {
                found.push(current);
            } else {
                stack.extend(self.doc.children(&current).into_iter().rev());
            }
        }
        found
    }

    fn first_data_node(&self, root: D::Node) -> Option<D::Node> {
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            if is_data_node(self.doc, &current) {
                return Some(current);
            }
            stack.extend(self.doc.children(&current).into_iter().rev());
        }
        None
    }
}

/// Read the leading decimal literal of `raw`, ignoring leading whitespace and
/// any trailing text. Returns `None` unless the result is a finite number.
///
/// ```
/// use dom_mapper::decoder::parse_number;
/// assert_eq!(parse_number("-1.5"), Some(-1.5));
/// assert_eq!(parse_number(" 12px"), Some(12.0));
/// assert_eq!(parse_number(".5e1"), Some(5.0));
/// assert_eq!(parse_number("not-a-number"), None);
/// assert_eq!(parse_number("Infinity"), None);
/// ```
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |start: usize| {
        bytes[start..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits_from(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}
