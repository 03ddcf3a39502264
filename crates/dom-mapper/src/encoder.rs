//! Encoder: builds a node tree from a [`Value`].
//!
//! Every node the encoder creates for a value carries a `type` marker.
//! Primitives additionally carry their text in `value` and as a text child:
//!
//! ```text
//! "foo"        <p data-type="string" data-value="foo">foo</p>
//! [1, 2]       <ol data-type="array">
//!                <li data-type="number" data-value="1">1</li>
//!                <li data-type="number" data-value="2">2</li>
//!              </ol>
//! {"a": []}    <dl data-type="object">
//!                <dt>a</dt>
//!                <dd><ol data-type="array" data-name="a"></ol></dd>
//!              </dl>
//! ```
//!
//! A primitive array element or object member is written straight into its
//! slot (`li`/`dd`); a container element gets its own node nested inside the
//! slot. Each container's slots are built completely before they are attached;
//! with a row tag configured, each object key/value pair is wrapped in a row.

use crate::document::{Attr, Document};
use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::options::{Settings, Tags};
use crate::value::{Members, Value};

/// Recursive encoder state for a single `to` call.
pub struct Encoder<'a, D: Document> {
    doc: &'a mut D,
    settings: &'a Settings<D>,
    depth: usize,
}

impl<'a, D: Document> Encoder<'a, D> {
    pub(crate) fn new(doc: &'a mut D, settings: &'a Settings<D>) -> Self {
        Self {
            doc,
            settings,
            depth: 0,
        }
    }

    /// The document nodes are created in.
    pub fn document(&mut self) -> &mut D {
        self.doc
    }

    pub fn tags(&self) -> &Tags {
        &self.settings.tags
    }

    /// Encode `value` into a freshly created node.
    pub fn encode(&mut self, value: &Value) -> Result<D::Node> {
        self.encode_into(value, None)
    }

    /// Encode `value`, populating `slot` in place when the value is a
    /// primitive. A container is built as its own node and appended to `slot`,
    /// which is then returned.
    pub fn encode_into(&mut self, value: &Value, slot: Option<D::Node>) -> Result<D::Node> {
        if self.depth >= self.settings.max_depth {
            return Err(Error::DepthLimitExceeded {
                limit: self.settings.max_depth,
            });
        }
        self.depth += 1;
        let result = self.dispatch(value, slot);
        self.depth -= 1;
        result
    }

    fn dispatch(&mut self, value: &Value, slot: Option<D::Node>) -> Result<D::Node> {
        let settings = self.settings;
        match settings.to.get(Kind::of(value)) {
            Some(custom) => custom(self, value, slot),
            None => self.encode_builtin(value, slot),
        }
    }

    /// The built-in encoding for `value`, bypassing any override registered
    /// for its kind. Nested values still go through overrides.
    pub fn encode_builtin(&mut self, value: &Value, slot: Option<D::Node>) -> Result<D::Node> {
        match value {
            Value::String(s) => Ok(self.primitive(Kind::String, s, slot)),
            Value::Number(n) => {
                if !n.is_finite() {
                    return Err(Error::UnsupportedValue {
                        value: n.to_string(),
                    });
                }
                Ok(self.primitive(Kind::Number, &format_number(*n), slot))
            }
            Value::Boolean(b) => {
                Ok(self.primitive(Kind::Boolean, if *b { "true" } else { "false" }, slot))
            }
            Value::Null => Ok(self.primitive(Kind::Null, "null", slot)),
            Value::Array(items) => {
                let list = self.array(items)?;
                Ok(self.adopt(slot, list))
            }
            Value::Object(members) => {
                let table = self.object(members)?;
                Ok(self.adopt(slot, table))
            }
        }
    }

    /// Mark `slot` (or a new primitive element) as `kind` with `text` as its
    /// raw value and display text.
    pub fn primitive(&mut self, kind: Kind, text: &str, slot: Option<D::Node>) -> D::Node {
        let node = match slot {
            Some(node) => node,
            None => self.doc.create_element(&self.settings.tags.primitive),
        };
        self.doc.set_attribute(&node, Attr::Type, kind.as_str());
        self.doc.set_attribute(&node, Attr::Value, text);
        let display = self.doc.create_text(text);
        self.doc.append_child(&node, display);
        node
    }

    fn array(&mut self, items: &[Value]) -> Result<D::Node> {
        let mut slots = Vec::with_capacity(items.len());
        for item in items {
            let li = self.doc.create_element(&self.settings.tags.array_item);
            if item.is_primitive() {
                slots.push(self.encode_into(item, Some(li))?);
            } else {
                let child = self.encode(item)?;
                self.doc.append_child(&li, child);
                slots.push(li);
            }
        }

        let list = self.doc.create_element(&self.settings.tags.array);
        self.doc.set_attribute(&list, Attr::Type, Kind::Array.as_str());
        for li in slots {
            self.doc.append_child(&list, li);
        }
        Ok(list)
    }

    fn object(&mut self, members: &Members) -> Result<D::Node> {
        let mut rows = Vec::with_capacity(members.len());
        for (name, value) in members {
            let dt = self.doc.create_element(&self.settings.tags.object_key);
            let label = self.doc.create_text(name);
            self.doc.append_child(&dt, label);

            let dd = self.doc.create_element(&self.settings.tags.object_value);
            let dd = if value.is_primitive() {
                let dd = self.encode_into(value, Some(dd))?;
                self.doc.set_attribute(&dd, Attr::Name, name);
                dd
            } else {
                let child = self.encode(value)?;
                self.doc.set_attribute(&child, Attr::Name, name);
                self.doc.append_child(&dd, child);
                dd
            };
            rows.push((dt, dd));
        }

        let table = self.doc.create_element(&self.settings.tags.object);
        self.doc.set_attribute(&table, Attr::Type, Kind::Object.as_str());
        for (dt, dd) in rows {
            let row = match &self.settings.tags.object_row {
                Some(tag) => {
                    let row = self.doc.create_element(tag);
                    self.doc.append_child(&table, row.clone());
                    row
                }
                None => table.clone(),
            };
            self.doc.append_child(&row, dt);
            self.doc.append_child(&row, dd);
        }
        Ok(table)
    }

    fn adopt(&mut self, slot: Option<D::Node>, node: D::Node) -> D::Node {
        match slot {
            Some(slot) => {
                self.doc.append_child(&slot, node);
                slot
            }
            None => node,
        }
    }
}

/// Canonical text for a finite number: the shortest decimal that parses back
/// to the same `f64`. Exponent notation is used outside `[1e-6, 1e21)` and
/// negative zero prints as `0`.
///
/// ```
/// use dom_mapper::encoder::format_number;
/// assert_eq!(format_number(-1.5), "-1.5");
/// assert_eq!(format_number(3.0), "3");
/// assert_eq!(format_number(1e21), "1e+21");
/// assert_eq!(format_number(1.5e-7), "1.5e-7");
/// ```
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", n);
    }
    let s = format!("{:e}", n);
    match s.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => s,
    }
}
