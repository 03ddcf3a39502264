//! The mapper: one configured document plus the encode/decode entry points.

use crate::decoder::Decoder;
use crate::document::Document;
use crate::encoder::Encoder;
use crate::error::{Error, Result};
use crate::options::{Options, Settings};
use crate::value::Value;

/// Maps values to nodes of `D` and back.
///
/// ```rust
/// use dom_mapper::{html, Dom, Mapper, Value};
///
/// let mut mapper = Mapper::new(Dom::new());
/// let node = mapper.to(&Value::from(vec![Value::from(1), Value::from(2)])).unwrap();
/// assert_eq!(
///     html::to_html(mapper.document(), node),
///     r#"<ol data-type="array"><li data-type="number" data-value="1">1</li><li data-type="number" data-value="2">2</li></ol>"#
/// );
/// assert_eq!(mapper.from(&node), Value::from(vec![Value::from(1), Value::from(2)]));
/// ```
pub struct Mapper<D: Document> {
    document: D,
    settings: Settings<D>,
}

impl<D: Document> Mapper<D> {
    /// A mapper over `document` with default options.
    pub fn new(document: D) -> Self {
        Self {
            document,
            settings: Settings::default(),
        }
    }

    /// Build a mapper from options. Fails with [`Error::MissingDocument`] if
    /// no document was supplied.
    pub fn with_options(options: Options<D>) -> Result<Self> {
        let Options { document, settings } = options;
        let document = document.ok_or(Error::MissingDocument)?;
        Ok(Self { document, settings })
    }

    /// Encode `value` into a new node tree owned by the mapper's document.
    pub fn to(&mut self, value: &Value) -> Result<D::Node> {
        Encoder::new(&mut self.document, &self.settings).encode(value)
    }

    /// Encode `value` into an existing node. Primitives populate `slot`
    /// directly; containers are appended beneath it.
    pub fn to_slot(&mut self, value: &Value, slot: D::Node) -> Result<D::Node> {
        Encoder::new(&mut self.document, &self.settings).encode_into(value, Some(slot))
    }

    /// Decode the tree rooted at `node`. Never fails.
    pub fn from(&self, node: &D::Node) -> Value {
        Decoder::new(&self.document, &self.settings).decode(node)
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn into_document(self) -> D {
        self.document
    }
}
