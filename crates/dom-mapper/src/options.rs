//! Mapper configuration.
//!
//! [`Options`] is a builder: start from [`Options::new`], chain the settings
//! you need and hand it to [`Mapper::with_options`](crate::Mapper::with_options).
//! Everything except the document has a default.
//!
//! ```rust
//! use dom_mapper::{Discovery, Dom, Mapper, Options, Tags, Value};
//!
//! let options = Options::new()
//!     .document(Dom::new())
//!     .tags(Tags::default().with_primitive("span"))
//!     .discovery(Discovery::FirstPerChild)
//!     .max_depth(64);
//!
//! let mut mapper = Mapper::with_options(options).unwrap();
//! let node = mapper.to(&Value::from("hi")).unwrap();
//! assert_eq!(mapper.document().tag_name(node), Some("span"));
//! ```

use crate::decoder::Decoder;
use crate::document::Document;
use crate::encoder::Encoder;
use crate::error::Result;
use crate::kind::{Kind, KindMap};
use crate::value::Value;

/// Default limit on value nesting, in data levels.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Replacement encoder for one kind. Receives the encoder (for recursion and
/// document access), the value and the slot node supplied by the caller, if
/// any.
pub type EncodeFn<D> = Box<
    dyn Fn(&mut Encoder<'_, D>, &Value, Option<<D as Document>::Node>) -> Result<<D as Document>::Node>,
>;

/// Replacement decoder for one kind.
pub type DecodeFn<D> = Box<dyn Fn(&Decoder<'_, D>, &<D as Document>::Node) -> Value>;

/// Tag names used when building nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tags {
    pub primitive: String,
    pub array: String,
    pub array_item: String,
    pub object: String,
    pub object_key: String,
    pub object_value: String,
    /// Element wrapping each key/value pair, e.g. `tr` for table layouts.
    /// `None` places the pairs directly inside the object element.
    pub object_row: Option<String>,
}

impl Default for Tags {
    fn default() -> Self {
        Self {
            primitive: "p".to_string(),
            array: "ol".to_string(),
            array_item: "li".to_string(),
            object: "dl".to_string(),
            object_key: "dt".to_string(),
            object_value: "dd".to_string(),
            object_row: None,
        }
    }
}

impl Tags {
    #[must_use]
    pub fn with_primitive(mut self, tag: impl Into<String>) -> Self {
        self.primitive = tag.into();
        self
    }

    /// Container and per-element slot tags for arrays.
    #[must_use]
    pub fn with_array(mut self, list: impl Into<String>, item: impl Into<String>) -> Self {
        self.array = list.into();
        self.array_item = item.into();
        self
    }

    /// Container, heading and data tags for objects.
    #[must_use]
    pub fn with_object(
        mut self,
        container: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.object = container.into();
        self.object_key = key.into();
        self.object_value = value.into();
        self
    }

    /// Wrap each object member's key and value in a `row` element.
    ///
    /// ```rust
    /// use dom_mapper::{html, Dom, Mapper, Options, Tags, Value};
    /// use serde_json::json;
    ///
    /// let tags = Tags::default()
    ///     .with_object("table", "th", "td")
    ///     .with_object_row("tr");
    /// let mut mapper = Mapper::with_options(Options::new().document(Dom::new()).tags(tags)).unwrap();
    /// let node = mapper.to(&Value::from(json!({"a": 1}))).unwrap();
    /// assert_eq!(
    ///     html::to_html(mapper.document(), node),
    ///     r#"<table data-type="object"><tr><th>a</th><td data-type="number" data-value="1" data-name="a">1</td></tr></table>"#
    /// );
    /// ```
    #[must_use]
    pub fn with_object_row(mut self, row: impl Into<String>) -> Self {
        self.object_row = Some(row.into());
        self
    }
}

/// How a container finds its data descendants through wrapper nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Discovery {
    /// Every outermost data node below the container, in document order.
    /// Descent stops at data nodes.
    #[default]
    Outermost,
    /// At most one data node per direct child: the child itself, or the
    /// first data node found depth-first beneath it.
    FirstPerChild,
}

/// Everything a mapper needs besides the document. Borrowed read-only by the
/// encoder and decoder for the duration of a call.
pub(crate) struct Settings<D: Document> {
    pub(crate) tags: Tags,
    pub(crate) discovery: Discovery,
    pub(crate) max_depth: usize,
    pub(crate) to: KindMap<EncodeFn<D>>,
    pub(crate) from: KindMap<DecodeFn<D>>,
}

impl<D: Document> Default for Settings<D> {
    fn default() -> Self {
        Self {
            tags: Tags::default(),
            discovery: Discovery::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            to: KindMap::default(),
            from: KindMap::default(),
        }
    }
}

/// Builder for a [`Mapper`](crate::Mapper).
pub struct Options<D: Document> {
    pub(crate) document: Option<D>,
    pub(crate) settings: Settings<D>,
}

impl<D: Document> Default for Options<D> {
    fn default() -> Self {
        Self {
            document: None,
            settings: Settings::default(),
        }
    }
}

impl<D: Document> Options<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The document collaborator. Required.
    #[must_use]
    pub fn document(mut self, document: D) -> Self {
        self.document = Some(document);
        self
    }

    #[must_use]
    pub fn tags(mut self, tags: Tags) -> Self {
        self.settings.tags = tags;
        self
    }

    #[must_use]
    pub fn discovery(mut self, discovery: Discovery) -> Self {
        self.settings.discovery = discovery;
        self
    }

    /// Maximum nesting of data levels. Deeper values fail to encode and
    /// deeper nodes decode to `Null`.
    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.settings.max_depth = max_depth;
        self
    }

    /// Replace the encoder for values of `kind`.
    #[must_use]
    pub fn encode_with<F>(mut self, kind: Kind, f: F) -> Self
    where
        F: Fn(&mut Encoder<'_, D>, &Value, Option<D::Node>) -> Result<D::Node> + 'static,
    {
        self.settings.to.insert(kind, Box::new(f));
        self
    }

    /// Replace the decoder for nodes marked `kind`.
    #[must_use]
    pub fn decode_with<F>(mut self, kind: Kind, f: F) -> Self
    where
        F: Fn(&Decoder<'_, D>, &D::Node) -> Value + 'static,
    {
        self.settings.from.insert(kind, Box::new(f));
        self
    }
}
