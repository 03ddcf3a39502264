//! # dom-mapper
//!
//! Lossless mapping between JSON-like values and DOM trees whose elements
//! carry the data in `data-*` marker attributes.
//!
//! Every data element declares its kind in `data-type`; primitives keep their
//! text in `data-value`, and object members carry their key in `data-name`.
//! The markup stays readable (values are mirrored as text, object keys as
//! `<dt>` headings) and can be wrapped, styled or rearranged: the decoder
//! searches through any unmarked wrapper elements.
//!
//! ## Quick start
//!
//! ```rust
//! use dom_mapper::{decode, encode};
//!
//! // JSON → HTML
//! let html = encode(r#"{"name":"Alice"}"#).unwrap();
//! assert_eq!(
//!     html,
//!     r#"<dl data-type="object"><dt>name</dt><dd data-type="string" data-value="Alice" data-name="name">Alice</dd></dl>"#
//! );
//!
//! // HTML → JSON (roundtrip)
//! let back = decode(&html).unwrap();
//! assert_eq!(back, r#"{"name":"Alice"}"#);
//! ```
//!
//! ## Working with a document directly
//!
//! [`Mapper`] is generic over the [`Document`] capability, so it can build
//! into any tree that implements it. [`Dom`] is the bundled in-memory tree.
//!
//! ```rust
//! use dom_mapper::{html, Dom, Mapper, Value};
//!
//! let mut dom = Dom::new();
//! let root = html::parse_fragment(
//!     &mut dom,
//!     r#"<p data-type="number" data-value="1"></p><p data-type="number" data-value="2"></p>"#,
//! )
//! .unwrap();
//!
//! let mapper = Mapper::new(dom);
//! assert_eq!(mapper.from(&root), Value::from(vec![Value::from(1), Value::from(2)]));
//! ```
//!
//! ## Modules
//!
//! - [`kind`]: the six kinds and the node/value predicates
//! - [`document`]: the `Document` capability trait
//! - [`encoder`]: `Value` → node tree
//! - [`decoder`]: node tree → `Value`
//! - [`mapper`]: `Mapper`, binding both to one document
//! - [`options`]: `Options` builder, tag names, discovery mode, overrides
//! - [`dom`]: arena-backed in-memory `Dom`
//! - [`html`]: HTML fragment parser and serializer for `Dom`
//! - [`value`]: the `Value` model
//! - [`error`]: error types

pub mod decoder;
pub mod document;
pub mod dom;
pub mod encoder;
pub mod error;
pub mod html;
pub mod kind;
pub mod mapper;
pub mod options;
pub mod value;

pub use decoder::Decoder;
pub use document::{Attr, Document, NodeRole};
pub use dom::{Dom, NodeData, NodeId};
pub use encoder::Encoder;
pub use error::{Error, Result};
pub use kind::{is_data_node, is_kind, node_kind, Kind};
pub use mapper::Mapper;
pub use options::{Discovery, Options, Tags};
pub use value::{Members, Value};

/// Encode a JSON string as data-attributed HTML.
pub fn encode(json: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    encode_value(&Value::from(value))
}

/// Encode a [`Value`] as data-attributed HTML.
pub fn encode_value(value: &Value) -> Result<String> {
    let mut mapper = Mapper::new(Dom::new());
    let node = mapper.to(value)?;
    Ok(html::to_html(mapper.document(), node))
}

/// Decode data-attributed HTML into compact JSON.
///
/// Fails only if the markup itself cannot be parsed; the mapping is total.
pub fn decode(markup: &str) -> Result<String> {
    let value = decode_value(markup)?;
    Ok(serde_json::to_string(&value)?)
}

/// Decode data-attributed HTML into a [`Value`].
pub fn decode_value(markup: &str) -> Result<Value> {
    let mut dom = Dom::new();
    let root = html::parse_fragment(&mut dom, markup)?;
    Ok(Mapper::new(dom).from(&root))
}
