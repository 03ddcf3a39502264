use dom_mapper::{
    html, is_data_node, is_kind, node_kind, Attr, Document, Dom, Error, Kind, Mapper, NodeRole,
    Options, Value,
};
use serde_json::json;

// ============================================================================
// Construction
// ============================================================================

#[test]
fn requires_a_document_instance() {
    let result = Mapper::<Dom>::with_options(Options::new());
    assert!(matches!(result, Err(Error::MissingDocument)));
}

#[test]
fn missing_document_message() {
    let err = Mapper::<Dom>::with_options(Options::new()).err().unwrap();
    assert_eq!(err.to_string(), "A document instance is required");
}

#[test]
fn with_options_keeps_document() {
    let mut dom = Dom::new();
    let existing = dom.create_element("main");
    let mapper = Mapper::with_options(Options::new().document(dom)).unwrap();
    assert_eq!(mapper.document().tag_name(existing), Some("main"));
}

#[test]
fn into_document_returns_built_tree() {
    let mut mapper = Mapper::new(Dom::new());
    let node = mapper.to(&Value::from("x")).unwrap();
    let dom = mapper.into_document();
    assert_eq!(dom.text_content(node), "x");
}

#[test]
fn encoded_tree_can_be_attached_to_document() {
    let mut mapper = Mapper::new(Dom::new());
    let body = mapper.document_mut().create_element("body");
    let node = mapper.to(&Value::from(json!({"a": 1}))).unwrap();
    mapper.document_mut().append_child(body, node);

    assert_eq!(mapper.document().parent(node), Some(body));
    assert_eq!(mapper.from(&body).to_json(), json!({"a": 1}));
}

// ============================================================================
// Predicates
// ============================================================================

#[test]
fn kind_markers_parse() {
    for kind in Kind::ALL {
        assert_eq!(kind.as_str().parse::<Kind>(), Ok(kind));
        assert_eq!(kind.to_string(), kind.as_str());
    }
    assert!("date".parse::<Kind>().is_err());
    assert!("String".parse::<Kind>().is_err());
}

#[test]
fn kind_of_value() {
    assert_eq!(Kind::of(&Value::from("s")), Kind::String);
    assert_eq!(Kind::of(&Value::from(1)), Kind::Number);
    assert_eq!(Kind::of(&Value::from(false)), Kind::Boolean);
    assert_eq!(Kind::of(&Value::Null), Kind::Null);
    assert_eq!(Kind::of(&Value::Array(vec![])), Kind::Array);
    assert_eq!(Kind::of(&Value::from(json!({}))), Kind::Object);
    assert!(Kind::Null.is_primitive());
    assert!(Kind::Object.is_container());
}

#[test]
fn node_predicates() {
    let mut dom = Dom::new();
    let fragment = html::parse_fragment(
        &mut dom,
        r#"<p data-type="number" data-value="1">1</p><div>wrapper</div><p data-type="bogus"></p>"#,
    )
    .unwrap();
    let children = dom.children(fragment).to_vec();
    let (number, wrapper, bogus) = (children[0], children[1], children[2]);
    let text = dom.children(wrapper)[0];

    assert_eq!(node_kind(&dom, &number), Some(Kind::Number));
    assert!(is_kind(&dom, &number, Kind::Number));
    assert!(!is_kind(&dom, &number, Kind::String));
    assert!(is_data_node(&dom, &number));

    assert_eq!(node_kind(&dom, &wrapper), None);
    assert_eq!(node_kind(&dom, &bogus), None);
    assert_eq!(node_kind(&dom, &text), None);
    assert_eq!(node_kind(&dom, &fragment), None);

    // at most one predicate matches any node
    for node in [number, wrapper, bogus, text, fragment] {
        let matches = Kind::ALL
            .into_iter()
            .filter(|&kind| is_kind(&dom, &node, kind))
            .count();
        assert!(matches <= 1);
    }
}

#[test]
fn document_trait_on_dom() {
    let mut dom = Dom::new();
    let el = Document::create_element(&mut dom, "p");
    Document::set_attribute(&mut dom, &el, Attr::Type, "string");
    Document::set_attribute(&mut dom, &el, Attr::Type, "number");

    assert_eq!(Document::attribute(&dom, &el, Attr::Type), Some("number"));
    assert_eq!(Document::attribute(&dom, &el, Attr::Name), None);
    assert_eq!(Document::role(&dom, &el), NodeRole::Element);
    assert_eq!(dom.attributes(el).len(), 1);
    assert_eq!(Attr::Value.key(), "value");
    assert_eq!(Attr::Value.attribute_name(), "data-value");
}

// ============================================================================
// Overrides
// ============================================================================

#[test]
fn encode_override_replaces_builtin() {
    let options = Options::new()
        .document(Dom::new())
        .encode_with(Kind::Boolean, |encoder, value, slot| {
            let text = if value.as_bool() == Some(true) { "yes" } else { "no" };
            let node = encoder.primitive(Kind::String, text, slot);
            Ok(node)
        });
    let mut mapper = Mapper::with_options(options).unwrap();
    let node = mapper.to(&Value::from(json!([true, false]))).unwrap();

    assert_eq!(
        html::to_html(mapper.document(), node),
        concat!(
            r#"<ol data-type="array">"#,
            r#"<li data-type="string" data-value="yes">yes</li>"#,
            r#"<li data-type="string" data-value="no">no</li>"#,
            r#"</ol>"#
        )
    );
}

#[test]
fn encode_override_can_delegate_and_recurse() {
    let options = Options::new()
        .document(Dom::new())
        .encode_with(Kind::Array, |encoder, value, slot| {
            let node = encoder.encode_builtin(value, slot)?;
            let doc = encoder.document();
            doc.set_attribute(node, "class", "list");
            Ok(node)
        });
    let mut mapper = Mapper::with_options(options).unwrap();
    let node = mapper.to(&Value::from(json!([[1]]))).unwrap();

    assert_eq!(
        html::to_html(mapper.document(), node),
        concat!(
            r#"<ol data-type="array" class="list"><li>"#,
            r#"<ol data-type="array" class="list"><li data-type="number" data-value="1">1</li></ol>"#,
            r#"</li></ol>"#
        )
    );
    assert_eq!(mapper.from(&node).to_json(), json!([[1]]));
}

#[test]
fn encode_override_errors_propagate() {
    let options = Options::new()
        .document(Dom::new())
        .encode_with(Kind::Null, |_, _, _| Err(Error::Custom("nulls are not allowed".into())));
    let mut mapper = Mapper::with_options(options).unwrap();

    let err = mapper.to(&Value::from(json!({"a": [null]}))).unwrap_err();
    assert_eq!(err.to_string(), "nulls are not allowed");
}

#[test]
fn decode_override_replaces_builtin() {
    let mut dom = Dom::new();
    let root = html::parse_fragment(
        &mut dom,
        r#"<ol data-type="array"><li data-type="string" data-value="a">A</li></ol>"#,
    )
    .unwrap();
    let options = Options::new()
        .document(dom)
        .decode_with(Kind::String, |decoder, node| {
            Value::String(decoder.document().text_content(*node))
        });
    let mapper = Mapper::with_options(options).unwrap();

    assert_eq!(mapper.from(&root).to_json(), json!(["A"]));
}

#[test]
fn decode_override_can_delegate() {
    let mut dom = Dom::new();
    let root = html::parse_fragment(
        &mut dom,
        r#"<p data-type="number" data-value="21"></p><p data-type="number" data-value="x"></p>"#,
    )
    .unwrap();
    let options = Options::new()
        .document(dom)
        .decode_with(Kind::Number, |decoder, node| {
            match decoder.decode_builtin(Kind::Number, node) {
                Value::Number(n) => Value::Number(n * 2.0),
                _ => Value::Number(0.0),
            }
        });
    let mapper = Mapper::with_options(options).unwrap();

    assert_eq!(mapper.from(&root).to_json(), json!([42, 0]));
}

#[test]
fn decode_override_sees_descendants() {
    let mut dom = Dom::new();
    let root = html::parse_fragment(
        &mut dom,
        r#"<ol data-type="array"><li data-type="null"></li><li><b data-type="null"></b></li></ol>"#,
    )
    .unwrap();
    let options = Options::new()
        .document(dom)
        .decode_with(Kind::Array, |decoder, node| {
            Value::Number(decoder.data_descendants(node).len() as f64)
        });
    let mapper = Mapper::with_options(options).unwrap();

    assert_eq!(mapper.from(&root), Value::Number(2.0));
}

#[test]
fn mapper_is_reusable_across_calls() {
    let mut mapper = Mapper::new(Dom::new());
    let first = mapper.to(&Value::from(1)).unwrap();
    let second = mapper.to(&Value::from(2)).unwrap();

    assert_ne!(first, second);
    assert_eq!(mapper.from(&first), Value::from(1));
    assert_eq!(mapper.from(&second), Value::from(2));
}
