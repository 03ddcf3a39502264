use dom_mapper::{decode, decode_value, html, Discovery, Dom, Mapper, Options, Value};
use serde_json::json;

/// Helper: decode markup and convert to `serde_json::Value` for comparison.
fn decoded(markup: &str) -> serde_json::Value {
    decode_value(markup).expect("markup should parse").to_json()
}

/// Helper: decode markup with the given discovery mode.
fn decoded_with(markup: &str, discovery: Discovery) -> Value {
    let mut dom = Dom::new();
    let root = html::parse_fragment(&mut dom, markup).unwrap();
    let mapper = Mapper::with_options(Options::new().document(dom).discovery(discovery)).unwrap();
    mapper.from(&root)
}

// ============================================================================
// Primitives
// ============================================================================

#[test]
fn decode_string() {
    assert_eq!(
        decoded(r#"<p data-type="string" data-value="foo">ignored text</p>"#),
        json!("foo")
    );
}

#[test]
fn decode_string_without_value_is_null() {
    assert_eq!(decoded(r#"<p data-type="string">text</p>"#), json!(null));
}

#[test]
fn decode_empty_string_value() {
    assert_eq!(decoded(r#"<p data-type="string" data-value=""></p>"#), json!(""));
}

#[test]
fn decode_number() {
    assert_eq!(
        decoded(r#"<p data-type="number" data-value="-1.5"></p>"#),
        json!(-1.5)
    );
}

#[test]
fn decode_number_without_value_is_null() {
    assert_eq!(decoded(r#"<p data-type="number"></p>"#), json!(null));
}

#[test]
fn decode_bad_number_is_null() {
    assert_eq!(
        decoded(r#"<p data-type="number" data-value="not-a-number"></p>"#),
        json!(null)
    );
}

#[test]
fn decode_infinite_number_is_null() {
    assert_eq!(
        decoded(r#"<p data-type="number" data-value="Infinity"></p>"#),
        json!(null)
    );
    assert_eq!(
        decoded(r#"<p data-type="number" data-value="1e400"></p>"#),
        json!(null)
    );
}

#[test]
fn decode_number_reads_leading_literal() {
    assert_eq!(
        decoded(r#"<p data-type="number" data-value=" 12px"></p>"#),
        json!(12)
    );
}

#[test]
fn decode_boolean_true() {
    assert_eq!(
        decoded(r#"<p data-type="boolean" data-value="true"></p>"#),
        json!(true)
    );
}

#[test]
fn decode_boolean_other_text_is_false() {
    assert_eq!(
        decoded(r#"<p data-type="boolean" data-value="yes"></p>"#),
        json!(false)
    );
    assert_eq!(
        decoded(r#"<p data-type="boolean" data-value="TRUE"></p>"#),
        json!(false)
    );
}

#[test]
fn decode_boolean_without_value_is_null() {
    assert_eq!(decoded(r#"<p data-type="boolean"></p>"#), json!(null));
}

#[test]
fn decode_null_ignores_value() {
    assert_eq!(
        decoded(r#"<p data-type="null" data-value="something"></p>"#),
        json!(null)
    );
}

// ============================================================================
// Fragments
// ============================================================================

#[test]
fn decode_multiple_from_fragment() {
    assert_eq!(
        decoded(
            r#"<p data-type="number" data-value="1"></p><p data-type="number" data-value="2"></p>"#
        ),
        json!([1, 2])
    );
}

#[test]
fn decode_single_from_fragment() {
    assert_eq!(
        decoded(r#" <p data-type="number" data-value="1"></p> "#),
        json!(1)
    );
}

#[test]
fn decode_empty_fragment_is_empty_array() {
    assert_eq!(decoded(""), json!([]));
    assert_eq!(decoded("<div><span>no data</span></div>"), json!([]));
}

#[test]
fn decode_single_array_in_fragment_is_not_unwrapped_twice() {
    assert_eq!(
        decoded(r#"<ol data-type="array"><li data-type="number" data-value="7"></li></ol>"#),
        json!([7])
    );
}

#[test]
fn decode_plain_element_root_acts_as_fragment() {
    assert_eq!(
        decoded(concat!(
            r#"<section>"#,
            r#"<p data-type="string" data-value="a"></p>"#,
            r#"<div><p data-type="string" data-value="b"></p></div>"#,
            r#"</section>"#
        )),
        json!(["a", "b"])
    );
}

#[test]
fn decode_text_node_is_null() {
    let mut dom = Dom::new();
    let text = dom.create_text("hello");
    assert_eq!(Mapper::new(dom).from(&text), Value::Null);
}

#[test]
fn decode_unknown_marker_is_a_wrapper() {
    assert_eq!(
        decoded(concat!(
            r#"<div data-type="date">"#,
            r#"<p data-type="number" data-value="1"></p>"#,
            r#"<p data-type="number" data-value="2"></p>"#,
            r#"</div>"#
        )),
        json!([1, 2])
    );
}

// ============================================================================
// Objects
// ============================================================================

const NESTING: &str = r#"
<div data-type="object">
  <div>
    <p data-type="string" data-name="foo" data-value="bar">Bar</p>
    <p data-type="string" data-name="baz" data-value="qux">Qux</p>
    <div>
      <p data-type="string" data-name="foobar" data-value="bazqux">BazQux</p>
    </div>
    <p data-type="string" data-value="no name">No Name</p>
  </div>
  <p data-type="string" data-name="hello" data-value="world">World</p>
  <div>
    <div>
      <div data-type="object" data-name="nested">
        <p data-type="number" data-name="a" data-value="1">One</p>
        <p data-type="number" data-name="b" data-value="2">Two</p>
      </div>
    </div>
  </div>
  <div data-type="string" data-name="missingStringValue"></div>
  <div data-type="number" data-name="missingNumberValue"></div>
  <div data-type="boolean" data-name="missingBooleanValue"></div>
</div>
"#;

#[test]
fn decode_any_nesting_skips_unnamed_and_missing_values() {
    assert_eq!(
        decoded(NESTING),
        json!({
            "foo": "bar",
            "baz": "qux",
            "foobar": "bazqux",
            "hello": "world",
            "nested": {"a": 1, "b": 2},
            "missingStringValue": null,
            "missingNumberValue": null,
            "missingBooleanValue": null
        })
    );
}

#[test]
fn decode_object_member_order_follows_document() {
    let value = decode_value(NESTING).unwrap();
    let names: Vec<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(
        names,
        [
            "foo",
            "baz",
            "foobar",
            "hello",
            "nested",
            "missingStringValue",
            "missingNumberValue",
            "missingBooleanValue"
        ]
    );
}

#[test]
fn decode_object_excludes_unnamed_descendant() {
    assert_eq!(
        decoded(concat!(
            r#"<dl data-type="object">"#,
            r#"<dd data-type="number" data-name="a" data-value="1"></dd>"#,
            r#"<dd data-type="number" data-value="2"></dd>"#,
            r#"<dd data-type="number" data-name="c" data-value="3"></dd>"#,
            r#"</dl>"#
        )),
        json!({"a": 1, "c": 3})
    );
}

#[test]
fn decode_object_excludes_empty_name() {
    assert_eq!(
        decoded(concat!(
            r#"<dl data-type="object">"#,
            r#"<dd data-type="null" data-name=""></dd>"#,
            r#"<dd data-type="null" data-name="x"></dd>"#,
            r#"</dl>"#
        )),
        json!({"x": null})
    );
}

#[test]
fn decode_duplicate_names_last_write_wins() {
    let value = decode_value(concat!(
        r#"<dl data-type="object">"#,
        r#"<dd data-type="number" data-name="a" data-value="1"></dd>"#,
        r#"<dd data-type="number" data-name="b" data-value="2"></dd>"#,
        r#"<dd data-type="number" data-name="a" data-value="3"></dd>"#,
        r#"</dl>"#
    ))
    .unwrap();

    assert_eq!(value.get("a"), Some(&Value::Number(3.0)));
    let names: Vec<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(names, ["a", "b"]);
}

// ============================================================================
// Arrays
// ============================================================================

#[test]
fn decode_array_keeps_named_elements() {
    assert_eq!(
        decoded(concat!(
            r#"<ol data-type="array">"#,
            r#"<li data-type="string" data-name="ignored" data-value="a"></li>"#,
            r#"<li data-type="string" data-value="b"></li>"#,
            r#"</ol>"#
        )),
        json!(["a", "b"])
    );
}

#[test]
fn decode_array_skips_slots_without_data() {
    assert_eq!(
        decoded(concat!(
            r#"<ol data-type="array">"#,
            r#"<li>just text</li>"#,
            r#"<li data-type="number" data-value="1"></li>"#,
            r#"</ol>"#
        )),
        json!([1])
    );
}

// ============================================================================
// Discovery modes
// ============================================================================

const GROUPED: &str = concat!(
    r#"<ol data-type="array">"#,
    r#"<li><span data-type="number" data-value="1"></span><span data-type="number" data-value="2"></span></li>"#,
    r#"<li><div><span data-type="number" data-value="3"></span></div></li>"#,
    r#"</ol>"#
);

#[test]
fn outermost_discovery_collects_every_data_node() {
    assert_eq!(
        decoded_with(GROUPED, Discovery::Outermost).to_json(),
        json!([1, 2, 3])
    );
}

#[test]
fn first_per_child_discovery_takes_one_per_subtree() {
    assert_eq!(
        decoded_with(GROUPED, Discovery::FirstPerChild).to_json(),
        json!([1, 3])
    );
}

#[test]
fn discovery_does_not_descend_into_data_nodes() {
    let markup = concat!(
        r#"<ol data-type="array">"#,
        r#"<li data-type="string" data-value="outer"><span data-type="string" data-value="inner"></span></li>"#,
        r#"</ol>"#
    );
    for discovery in [Discovery::Outermost, Discovery::FirstPerChild] {
        assert_eq!(decoded_with(markup, discovery).to_json(), json!(["outer"]));
    }
}

// ============================================================================
// Depth limit
// ============================================================================

#[test]
fn decode_beyond_depth_limit_degrades_to_null() {
    let markup = concat!(
        r#"<ol data-type="array"><li>"#,
        r#"<ol data-type="array"><li>"#,
        r#"<ol data-type="array"><li data-type="number" data-value="1"></li></ol>"#,
        r#"</li></ol>"#,
        r#"</li></ol>"#
    );
    let mut dom = Dom::new();
    let root = html::parse_fragment(&mut dom, markup).unwrap();
    let shallow = Mapper::with_options(Options::new().document(dom.clone()).max_depth(3)).unwrap();
    let deep = Mapper::with_options(Options::new().document(dom).max_depth(4)).unwrap();

    assert_eq!(shallow.from(&root).to_json(), json!([[[null]]]));
    assert_eq!(deep.from(&root).to_json(), json!([[[1]]]));
}

// ============================================================================
// String API
// ============================================================================

#[test]
fn decode_returns_compact_json() {
    assert_eq!(
        decode(r#"<ol data-type="array"><li data-type="number" data-value="1.25"></li></ol>"#)
            .unwrap(),
        "[1.25]"
    );
}

#[test]
fn decode_invalid_markup_fails() {
    assert!(decode("<p data-type=\"string\"></div>").is_err());
}
