use jsontree_core::{
    free, parse, parse_with, ArrayEntry, Diagnostic, ErrorKind, Kind, ParseOptions, Payload,
    Precision, Value,
};

/// The sample document: four members, one nested object, one array.
const SAMPLE: &str = r#"{ "item1":"value1" "item2":"value2" "item3":{ "sub1":"subvalue1" "sub2":"subvalue2" } "item4":["first","second","third","fourth"] }"#;

fn names(values: &[Value]) -> Vec<&str> {
    values.iter().map(Value::name).collect()
}

// ============================================================================
// End-to-end
// ============================================================================

#[test]
fn sample_document_shape() {
    let doc = parse(SAMPLE).unwrap();
    let root = doc.root().unwrap();

    assert_eq!(root.name(), "root");
    assert_eq!(names(root.values()), ["item1", "item2", "item3", "item4"]);
    assert_eq!(root.get("item1").and_then(Value::as_str), Some("value1"));
    assert_eq!(root.get("item2").and_then(Value::as_str), Some("value2"));

    let item3 = root.get("item3").unwrap();
    assert_eq!(item3.kind(), Kind::Object);
    let sub = item3.as_object().unwrap();
    assert_eq!(names(sub.values()), ["sub1", "sub2"]);
    assert!(sub.values().iter().all(|v| v.kind() == Kind::String));
    assert_eq!(sub.get("sub1").and_then(Value::as_str), Some("subvalue1"));
    assert_eq!(sub.get("sub2").and_then(Value::as_str), Some("subvalue2"));

    let item4 = root.get("item4").unwrap();
    assert_eq!(item4.kind(), Kind::Array);
    let arr = item4.as_array().unwrap();
    let entries: Vec<_> = arr.entries().collect();
    assert_eq!(entries.len(), 5);
    assert_eq!(
        entries.iter().map(|e| e.name()).collect::<Vec<_>>(),
        ["#0", "#1", "#2", "#3", ""]
    );
    assert!(entries[4].is_sentinel());
    let texts: Vec<_> = arr.iter().filter_map(Value::as_str).collect();
    assert_eq!(texts, ["first", "second", "third", "fourth"]);

    assert!(doc.diagnostics().is_empty());
}

#[test]
fn indented_multiline_document() {
    let input = "{\n\t\"item1\" : \"value1\"\n\t\"item3\" : {\n\t\t\"sub1\" : \"subvalue1\"\n\t}\n\t\"item4\" : [ \"first\", \"second\" ]\n}";
    let doc = parse(input).unwrap();
    let root = doc.root().unwrap();
    assert_eq!(names(root.values()), ["item1", "item3", "item4"]);
    assert_eq!(
        root.get("item4").and_then(Value::as_array).map(|a| a.len()),
        Some(2)
    );
}

#[test]
fn space_indented_document() {
    let input = "{\n    \"a\": 1,\n    \"b\": {\n        \"c\": null\n    }\n}\n";
    let doc = parse(input).unwrap();
    let root = doc.root().unwrap();
    assert_eq!(root.get("a").and_then(Value::as_i64), Some(1));
    let b = root.get("b").and_then(Value::as_object).unwrap();
    assert!(b.get("c").unwrap().is_null());
}

#[test]
fn comma_separated_compact_document() {
    let doc = parse(r#"{"a":"x","b":"y"}"#).unwrap();
    let root = doc.root().unwrap();
    assert_eq!(names(root.values()), ["a", "b"]);
}

// ============================================================================
// Objects
// ============================================================================

#[test]
fn empty_root_object() {
    let doc = parse("{}").unwrap();
    assert!(doc.root().unwrap().is_empty());
}

#[test]
fn empty_nested_object() {
    let doc = parse(r#"{"a":{},"b":1}"#).unwrap();
    let root = doc.root().unwrap();
    assert!(root.get("a").and_then(Value::as_object).unwrap().is_empty());
    assert_eq!(root.get("b").and_then(Value::as_i64), Some(1));
}

#[test]
fn closing_nested_object_restores_parent() {
    let input = r#"{"a":{"b":{"x":1},"after_b":2},"after_a":3}"#;
    let doc = parse(input).unwrap();
    let root = doc.root().unwrap();

    assert_eq!(names(root.values()), ["a", "after_a"]);
    let a = root.get("a").and_then(Value::as_object).unwrap();
    assert_eq!(a.name(), "a");
    assert_eq!(names(a.values()), ["b", "after_b"]);
    let b = a.get("b").and_then(Value::as_object).unwrap();
    assert_eq!(names(b.values()), ["x"]);

    // b is reachable only through a
    assert!(root.get("b").is_none());
    assert!(root.get("x").is_none());
}

#[test]
fn duplicate_members_are_retained_in_order() {
    let doc = parse(r#"{"k":"first","k":"second"}"#).unwrap();
    let root = doc.root().unwrap();
    assert_eq!(root.len(), 2);
    let all: Vec<_> = root.get_all("k").filter_map(Value::as_str).collect();
    assert_eq!(all, ["first", "second"]);
    assert_eq!(root.get("k").and_then(Value::as_str), Some("first"));
}

#[test]
fn escaped_quotes_in_keys_and_values() {
    let doc = parse(r#"{"say \"hi\"":"a\\b"}"#).unwrap();
    let v = &doc.root().unwrap().values()[0];
    assert_eq!(v.name(), "say \"hi\"");
    assert_eq!(v.as_str(), Some("a\\b"));
}

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn negative_number() {
    let doc = parse(r#"{"n":-42}"#).unwrap();
    let n = doc.root().unwrap().get("n").unwrap();
    assert_eq!(n.kind(), Kind::Number);
    assert_eq!(n.payload(), &Payload::Number(-42));
}

#[test]
fn integer_extremes() {
    let doc = parse(r#"{"max":9223372036854775807,"min":-9223372036854775808}"#).unwrap();
    let root = doc.root().unwrap();
    assert_eq!(root.get("max").and_then(Value::as_i64), Some(i64::MAX));
    assert_eq!(root.get("min").and_then(Value::as_i64), Some(i64::MIN));
}

#[test]
fn fractional_numbers_default_to_double() {
    let doc = parse(r#"{"pi":3.5,"e":-1e3}"#).unwrap();
    let root = doc.root().unwrap();
    assert_eq!(root.get("pi").map(Value::payload), Some(&Payload::Double(3.5)));
    assert_eq!(root.get("e").map(Value::payload), Some(&Payload::Double(-1000.0)));
}

#[test]
fn single_precision_yields_float() {
    let opts = ParseOptions::default().with_precision(Precision::Single);
    let doc = parse_with(r#"{"x":0.25}"#, &opts).unwrap();
    let x = doc.root().unwrap().get("x").unwrap();
    assert_eq!(x.kind(), Kind::Float);
    assert_eq!(x.payload(), &Payload::Float(0.25));
}

#[test]
fn booleans() {
    let doc = parse(r#"{"t":true,"f":false}"#).unwrap();
    let root = doc.root().unwrap();
    assert_eq!(root.get("t").and_then(Value::as_bool), Some(true));
    assert_eq!(root.get("f").and_then(Value::as_bool), Some(false));
    assert_eq!(root.get("t").map(Value::kind), Some(Kind::Boolean));
}

#[test]
fn any_other_bare_word_is_null() {
    let doc = parse("{\"a\":null,\"b\":nil,\"c\":foo\n}").unwrap();
    let root = doc.root().unwrap();
    for (name, word) in [("a", "null"), ("b", "nil"), ("c", "foo")] {
        let v = root.get(name).unwrap();
        assert_eq!(v.kind(), Kind::Null, "member {name}");
        assert_eq!(v.as_str(), Some(word));
    }
}

#[test]
fn unrecognized_bare_words_are_reported() {
    let doc = parse(r#"{"a":null,"b":nil}"#).unwrap();
    assert_eq!(
        doc.diagnostics(),
        [Diagnostic::UnrecognizedLiteral {
            name: "b".to_string(),
            word: "nil".to_string(),
            offset: 14,
        }]
    );
}

#[test]
fn array_bare_words_are_reported_by_element_name() {
    let doc = parse(r#"{"a":[true,maybe]}"#).unwrap();
    match &doc.diagnostics()[0] {
        Diagnostic::UnrecognizedLiteral { name, word, .. } => {
            assert_eq!(name, "#1");
            assert_eq!(word, "maybe");
        }
    }
}

// ============================================================================
// Arrays
// ============================================================================

#[test]
fn empty_array_is_only_a_sentinel() {
    let doc = parse(r#"{"a":[]}"#).unwrap();
    let arr = doc.root().unwrap().get("a").and_then(Value::as_array).unwrap();
    assert!(arr.is_empty());
    let entries: Vec<_> = arr.entries().collect();
    assert_eq!(entries, [ArrayEntry::Sentinel]);
}

#[test]
fn mixed_scalar_array() {
    let doc = parse(r#"{"a":["s",-3,7,false,null]}"#).unwrap();
    let arr = doc.root().unwrap().get("a").and_then(Value::as_array).unwrap();
    let kinds: Vec<_> = arr.iter().map(Value::kind).collect();
    assert_eq!(
        kinds,
        [Kind::String, Kind::Number, Kind::Number, Kind::Boolean, Kind::Null]
    );
    assert_eq!(arr.get(1).and_then(Value::as_i64), Some(-3));
}

#[test]
fn array_followed_by_sibling() {
    let doc = parse(r#"{"a":[1,2],"b":"after"}"#).unwrap();
    let root = doc.root().unwrap();
    assert_eq!(names(root.values()), ["a", "b"]);
}

// ============================================================================
// Trailing content
// ============================================================================

#[test]
fn trailing_whitespace_is_fine() {
    assert!(parse("{\"a\":1}\n\t ").is_ok());
}

#[test]
fn trailing_content_allowed_by_option() {
    let opts = ParseOptions::default().with_allow_trailing_content(true);
    let doc = parse_with(r#"{"a":1} {"b":2}"#, &opts).unwrap();
    assert_eq!(names(doc.root().unwrap().values()), ["a"]);
}

#[test]
fn parses_are_independent() {
    let first = parse(r#"{"a":{"b":1}}"#).unwrap();
    let second = parse(r#"{"c":2}"#).unwrap();
    assert_eq!(names(first.root().unwrap().values()), ["a"]);
    assert_eq!(names(second.root().unwrap().values()), ["c"]);
}

// ============================================================================
// Deep nesting under a raised depth limit
// ============================================================================

const DEEP: usize = 100_000;

fn nested(depth: usize, closed: bool) -> String {
    let mut input = String::from("{");
    for _ in 0..depth {
        input.push_str(r#""a":{"#);
    }
    if closed {
        input.push_str(&"}".repeat(depth + 1));
    }
    input
}

fn unlimited() -> ParseOptions {
    ParseOptions::default().with_max_depth(usize::MAX)
}

#[test]
fn deep_document_parses_and_frees() {
    let doc = parse_with(&nested(DEEP, true), &unlimited()).unwrap();
    let released = free(doc);
    assert_eq!(released.nodes, DEEP + 1);
    assert_eq!(released.values, DEEP);
    assert_eq!(released.strings, 2 * DEEP + 1);
}

#[test]
fn deep_document_drops() {
    let doc = parse_with(&nested(DEEP, true), &unlimited()).unwrap();
    assert_eq!(doc.root().map(|root| root.len()), Some(1));
    drop(doc);
}

#[test]
fn deep_unclosed_document_fails_cleanly() {
    let err = parse_with(&nested(DEEP, false), &unlimited()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::UnclosedObject { depth: DEEP + 1 });
}
