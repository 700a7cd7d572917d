//! Tests for the tree renderers

use super::*;
use crate::decoder::Decoder;
use crate::tree::{Binary, Document, Value};
use bson::{Bson, DateTime, Timestamp, doc};
use serde_json::{Value as JsonValue, json};

fn decode(doc: &bson::Document) -> Value {
    Decoder::default().decode_bson(doc).unwrap()
}

// ===== JsonConverter =====

#[test]
fn test_json_scalars() {
    let converter = JsonConverter::new();
    assert_eq!(converter.convert(&Value::Null), JsonValue::Null);
    assert_eq!(converter.convert(&Value::Bool(true)), json!(true));
    assert_eq!(converter.convert(&Value::Int(-7)), json!(-7));
    assert_eq!(converter.convert(&Value::Double(2.5)), json!(2.5));
    assert_eq!(converter.convert(&Value::from("hi")), json!("hi"));
}

#[test]
fn test_json_non_finite_double_is_null() {
    let converter = JsonConverter::new();
    assert_eq!(converter.convert(&Value::Double(f64::NAN)), JsonValue::Null);
    assert_eq!(converter.convert(&Value::Double(f64::INFINITY)), JsonValue::Null);
}

#[test]
fn test_json_binary_shape() {
    let converter = JsonConverter::new();
    let value = Value::Binary(Binary::new(vec![1, 2, 3], 0x80));
    assert_eq!(
        converter.convert(&value),
        json!({ "$binary": { "base64": "AQID", "subType": "80" } })
    );
}

#[test]
fn test_json_keeps_document_order() {
    let value = decode(&doc! { "z": 1, "a": 2, "m": [true, Bson::Null] });
    assert_eq!(
        JsonConverter::new().render(&value),
        r#"{"z":1,"a":2,"m":[true,null]}"#
    );
}

#[test]
fn test_json_duplicate_keys_last_wins() {
    let mut doc = Document::new();
    doc.push("k", Value::Int(1));
    doc.push("k", Value::Int(2));
    assert_eq!(
        JsonConverter::new().convert(&Value::Document(doc)),
        json!({ "k": 2 })
    );
}

#[test]
fn test_json_date_and_timestamp() {
    let value = decode(&doc! {
        "d": DateTime::from_millis(1_000),
        "ts": Timestamp { time: 5, increment: 6 },
    });
    assert_eq!(
        JsonConverter::new().convert(&value),
        json!({ "d": { "$date": 1000.0 }, "ts": { "t": 5, "i": 6 } })
    );
}

#[test]
fn test_json_pretty_is_indented() {
    let value = decode(&doc! { "a": 1 });
    assert_eq!(JsonConverter::new().render_pretty(&value), "{\n  \"a\": 1\n}");
}

#[test]
fn test_convert_optional() {
    let converter = JsonConverter::new();
    assert_eq!(converter.convert_optional(None), JsonValue::Null);
    assert_eq!(converter.convert_optional(Some(&Value::Int(3))), json!(3));
    assert_eq!(PlainTextConverter::new().convert_optional(None), "");
}

// ===== PlainTextConverter =====

#[test]
fn test_plain_scalars() {
    let converter = PlainTextConverter::new();
    assert_eq!(converter.convert(&Value::Null), "null");
    assert_eq!(converter.convert(&Value::Bool(false)), "false");
    assert_eq!(converter.convert(&Value::Int(42)), "42");
    assert_eq!(converter.convert(&Value::Double(42.0)), "42");
    assert_eq!(converter.convert(&Value::Double(0.25)), "0.25");
    assert_eq!(converter.convert(&Value::from("a b")), "\"a b\"");
}

#[test]
fn test_plain_binary_is_hex() {
    let value = Value::Binary(Binary::new(vec![0xde, 0xad], 5));
    assert_eq!(PlainTextConverter::new().convert(&value), "Binary(5, dead)");
}

#[test]
fn test_plain_nested() {
    let value = decode(&doc! { "a": [1, "x"], "o": {}, "e": [] });
    assert_eq!(
        PlainTextConverter::new().convert(&value),
        r#"{ "a": [1, "x"], "o": {}, "e": [] }"#
    );
}

#[test]
fn test_plain_keeps_duplicates() {
    let doc: Document = vec![("k", Value::Int(1)), ("k", Value::Int(2))]
        .into_iter()
        .collect();
    assert_eq!(
        PlainTextConverter::new().convert(&Value::Document(doc)),
        r#"{ "k": 1, "k": 2 }"#
    );
}
