//! Strategy implementations for tree rendering
//!
//! This module provides concrete implementations of the converter trait:
//! - JsonConverter: JSON value conversion
//! - PlainTextConverter: Single-line text for logs and diagnostics

use serde_json::{Map, Value as JsonValue, json};

use super::converter::TreeConverter;
use super::helpers::*;
use crate::tree::{Binary, Document, Value};

/// JSON converter for turning decoded trees into `serde_json` values
///
/// Binary payloads are written in the extended JSON `$binary` shape.
/// Non-finite doubles have no JSON form and become `null`. Keys keep
/// document order; when a key repeats the last entry wins.
pub struct JsonConverter;

impl JsonConverter {
    /// Create a new JSON converter
    pub fn new() -> Self {
        Self
    }

    /// Render a value as compact JSON text
    pub fn render(&self, value: &Value) -> String {
        self.convert(value).to_string()
    }

    /// Render a value as indented JSON text
    pub fn render_pretty(&self, value: &Value) -> String {
        let json = self.convert(value);
        serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string())
    }
}

impl Default for JsonConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeConverter for JsonConverter {
    type Output = JsonValue;

    fn convert_null(&self) -> JsonValue {
        JsonValue::Null
    }

    fn convert_bool(&self, b: bool) -> JsonValue {
        JsonValue::Bool(b)
    }

    fn convert_int(&self, n: i32) -> JsonValue {
        JsonValue::from(n)
    }

    fn convert_double(&self, f: f64) -> JsonValue {
        serde_json::Number::from_f64(f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null)
    }

    fn convert_string(&self, s: &str) -> JsonValue {
        JsonValue::String(s.to_string())
    }

    fn convert_binary(&self, bin: &Binary) -> JsonValue {
        json!({
            "$binary": {
                "base64": binary_to_base64(bin),
                "subType": subtype_to_hex(bin.subtype),
            }
        })
    }

    fn convert_array(&self, items: &[Value]) -> JsonValue {
        JsonValue::Array(items.iter().map(|v| self.convert(v)).collect())
    }

    fn convert_document(&self, doc: &Document) -> JsonValue {
        let mut map = Map::with_capacity(doc.len());
        for (key, value) in doc.iter() {
            map.insert(key.to_string(), self.convert(value));
        }
        JsonValue::Object(map)
    }
}

/// Plain text converter for single-line display
///
/// Strings are quoted, binary payloads print as `Binary(<subtype>, <hex>)`
/// and documents list every entry, duplicates included.
pub struct PlainTextConverter;

impl PlainTextConverter {
    /// Create a new plain text converter
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeConverter for PlainTextConverter {
    type Output = String;

    fn convert_null(&self) -> String {
        String::from("null")
    }

    fn convert_bool(&self, b: bool) -> String {
        b.to_string()
    }

    fn convert_int(&self, n: i32) -> String {
        n.to_string()
    }

    fn convert_double(&self, f: f64) -> String {
        format_double_smart(f)
    }

    fn convert_string(&self, s: &str) -> String {
        quote(s)
    }

    fn convert_binary(&self, bin: &Binary) -> String {
        format!("Binary({}, {})", bin.subtype, binary_to_hex(bin))
    }

    fn convert_array(&self, items: &[Value]) -> String {
        let parts: Vec<String> = items.iter().map(|v| self.convert(v)).collect();
        format!("[{}]", parts.join(", "))
    }

    fn convert_document(&self, doc: &Document) -> String {
        if doc.is_empty() {
            return "{}".to_string();
        }
        let parts: Vec<String> = doc
            .iter()
            .map(|(key, value)| format!("{}: {}", quote(key), self.convert(value)))
            .collect();
        format!("{{ {} }}", parts.join(", "))
    }
}
