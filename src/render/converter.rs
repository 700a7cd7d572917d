//! Core converter trait for rendering decoded trees
//!
//! This module defines the trait that all tree renderers implement.

use crate::tree::{Binary, Document, Value};

/// Core trait for value tree conversion
///
/// Implementors provide one method per variant; [`TreeConverter::convert`]
/// does the dispatch.
pub trait TreeConverter {
    /// Output type of the conversion
    type Output;

    fn convert_null(&self) -> Self::Output;
    fn convert_bool(&self, b: bool) -> Self::Output;
    fn convert_int(&self, n: i32) -> Self::Output;
    fn convert_double(&self, f: f64) -> Self::Output;
    fn convert_string(&self, s: &str) -> Self::Output;
    fn convert_binary(&self, bin: &Binary) -> Self::Output;
    fn convert_array(&self, items: &[Value]) -> Self::Output;
    fn convert_document(&self, doc: &Document) -> Self::Output;

    /// Convert a value of any variant
    fn convert(&self, value: &Value) -> Self::Output {
        match value {
            Value::Null => self.convert_null(),
            Value::Bool(b) => self.convert_bool(*b),
            Value::Int(n) => self.convert_int(*n),
            Value::Double(f) => self.convert_double(*f),
            Value::String(s) => self.convert_string(s),
            Value::Binary(bin) => self.convert_binary(bin),
            Value::Array(items) => self.convert_array(items),
            Value::Document(doc) => self.convert_document(doc),
        }
    }

    /// Convert an optional value
    ///
    /// # Arguments
    /// * `value` - Optional value to convert
    ///
    /// # Returns
    /// Converted value or default for None
    fn convert_optional(&self, value: Option<&Value>) -> Self::Output
    where
        Self::Output: Default,
    {
        value.map(|v| self.convert(v)).unwrap_or_default()
    }
}
