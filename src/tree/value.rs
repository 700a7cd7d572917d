//! Native value model produced by the decoder

use bson::spec::BinarySubtype;

use super::document::Document;

/// Key of the single entry in a decoded date-time record
pub const DATE_KEY: &str = "$date";

/// Key of the seconds entry in a decoded timestamp record
pub const TIMESTAMP_TIME_KEY: &str = "t";

/// Key of the increment entry in a decoded timestamp record
pub const TIMESTAMP_INCREMENT_KEY: &str = "i";

/// A decoded BSON value
///
/// Extended BSON types with no native counterpart are folded into these
/// variants using fixed shapes:
/// - date-time: `{ "$date": Double(millis) }`
/// - timestamp: `{ "t": Int(seconds), "i": Int(increment) }`
/// - decimal128: canonical decimal string
/// - object id: 24-character lowercase hex string
/// - int64: `Double`, which loses precision past 2^53
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i32),
    Double(f64),
    String(String),
    Binary(Binary),
    Array(Vec<Value>),
    Document(Document),
}

/// Binary payload together with its one-byte subtype
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary {
    pub bytes: Vec<u8>,
    pub subtype: u8,
}

impl Binary {
    pub fn new(bytes: Vec<u8>, subtype: u8) -> Self {
        Self { bytes, subtype }
    }

    /// The subtype as the `bson` crate's named enum
    pub fn subtype_kind(&self) -> BinarySubtype {
        BinarySubtype::from(self.subtype)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Value {
    /// Build the `{ "$date": millis }` record
    pub fn date(millis: f64) -> Self {
        let mut doc = Document::with_capacity(1);
        doc.push(DATE_KEY, Value::Double(millis));
        Value::Document(doc)
    }

    /// Build the `{ "t": time, "i": increment }` record
    pub fn timestamp(time: Value, increment: Value) -> Self {
        let mut doc = Document::with_capacity(2);
        doc.push(TIMESTAMP_TIME_KEY, time);
        doc.push(TIMESTAMP_INCREMENT_KEY, increment);
        Value::Document(doc)
    }

    /// Short lowercase name of the variant
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::Binary(_) => "binary",
            Value::Array(_) => "array",
            Value::Document(_) => "document",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value as `f64`, accepting both `Int` and `Double`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(f64::from(*n)),
            Value::Double(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&Binary> {
        match self {
            Value::Binary(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(doc) => Some(doc),
            _ => None,
        }
    }

    /// Millisecond payload if this is a `{ "$date": .. }` record
    pub fn as_date_millis(&self) -> Option<f64> {
        let doc = self.as_document()?;
        if doc.len() != 1 {
            return None;
        }
        doc.get(DATE_KEY)?.as_f64()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Double(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Binary> for Value {
    fn from(b: Binary) -> Self {
        Value::Binary(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::Document(doc)
    }
}
