//! Per-element conversion and container assembly
//!
//! [`Converter::convert_element`] dispatches on the element's type tag and is
//! the only place that recurses: embedded documents and arrays open two
//! cursors over their payload and hand them to the container walkers.

use bson::{Decimal128, oid::ObjectId, spec::ElementType};
use tracing::trace;

use super::cursor::{Cursor, Element};
use crate::config::{DecoderConfig, SizingStrategy};
use crate::error::DecodeError;
use crate::tree::{Binary, Document, Value};

type Result<T> = std::result::Result<T, DecodeError>;

/// Stateless element converter bound to a decoder configuration
pub(crate) struct Converter<'c> {
    config: &'c DecoderConfig,
}

impl<'c> Converter<'c> {
    pub(crate) fn new(config: &'c DecoderConfig) -> Self {
        Self { config }
    }

    /// Convert a single element into its native value
    ///
    /// `depth` is the nesting level of the container holding `element`.
    pub(crate) fn convert_element(&self, element: &Element<'_>, depth: usize) -> Result<Value> {
        let value = match element.kind() {
            ElementType::Int32 => self.int32(element.as_i32()),
            ElementType::Null => Value::Null,
            ElementType::Boolean => Value::Bool(element.as_bool()?),
            ElementType::Double => Value::Double(element.as_f64()),
            ElementType::Int64 => Value::Double(element.as_i64() as f64),
            ElementType::String | ElementType::JavaScriptCode => {
                Value::String(element.as_str()?.to_string())
            }
            ElementType::Binary => {
                let (subtype, bytes) = element.as_binary()?;
                Value::Binary(Binary::new(bytes.to_vec(), subtype))
            }
            ElementType::DateTime => Value::date(element.as_datetime_millis() as f64),
            ElementType::Decimal128 => {
                let decimal = Decimal128::from_bytes(element.as_decimal128_bytes());
                Value::String(decimal.to_string())
            }
            ElementType::Timestamp => {
                let (time, increment) = element.as_timestamp();
                Value::timestamp(self.uint32(time), self.uint32(increment))
            }
            ElementType::ObjectId => {
                Value::String(ObjectId::from_bytes(element.as_object_id_bytes()).to_hex())
            }
            ElementType::Array => {
                let (items, counter) = (element.recurse()?, element.recurse()?);
                Value::Array(self.convert_array(items, counter, depth + 1)?)
            }
            ElementType::EmbeddedDocument => {
                let (fields, counter) = (element.recurse()?, element.recurse()?);
                Value::Document(self.convert_document(fields, counter, depth + 1)?)
            }
            _ => {
                return Err(DecodeError::UnsupportedType {
                    tag: element.tag(),
                    key: element.key().to_string(),
                });
            }
        };
        Ok(value)
    }

    /// Walk an array container into an index-ordered sequence
    ///
    /// `counter` is an independent cursor over the same container, consumed
    /// only by the counting pass.
    pub(crate) fn convert_array(
        &self,
        items: Cursor<'_>,
        counter: Cursor<'_>,
        depth: usize,
    ) -> Result<Vec<Value>> {
        let count = self.prepare(counter, depth)?;
        let mut out = Vec::with_capacity(count);
        for element in items {
            out.push(self.convert_element(&element?, depth)?);
        }
        self.check_count(items, count, out.len())?;
        trace!(depth, len = out.len(), "converted array");
        Ok(out)
    }

    /// Walk a document container into an ordered key-value container
    pub(crate) fn convert_document(
        &self,
        fields: Cursor<'_>,
        counter: Cursor<'_>,
        depth: usize,
    ) -> Result<Document> {
        let count = self.prepare(counter, depth)?;
        let mut out = Document::with_capacity(count);
        for element in fields {
            let element = element?;
            let value = self.convert_element(&element, depth)?;
            out.push(element.key(), value);
        }
        self.check_count(fields, count, out.len())?;
        trace!(depth, len = out.len(), "converted document");
        Ok(out)
    }

    /// Enforce the depth limit and size the container's storage
    ///
    /// Under [`SizingStrategy::TwoPass`] the counting cursor is exhausted to
    /// find the element count; otherwise it is dropped unread.
    fn prepare(&self, counter: Cursor<'_>, depth: usize) -> Result<usize> {
        if depth > self.config.max_depth {
            return Err(DecodeError::DepthExceeded {
                limit: self.config.max_depth,
            });
        }
        match self.config.sizing {
            SizingStrategy::TwoPass => counter.count_remaining(),
            SizingStrategy::SinglePass => Ok(0),
        }
    }

    fn check_count(&self, cursor: Cursor<'_>, expected: usize, actual: usize) -> Result<()> {
        if self.config.sizing == SizingStrategy::TwoPass && expected != actual {
            return Err(DecodeError::malformed(
                cursor.start_offset(),
                format!(
                    "container of {} bytes counted {expected} elements but converted {actual}",
                    cursor.byte_len()
                ),
            ));
        }
        Ok(())
    }

    fn int32(&self, n: i32) -> Value {
        if self.config.missing_integer == Some(n) {
            Value::Double(f64::from(n))
        } else {
            Value::Int(n)
        }
    }

    /// Timestamp halves are unsigned; values past `i32::MAX` become doubles
    fn uint32(&self, n: u32) -> Value {
        match i32::try_from(n) {
            Ok(n) => self.int32(n),
            Err(_) => Value::Double(f64::from(n)),
        }
    }
}
