//! BSON to native tree decoding
//!
//! The decoder is one depth-first walk over a BSON buffer:
//! - [`cursor`] frames elements and validates every length prefix
//! - `convert` dispatches on each element's type tag and assembles containers
//!
//! Each container is walked with two independent cursors: one exhausted to
//! count its elements, one to convert them into exactly-sized storage. No
//! partially built container is ever linked into its parent; any failure
//! aborts the whole call.
//!
//! # Example
//!
//! ```rust
//! use bsontree::decoder::Decoder;
//! use bsontree::tree::Value;
//!
//! let doc = bson::doc! { "b": 1, "a": [true, null] };
//! let mut bytes = Vec::new();
//! doc.to_writer(&mut bytes).unwrap();
//!
//! let value = Decoder::default().decode(&bytes).unwrap();
//! let doc = value.as_document().unwrap();
//! assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["b", "a"]);
//! assert_eq!(doc.get("b"), Some(&Value::Int(1)));
//! ```

pub mod cursor;

mod convert;

use bson::RawDocument;
use tracing::debug;

use crate::config::{Config, DecoderConfig};
use crate::error::{CodecError, DecodeError, Result};
use crate::tree::{Document, Value};

use convert::Converter;
use cursor::Cursor;

/// BSON decoder
///
/// Holds only configuration; a single instance can be shared across threads
/// and reused for any number of independent decodes.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    config: DecoderConfig,
}

impl Decoder {
    /// Create a decoder with the given settings
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    /// Create a decoder from the decoder section of a full configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.decoder.clone())
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode a top-level BSON document into `Value::Document`
    ///
    /// # Arguments
    /// * `bytes` - Complete BSON document; its declared length must match
    ///
    /// # Returns
    /// * `Result<Value>` - The decoded tree, owned by the caller
    pub fn decode(&self, bytes: &[u8]) -> Result<Value> {
        self.decode_document(bytes).map(Value::Document)
    }

    /// Decode a top-level BSON document into its ordered container
    pub fn decode_document(&self, bytes: &[u8]) -> Result<Document> {
        debug!("Decoding BSON document of {} bytes", bytes.len());
        let result = Cursor::new(bytes).and_then(|fields| {
            let counter = Cursor::new(bytes)?;
            Converter::new(&self.config).convert_document(fields, counter, 1)
        });
        Ok(log_failure(result)?)
    }

    /// Decode a BSON buffer holding an array as an index-ordered sequence
    ///
    /// Array buffers share the document framing; their keys are ignored.
    pub fn decode_array(&self, bytes: &[u8]) -> Result<Vec<Value>> {
        debug!("Decoding BSON array of {} bytes", bytes.len());
        let result = Cursor::new(bytes).and_then(|items| {
            let counter = Cursor::new(bytes)?;
            Converter::new(&self.config).convert_array(items, counter, 1)
        });
        Ok(log_failure(result)?)
    }

    /// Decode a document handle from the `bson` crate's raw API
    pub fn decode_raw(&self, doc: &RawDocument) -> Result<Value> {
        self.decode(doc.as_bytes())
    }

    /// Decode an owned `bson::Document` by serializing it first
    pub fn decode_bson(&self, doc: &bson::Document) -> Result<Value> {
        let mut bytes = Vec::new();
        doc.to_writer(&mut bytes)
            .map_err(|e| CodecError::ValidationError(e.to_string()))?;
        self.decode(&bytes)
    }
}

/// Decode a BSON document with the default configuration
pub fn decode(bytes: &[u8]) -> Result<Value> {
    Decoder::default().decode(bytes)
}

fn log_failure<T>(result: std::result::Result<T, DecodeError>) -> std::result::Result<T, DecodeError> {
    if let Err(e) = &result {
        debug!("BSON decode failed: {}", e);
    }
    result
}
