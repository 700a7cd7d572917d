//! Companion codec over the `bson` crate
//!
//! Construction and rendering of BSON handles is delegated to the `bson`
//! crate; this module only adapts its errors and hands finished handles to
//! the [`Decoder`]:
//! - JSON text to BSON (`ParseError` on malformed JSON)
//! - raw bytes to BSON (`ValidationError` on malformed bytes)
//! - BSON to canonical or relaxed extended JSON
//! - BSON to raw bytes
//! - BSON to native tree
//!
//! Library diagnostics are passed through verbatim.

use bson::{Bson, Document, RawDocument, RawDocumentBuf};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::decoder::Decoder;
use crate::error::{CodecError, Result};
use crate::tree::Value;

/// Build a BSON document from (extended) JSON text
///
/// # Arguments
/// * `json` - JSON object text; `$oid`, `$date` and other extended JSON
///   wrappers are honored
///
/// # Returns
/// * `Result<RawDocumentBuf>` - The document, or `ParseError` with the
///   parser's message
pub fn json_to_bson(json: &str) -> Result<RawDocumentBuf> {
    let parsed: JsonValue =
        serde_json::from_str(json).map_err(|e| CodecError::ParseError(e.to_string()))?;
    let doc = match Bson::try_from(parsed).map_err(|e| CodecError::ParseError(e.to_string()))? {
        Bson::Document(doc) => doc,
        other => {
            return Err(CodecError::ParseError(format!(
                "expected a JSON object at top level, found {:?}",
                other.element_type()
            ))
            .into());
        }
    };
    let raw =
        RawDocumentBuf::from_document(&doc).map_err(|e| CodecError::ParseError(e.to_string()))?;
    debug!("Built BSON document of {} bytes from JSON", raw.as_bytes().len());
    Ok(raw)
}

/// Validate raw bytes as a BSON document and take ownership of them
///
/// Every element is checked, nested containers included.
pub fn raw_to_bson(bytes: Vec<u8>) -> Result<RawDocumentBuf> {
    let raw =
        RawDocumentBuf::from_bytes(bytes).map_err(|e| CodecError::ValidationError(e.to_string()))?;
    Document::from_reader(raw.as_bytes())
        .map_err(|e| CodecError::ValidationError(e.to_string()))?;
    Ok(raw)
}

/// Render a document as canonical extended JSON
pub fn bson_to_json(doc: &RawDocument) -> Result<String> {
    let doc = to_document(doc)?;
    render(Bson::Document(doc).into_canonical_extjson())
}

/// Render a document as relaxed extended JSON
///
/// Numbers and dates use their natural JSON forms where that is lossless
/// enough; this is the legacy shell rendering.
pub fn bson_to_relaxed_json(doc: &RawDocument) -> Result<String> {
    let doc = to_document(doc)?;
    render(Bson::Document(doc).into_relaxed_extjson())
}

/// Raw bytes of a document
pub fn bson_to_raw(doc: &RawDocument) -> Vec<u8> {
    doc.as_bytes().to_vec()
}

/// Decode a document into a native tree
pub fn bson_to_tree(doc: &RawDocument, decoder: &Decoder) -> Result<Value> {
    decoder.decode_raw(doc)
}

/// Parse JSON text and decode it into a native tree
pub fn json_to_tree(json: &str, decoder: &Decoder) -> Result<Value> {
    let raw = json_to_bson(json)?;
    bson_to_tree(&raw, decoder)
}

/// Validate raw bytes and decode them into a native tree
pub fn raw_to_tree(bytes: Vec<u8>, decoder: &Decoder) -> Result<Value> {
    let raw = raw_to_bson(bytes)?;
    bson_to_tree(&raw, decoder)
}

fn to_document(doc: &RawDocument) -> Result<Document> {
    Ok(Document::from_reader(doc.as_bytes())
        .map_err(|e| CodecError::ValidationError(e.to_string()))?)
}

fn render(value: JsonValue) -> Result<String> {
    Ok(serde_json::to_string(&value).map_err(|e| CodecError::ValidationError(e.to_string()))?)
}
