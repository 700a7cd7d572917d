//! BSON to native tree decoding
//!
//! This library turns BSON documents into an owned, dynamically typed tree of
//! native values and ships a small companion codec over the `bson` crate.
//!
//! # Modules
//!
//! - `codec`: JSON and raw bytes to BSON, BSON to JSON, bytes or tree
//! - `config`: Configuration management
//! - `decoder`: Buffer walker and value converter
//! - `error`: Error types and handling
//! - `logging`: Optional `tracing` subscriber setup
//! - `render`: Display forms for decoded trees
//! - `tree`: The decoded value model
//!
//! # Example
//!
//! ```rust
//! use bsontree::{Value, codec, decoder::Decoder, render::JsonConverter};
//!
//! let decoder = Decoder::default();
//! let tree = codec::json_to_tree(r#"{"n": {"$numberLong": "7"}, "tags": ["a"]}"#, &decoder)?;
//!
//! let doc = tree.as_document().unwrap();
//! assert_eq!(doc.get("n"), Some(&Value::Double(7.0)));
//! assert_eq!(JsonConverter::new().render(&tree), r#"{"n":7.0,"tags":["a"]}"#);
//! # Ok::<(), bsontree::BsonTreeError>(())
//! ```

pub mod codec;
pub mod config;
pub mod decoder;
pub mod error;
pub mod logging;
pub mod render;
pub mod tree;

// Re-export commonly used types
pub use config::Config;
pub use decoder::{Decoder, decode};
pub use error::{BsonTreeError, Result};
pub use tree::{Binary, Document, Value};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library version string
///
/// # Returns
/// * `&str` - Version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_top_level_decode() {
        let mut bytes = Vec::new();
        bson::doc! { "a": 1 }.to_writer(&mut bytes).unwrap();
        let value = decode(&bytes).unwrap();
        assert_eq!(value.as_document().and_then(|d| d.get("a")), Some(&Value::Int(1)));
    }
}
