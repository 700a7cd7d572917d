//! Error handling for BSON decoding and the companion codec.
//!
//! This module provides:
//! - Decoder errors raised while walking a BSON buffer
//! - Codec errors surfaced verbatim from the `bson` crate
//! - Configuration errors
//!
//! # Example
//!
//! ```rust
//! use bsontree::error::{BsonTreeError, DecodeError, Result};
//!
//! fn check(depth: usize, limit: usize) -> Result<()> {
//!     if depth > limit {
//!         return Err(DecodeError::DepthExceeded { limit }.into());
//!     }
//!     Ok(())
//! }
//!
//! assert!(matches!(check(3, 2), Err(BsonTreeError::Decode(_))));
//! ```

pub mod kinds;

// Re-export commonly used types
pub use kinds::{BsonTreeError, CodecError, ConfigError, DecodeError, Result};
