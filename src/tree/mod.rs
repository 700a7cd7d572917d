//! Output tree of the decoder
//!
//! [`Value`] is the closed set of native shapes a BSON buffer decodes to;
//! [`Document`] is its ordered key-value container.

mod document;
mod value;

pub use document::Document;
pub use value::{Binary, DATE_KEY, TIMESTAMP_INCREMENT_KEY, TIMESTAMP_TIME_KEY, Value};
