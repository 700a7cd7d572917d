//! Rendering of decoded trees
//!
//! This module turns [`Value`](crate::tree::Value) trees into display forms
//! with interchangeable strategies:
//! - JSON value conversion (`serde_json::Value`)
//! - Plain single-line text
//!
//! # Design
//!
//! Every strategy implements the common trait `TreeConverter`, so callers can
//! pick the output form without caring how each variant is handled.

mod converter;
mod helpers;
mod strategies;

pub use converter::TreeConverter;
pub use helpers::{binary_to_base64, binary_to_hex, format_double_smart};
pub use strategies::{JsonConverter, PlainTextConverter};

#[cfg(test)]
mod tests;
