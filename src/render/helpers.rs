//! Helper functions shared by the tree renderers

use crate::tree::Binary;

/// Convert Binary data to hexadecimal string
///
/// # Arguments
/// * `bin` - Decoded binary value
///
/// # Returns
/// Lowercase hexadecimal string of the payload
pub fn binary_to_hex(bin: &Binary) -> String {
    hex::encode(&bin.bytes)
}

/// Convert Binary data to Base64 string
///
/// # Arguments
/// * `bin` - Decoded binary value
///
/// # Returns
/// Standard-alphabet, padded Base64 string of the payload
pub fn binary_to_base64(bin: &Binary) -> String {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD.encode(&bin.bytes)
}

/// Two-digit hex rendering of a binary subtype, as extended JSON writes it
pub fn subtype_to_hex(subtype: u8) -> String {
    format!("{subtype:02x}")
}

/// Format double with reasonable precision
///
/// Whole numbers below 1e10 print without a fractional part.
pub fn format_double_smart(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e10 {
        format!("{:.0}", f)
    } else {
        format!("{}", f)
    }
}

/// Quote a string for single-line display
pub fn quote(s: &str) -> String {
    format!("{s:?}")
}
