use std::{fmt, io};

/// Crate-wide `Result` type using [`BsonTreeError`] as the error.
///
/// This alias is re-exported by the parent `error` module and is intended
/// to be used throughout the crate for fallible operations.
pub type Result<T> = std::result::Result<T, BsonTreeError>;

/// Top-level error type for bsontree operations.
///
/// This type wraps more specific error kinds and provides a single
/// error type that can be used throughout the crate.
#[derive(Debug)]
pub enum BsonTreeError {
    /// Errors raised while walking a BSON buffer into a value tree.
    Decode(DecodeError),

    /// Errors surfaced from the BSON construction/rendering layer.
    Codec(CodecError),

    /// Configuration errors.
    Config(ConfigError),

    /// I/O errors.
    Io(io::Error),
}

/// Decoder-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Buffer-level corruption discovered mid-walk.
    MalformedDocument {
        /// Absolute byte offset in the top-level buffer.
        offset: usize,
        message: String,
    },

    /// Element type tag outside the supported set.
    UnsupportedType {
        /// Raw tag byte as found in the buffer.
        tag: u8,
        /// Key of the offending element.
        key: String,
    },

    /// Nesting deeper than the configured limit.
    DepthExceeded { limit: usize },
}

/// Errors from the external BSON construction layer.
///
/// Messages are the library's own diagnostics, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Malformed JSON text.
    ParseError(String),

    /// Malformed raw BSON bytes.
    ValidationError(String),
}

/// Configuration-specific errors.
#[derive(Debug)]
pub enum ConfigError {
    /// Config file not found.
    FileNotFound(String),

    /// Invalid config format.
    InvalidFormat(String),

    /// Invalid field value.
    InvalidValue { field: String, value: String },
}

impl DecodeError {
    /// Shorthand for a [`DecodeError::MalformedDocument`].
    pub fn malformed(offset: usize, message: impl Into<String>) -> Self {
        DecodeError::MalformedDocument {
            offset,
            message: message.into(),
        }
    }
}

/* ========================= Display & Error impls ========================= */

impl fmt::Display for BsonTreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BsonTreeError::Decode(e) => write!(f, "Decode error: {e}"),
            BsonTreeError::Codec(e) => write!(f, "{e}"),
            BsonTreeError::Config(e) => write!(f, "Configuration error: {e}"),
            BsonTreeError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::MalformedDocument { offset, message } => {
                write!(f, "Malformed document at byte {offset}: {message}")
            }
            DecodeError::UnsupportedType { tag, key } => {
                write!(f, "Unimplemented BSON type {tag} (0x{tag:02x}) for key '{key}'")
            }
            DecodeError::DepthExceeded { limit } => {
                write!(f, "Maximum nesting depth of {limit} exceeded")
            }
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::ParseError(msg) => write!(f, "{msg}"),
            CodecError::ValidationError(msg) => write!(f, "{msg}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::FileNotFound(path) => write!(f, "Config file not found: {path}"),
            ConfigError::InvalidFormat(msg) => write!(f, "Invalid config format: {msg}"),
            ConfigError::InvalidValue { field, value } => {
                write!(f, "Invalid value '{value}' for field '{field}'")
            }
        }
    }
}

impl std::error::Error for BsonTreeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BsonTreeError::Decode(e) => Some(e),
            BsonTreeError::Codec(e) => Some(e),
            BsonTreeError::Config(e) => Some(e),
            BsonTreeError::Io(e) => Some(e),
        }
    }
}

impl std::error::Error for DecodeError {}
impl std::error::Error for CodecError {}
impl std::error::Error for ConfigError {}

/* ========================= Conversions to BsonTreeError ========================= */

impl From<io::Error> for BsonTreeError {
    fn from(err: io::Error) -> Self {
        BsonTreeError::Io(err)
    }
}

impl From<DecodeError> for BsonTreeError {
    fn from(err: DecodeError) -> Self {
        BsonTreeError::Decode(err)
    }
}

impl From<CodecError> for BsonTreeError {
    fn from(err: CodecError) -> Self {
        BsonTreeError::Codec(err)
    }
}

impl From<ConfigError> for BsonTreeError {
    fn from(err: ConfigError) -> Self {
        BsonTreeError::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_type_message_includes_tag() {
        let err = DecodeError::UnsupportedType {
            tag: 0x0b,
            key: "re".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("11"));
        assert!(msg.contains("0x0b"));
        assert!(msg.contains("'re'"));
    }

    #[test]
    fn test_codec_message_is_verbatim() {
        let err: BsonTreeError = CodecError::ParseError("expected value at line 1".into()).into();
        assert_eq!(err.to_string(), "expected value at line 1");
    }

    #[test]
    fn test_malformed_shorthand() {
        let err = DecodeError::malformed(12, "truncated element");
        assert_eq!(
            err,
            DecodeError::MalformedDocument {
                offset: 12,
                message: "truncated element".to_string()
            }
        );
        assert_eq!(
            BsonTreeError::from(err).to_string(),
            "Decode error: Malformed document at byte 12: truncated element"
        );
    }
}
