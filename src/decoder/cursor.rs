//! Element cursor over a BSON container
//!
//! A [`Cursor`] is a read-only, `Copy` view positioned inside one document or
//! array buffer. Copying a cursor yields an independent cursor over the same
//! region, which is how the walker gets its counting pass for free.
//!
//! Every length prefix is checked against the enclosing container before any
//! payload is exposed, so accessors on [`Element`] only ever see in-bounds
//! slices of the expected width. The typed accessors assume the caller has
//! already matched on [`Element::kind`] and stay crate-private.

use bson::spec::ElementType;

use crate::error::DecodeError;

/// Smallest valid document: length prefix plus terminator
pub const MIN_DOCUMENT_LEN: usize = 5;

type Result<T> = std::result::Result<T, DecodeError>;

/// Position-tracking view over one BSON container
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    /// Container bytes, exactly as long as the declared length
    buf: &'a [u8],
    /// Absolute offset of `buf[0]` in the top-level buffer
    base: usize,
    /// Offset of the next element, relative to `buf`
    pos: usize,
    finished: bool,
}

/// One element of a container: key, type tag and payload
#[derive(Debug, Clone, Copy)]
pub struct Element<'a> {
    key: &'a str,
    tag: u8,
    kind: ElementType,
    payload: &'a [u8],
    /// Absolute offset of `payload[0]`
    offset: usize,
}

impl<'a> Cursor<'a> {
    /// Open a cursor over a top-level document
    ///
    /// The declared length must match `bytes.len()` exactly.
    pub fn new(bytes: &'a [u8]) -> Result<Self> {
        let cursor = Self::at(bytes, 0)?;
        if cursor.buf.len() != bytes.len() {
            return Err(DecodeError::malformed(
                cursor.buf.len(),
                format!(
                    "declared length {} but buffer holds {} bytes",
                    cursor.buf.len(),
                    bytes.len()
                ),
            ));
        }
        Ok(cursor)
    }

    /// Open a cursor over a container starting at absolute offset `base`
    pub(crate) fn at(bytes: &'a [u8], base: usize) -> Result<Self> {
        if bytes.len() < MIN_DOCUMENT_LEN {
            return Err(DecodeError::malformed(
                base,
                format!("container needs at least {MIN_DOCUMENT_LEN} bytes, got {}", bytes.len()),
            ));
        }
        let declared = read_i32(bytes, 0);
        let len = match usize::try_from(declared) {
            Ok(len) if (MIN_DOCUMENT_LEN..=bytes.len()).contains(&len) => len,
            _ => {
                return Err(DecodeError::malformed(
                    base,
                    format!(
                        "invalid container length {declared} with {} bytes available",
                        bytes.len()
                    ),
                ));
            }
        };
        if bytes[len - 1] != 0 {
            return Err(DecodeError::malformed(
                base + len - 1,
                "container is not NUL-terminated",
            ));
        }
        Ok(Self {
            buf: &bytes[..len],
            base,
            pos: 4,
            finished: false,
        })
    }

    /// Absolute offset of the container's length prefix
    pub fn start_offset(&self) -> usize {
        self.base
    }

    /// Total byte length of the container, prefix and terminator included
    pub fn byte_len(&self) -> usize {
        self.buf.len()
    }

    /// Advance to the next element
    ///
    /// Returns `Ok(None)` once the terminator is reached.
    pub fn next_element(&mut self) -> Result<Option<Element<'a>>> {
        if self.finished {
            return Ok(None);
        }
        match self.read_element() {
            Ok(Some(element)) => Ok(Some(element)),
            Ok(None) => {
                self.finished = true;
                Ok(None)
            }
            Err(e) => {
                self.finished = true;
                Err(e)
            }
        }
    }

    /// Exhaust this cursor, counting the elements left
    ///
    /// Fails on the first malformed element, so a successful count also
    /// proves every remaining element is well-framed.
    pub fn count_remaining(mut self) -> Result<usize> {
        let mut count = 0;
        while self.next_element()?.is_some() {
            count += 1;
        }
        Ok(count)
    }

    fn read_element(&mut self) -> Result<Option<Element<'a>>> {
        // Everything before the trailing NUL.
        let body_end = self.buf.len() - 1;
        if self.pos >= body_end {
            return Ok(None);
        }

        let tag_offset = self.base + self.pos;
        let tag = self.buf[self.pos];
        if tag == 0 {
            return Err(DecodeError::malformed(
                tag_offset,
                "unexpected terminator before end of container",
            ));
        }

        let key_start = self.pos + 1;
        let key_len = find_nul(&self.buf[key_start..body_end]).ok_or_else(|| {
            DecodeError::malformed(self.base + key_start, "unterminated element key")
        })?;
        let key = std::str::from_utf8(&self.buf[key_start..key_start + key_len]).map_err(|_| {
            DecodeError::malformed(self.base + key_start, "element key is not valid UTF-8")
        })?;

        let kind = ElementType::from(tag).ok_or_else(|| DecodeError::UnsupportedType {
            tag,
            key: key.to_string(),
        })?;

        let payload_start = key_start + key_len + 1;
        let offset = self.base + payload_start;
        let rest = &self.buf[payload_start..body_end];
        let size = payload_len(kind, rest, offset)?;
        if size > rest.len() {
            return Err(DecodeError::malformed(
                offset,
                format!(
                    "element '{key}' needs {size} bytes but only {} remain",
                    rest.len()
                ),
            ));
        }

        self.pos = payload_start + size;
        Ok(Some(Element {
            key,
            tag,
            kind,
            payload: &rest[..size],
            offset,
        }))
    }
}

impl<'a> Iterator for Cursor<'a> {
    type Item = Result<Element<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_element().transpose()
    }
}

impl<'a> Element<'a> {
    pub fn key(&self) -> &'a str {
        self.key
    }

    /// Raw type tag byte
    pub fn tag(&self) -> u8 {
        self.tag
    }

    pub fn kind(&self) -> ElementType {
        self.kind
    }

    /// Absolute offset of the payload
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub(crate) fn as_f64(&self) -> f64 {
        f64::from_le_bytes(self.fixed::<8>())
    }

    pub(crate) fn as_i32(&self) -> i32 {
        i32::from_le_bytes(self.fixed::<4>())
    }

    pub(crate) fn as_i64(&self) -> i64 {
        i64::from_le_bytes(self.fixed::<8>())
    }

    pub(crate) fn as_bool(&self) -> Result<bool> {
        match self.payload.first() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            other => Err(DecodeError::malformed(
                self.offset,
                format!("invalid boolean byte {:?} for '{}'", other, self.key),
            )),
        }
    }

    /// UTF-8 payload of a string, code or symbol element
    pub(crate) fn as_str(&self) -> Result<&'a str> {
        let bytes = self.string_at(0)?;
        std::str::from_utf8(bytes).map_err(|_| {
            DecodeError::malformed(
                self.offset,
                format!("string '{}' is not valid UTF-8", self.key),
            )
        })
    }

    /// Binary subtype and data
    ///
    /// For the deprecated subtype 0x02 the redundant inner length prefix is
    /// checked and stripped.
    pub(crate) fn as_binary(&self) -> Result<(u8, &'a [u8])> {
        let subtype = self.payload[4];
        let data = &self.payload[5..];
        if subtype != 0x02 {
            return Ok((subtype, data));
        }
        if data.len() < 4 || usize::try_from(read_i32(data, 0)).ok() != Some(data.len() - 4) {
            return Err(DecodeError::malformed(
                self.offset + 5,
                format!("old binary '{}' has an inconsistent inner length", self.key),
            ));
        }
        Ok((subtype, &data[4..]))
    }

    /// Milliseconds since the Unix epoch
    pub(crate) fn as_datetime_millis(&self) -> i64 {
        self.as_i64()
    }

    pub(crate) fn as_decimal128_bytes(&self) -> [u8; 16] {
        self.fixed::<16>()
    }

    /// `(time, increment)` of a timestamp element
    pub(crate) fn as_timestamp(&self) -> (u32, u32) {
        let raw = self.fixed::<8>();
        let increment = u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
        let time = u32::from_le_bytes([raw[4], raw[5], raw[6], raw[7]]);
        (time, increment)
    }

    pub(crate) fn as_object_id_bytes(&self) -> [u8; 12] {
        self.fixed::<12>()
    }

    /// Fresh cursor over an embedded document or array payload
    ///
    /// Each call returns an independent cursor positioned at the first
    /// nested element.
    pub fn recurse(&self) -> Result<Cursor<'a>> {
        Cursor::at(self.payload, self.offset)
    }

    fn fixed<const N: usize>(&self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.payload[..N]);
        out
    }

    /// Bytes of a length-prefixed, NUL-terminated string at `at`
    fn string_at(&self, at: usize) -> Result<&'a [u8]> {
        let payload = self.payload;
        let len = read_i32(payload, at) as usize;
        let end = at + 4 + len;
        if payload[end - 1] != 0 {
            return Err(DecodeError::malformed(
                self.offset + end - 1,
                format!("string '{}' is not NUL-terminated", self.key),
            ));
        }
        Ok(&payload[at + 4..end - 1])
    }
}

/// Payload size of an element of `kind`, reading length prefixes from `rest`
///
/// Length prefixes are validated here; the caller checks the result against
/// `rest.len()`.
fn payload_len(kind: ElementType, rest: &[u8], offset: usize) -> Result<usize> {
    let size = match kind {
        ElementType::Double | ElementType::DateTime | ElementType::Int64 => 8,
        ElementType::Timestamp => 8,
        ElementType::Int32 => 4,
        ElementType::Boolean => 1,
        ElementType::ObjectId => 12,
        ElementType::Decimal128 => 16,
        ElementType::Null | ElementType::Undefined | ElementType::MinKey | ElementType::MaxKey => 0,
        ElementType::String | ElementType::JavaScriptCode | ElementType::Symbol => {
            string_len(rest, offset)?
        }
        ElementType::EmbeddedDocument | ElementType::Array => {
            prefixed_len(rest, offset, MIN_DOCUMENT_LEN)?
        }
        ElementType::Binary => 5 + prefixed_len(rest, offset, 0)?,
        ElementType::JavaScriptCodeWithScope => prefixed_len(rest, offset, 14)?,
        ElementType::DbPointer => string_len(rest, offset)? + 12,
        ElementType::RegularExpression => {
            let pattern = find_nul(rest).ok_or_else(|| {
                DecodeError::malformed(offset, "unterminated regular expression pattern")
            })?;
            let options = find_nul(&rest[pattern + 1..]).ok_or_else(|| {
                DecodeError::malformed(offset, "unterminated regular expression options")
            })?;
            pattern + 1 + options + 1
        }
        #[allow(unreachable_patterns)]
        other => {
            return Err(DecodeError::malformed(
                offset,
                format!("no framing known for element type {other:?}"),
            ));
        }
    };
    Ok(size)
}

/// Full size of a string payload: prefix plus declared length
fn string_len(rest: &[u8], offset: usize) -> Result<usize> {
    Ok(4 + prefixed_len(rest, offset, 1)?)
}

/// Read an `i32` length prefix that must be at least `min`
fn prefixed_len(rest: &[u8], offset: usize, min: usize) -> Result<usize> {
    if rest.len() < 4 {
        return Err(DecodeError::malformed(offset, "truncated length prefix"));
    }
    let declared = read_i32(rest, 0);
    match usize::try_from(declared) {
        Ok(len) if len >= min => Ok(len),
        _ => Err(DecodeError::malformed(
            offset,
            format!("invalid length prefix {declared}"),
        )),
    }
}

/// Little-endian `i32` at `at`; caller guarantees four bytes are present
fn read_i32(bytes: &[u8], at: usize) -> i32 {
    i32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

fn find_nul(bytes: &[u8]) -> Option<usize> {
    bytes.iter().position(|&b| b == 0)
}
