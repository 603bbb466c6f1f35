//! Low-level wire primitives shared by the record and metadata codecs.
//!
//! All integers are big-endian. Text is a 4-byte length prefix followed by
//! the raw UTF-8 bytes. Optional values are preceded by a one-byte
//! presence flag.

use std::io::{self, Read};

use crate::CodecError;

/// Presence flag: the value follows.
const PRESENT: u8 = 1;

/// Presence flag: the value is absent.
const ABSENT: u8 = 0;

// ---------------------------------------------------------------------------
// Writing
// ---------------------------------------------------------------------------

/// Convert a byte length into a length prefix, enforcing `limit`.
pub(crate) fn length_prefix(
    field: &'static str,
    len: usize,
    limit: u32,
) -> Result<u32, CodecError> {
    match u32::try_from(len) {
        Ok(prefix) if prefix <= limit => Ok(prefix),
        _ => Err(CodecError::InvalidRecord {
            field,
            reason: format!("{len} bytes exceeds the limit of {limit}"),
        }),
    }
}

pub(crate) fn put_flag(buf: &mut Vec<u8>, present: bool) {
    buf.push(if present { PRESENT } else { ABSENT });
}

pub(crate) fn put_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_be_bytes());
}

pub(crate) fn put_i64(buf: &mut Vec<u8>, value: i64) {
    buf.extend_from_slice(&value.to_be_bytes());
}

/// Append a length-prefixed byte string.
pub(crate) fn put_bytes(
    buf: &mut Vec<u8>,
    field: &'static str,
    bytes: &[u8],
    limit: u32,
) -> Result<(), CodecError> {
    let prefix = length_prefix(field, bytes.len(), limit)?;
    put_u32(buf, prefix);
    buf.extend_from_slice(bytes);
    Ok(())
}

/// Append length-prefixed UTF-8 text.
pub(crate) fn put_text(
    buf: &mut Vec<u8>,
    field: &'static str,
    text: &str,
    limit: u32,
) -> Result<(), CodecError> {
    put_bytes(buf, field, text.as_bytes(), limit)
}

/// Append a presence flag and, when present, the length-prefixed text.
pub(crate) fn put_optional_text(
    buf: &mut Vec<u8>,
    field: &'static str,
    text: Option<&str>,
    limit: u32,
) -> Result<(), CodecError> {
    put_flag(buf, text.is_some());
    if let Some(text) = text {
        put_text(buf, field, text, limit)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Classify a read failure: a short stream is corruption, anything else is
/// an I/O fault of the source.
pub(crate) fn read_error(field: &'static str, err: io::Error) -> CodecError {
    if err.kind() == io::ErrorKind::UnexpectedEof {
        CodecError::CorruptData {
            field,
            reason: "stream ended before the field was complete".to_owned(),
        }
    } else {
        CodecError::Io(err)
    }
}

pub(crate) fn read_array<R: Read, const N: usize>(
    src: &mut R,
    field: &'static str,
) -> Result<[u8; N], CodecError> {
    let mut buf = [0_u8; N];
    src.read_exact(&mut buf)
        .map_err(|err| read_error(field, err))?;
    Ok(buf)
}

pub(crate) fn read_u32<R: Read>(src: &mut R, field: &'static str) -> Result<u32, CodecError> {
    read_array(src, field).map(u32::from_be_bytes)
}

pub(crate) fn read_i64<R: Read>(src: &mut R, field: &'static str) -> Result<i64, CodecError> {
    read_array(src, field).map(i64::from_be_bytes)
}

pub(crate) fn read_u64<R: Read>(src: &mut R, field: &'static str) -> Result<u64, CodecError> {
    read_array(src, field).map(u64::from_be_bytes)
}

/// Read a one-byte boolean. Anything other than 0 or 1 is corruption.
pub(crate) fn read_bool<R: Read>(src: &mut R, field: &'static str) -> Result<bool, CodecError> {
    let [byte] = read_array(src, field)?;
    match byte {
        PRESENT => Ok(true),
        ABSENT => Ok(false),
        other => Err(CodecError::CorruptData {
            field,
            reason: format!("flag byte {other:#04x} is neither 0 nor 1"),
        }),
    }
}

/// Read exactly `len` bytes.
///
/// Bytes are pulled through [`Read::take`], so memory grows with the bytes
/// actually present rather than with the declared length.
pub(crate) fn read_exact_len<R: Read>(
    src: &mut R,
    field: &'static str,
    len: u32,
) -> Result<Vec<u8>, CodecError> {
    let mut bytes = Vec::new();
    src.by_ref()
        .take(u64::from(len))
        .read_to_end(&mut bytes)
        .map_err(|err| read_error(field, err))?;
    if u64::try_from(bytes.len()).ok() == Some(u64::from(len)) {
        Ok(bytes)
    } else {
        Err(CodecError::CorruptData {
            field,
            reason: format!(
                "length prefix declares {len} bytes but only {} remain",
                bytes.len()
            ),
        })
    }
}

/// Read a length prefix, reject it if it exceeds `limit`, then read that
/// many bytes.
pub(crate) fn read_bytes<R: Read>(
    src: &mut R,
    field: &'static str,
    limit: u32,
) -> Result<Vec<u8>, CodecError> {
    let len = read_u32(src, field)?;
    check_limit(field, len, limit)?;
    read_exact_len(src, field, len)
}

/// Reject a decoded length prefix larger than `limit`.
pub(crate) fn check_limit(field: &'static str, len: u32, limit: u32) -> Result<(), CodecError> {
    if len > limit {
        return Err(CodecError::CorruptData {
            field,
            reason: format!("length prefix {len} exceeds the limit of {limit}"),
        });
    }
    Ok(())
}

pub(crate) fn into_text(field: &'static str, bytes: Vec<u8>) -> Result<String, CodecError> {
    String::from_utf8(bytes).map_err(|err| CodecError::CorruptData {
        field,
        reason: format!("invalid UTF-8: {}", err.utf8_error()),
    })
}

pub(crate) fn read_text<R: Read>(
    src: &mut R,
    field: &'static str,
    limit: u32,
) -> Result<String, CodecError> {
    let bytes = read_bytes(src, field, limit)?;
    into_text(field, bytes)
}

/// Read a presence flag and, when set, the length-prefixed text.
pub(crate) fn read_optional_text<R: Read>(
    src: &mut R,
    field: &'static str,
    limit: u32,
) -> Result<Option<String>, CodecError> {
    if read_bool(src, field)? {
        read_text(src, field, limit).map(Some)
    } else {
        Ok(None)
    }
}
