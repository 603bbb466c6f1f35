//! Canonical binary form of the metadata map.
//!
//! ```text
//! count: u32
//! repeated count times:
//!     key:   u32 length + UTF-8
//!     tag:   u8 (0 text, 1 integer, 2 float, 3 boolean)
//!     value: text    -> u32 length + UTF-8
//!            integer -> i64
//!            float   -> u64 IEEE-754 bits
//!            boolean -> u8 (0/1)
//! ```
//!
//! Keys are written in ascending byte order. The decoder enforces the same
//! order, so every blob it accepts is the one canonical encoding of its map.

use hec_types::{FieldValue, Fields};

use crate::CodecError;
use crate::config::CodecConfig;
use crate::wire;

const TAG_TEXT: u8 = 0;
const TAG_INTEGER: u8 = 1;
const TAG_FLOAT: u8 = 2;
const TAG_BOOLEAN: u8 = 3;

const FIELD_COUNT: &str = "fields.count";
const FIELD_KEY: &str = "fields.key";
const FIELD_VALUE: &str = "fields.value";

/// Serialize the map into a standalone blob.
pub(crate) fn encode(fields: &Fields, config: &CodecConfig) -> Result<Vec<u8>, CodecError> {
    let count = u32::try_from(fields.len())
        .ok()
        .filter(|count| *count <= config.max_field_entries)
        .ok_or_else(|| CodecError::InvalidRecord {
            field: FIELD_COUNT,
            reason: format!(
                "{} entries exceeds the limit of {}",
                fields.len(),
                config.max_field_entries
            ),
        })?;

    let mut blob = Vec::new();
    wire::put_u32(&mut blob, count);
    for (key, value) in fields {
        wire::put_text(&mut blob, FIELD_KEY, key, config.max_text_bytes)?;
        put_value(&mut blob, value, config)?;
    }

    // The blob itself travels behind a length prefix.
    wire::length_prefix("fields", blob.len(), config.max_fields_bytes)?;
    Ok(blob)
}

fn put_value(
    blob: &mut Vec<u8>,
    value: &FieldValue,
    config: &CodecConfig,
) -> Result<(), CodecError> {
    match value {
        FieldValue::Text(text) => {
            blob.push(TAG_TEXT);
            wire::put_text(blob, FIELD_VALUE, text, config.max_text_bytes)?;
        }
        FieldValue::Integer(int) => {
            blob.push(TAG_INTEGER);
            wire::put_i64(blob, *int);
        }
        FieldValue::Float(float) => {
            blob.push(TAG_FLOAT);
            blob.extend_from_slice(&float.to_bits().to_be_bytes());
        }
        FieldValue::Boolean(flag) => {
            blob.push(TAG_BOOLEAN);
            wire::put_flag(blob, *flag);
        }
    }
    Ok(())
}

/// Rebuild the map from a complete blob.
pub(crate) fn decode(blob: &[u8], config: &CodecConfig) -> Result<Fields, CodecError> {
    let mut cursor = blob;
    let count = wire::read_u32(&mut cursor, FIELD_COUNT)?;
    if count > config.max_field_entries {
        return Err(CodecError::CorruptData {
            field: FIELD_COUNT,
            reason: format!(
                "{count} entries exceeds the limit of {}",
                config.max_field_entries
            ),
        });
    }

    let mut fields = Fields::new();
    for _ in 0..count {
        let key = wire::read_text(&mut cursor, FIELD_KEY, config.max_text_bytes)?;
        if fields
            .last_key_value()
            .is_some_and(|(last, _)| last.as_str() >= key.as_str())
        {
            return Err(CodecError::CorruptData {
                field: FIELD_KEY,
                reason: format!("key {key:?} is duplicated or out of order"),
            });
        }
        let value = read_value(&mut cursor, config)?;
        fields.insert(key, value);
    }

    if !cursor.is_empty() {
        return Err(CodecError::CorruptData {
            field: "fields",
            reason: format!("{} trailing bytes after the last entry", cursor.len()),
        });
    }
    Ok(fields)
}

fn read_value(cursor: &mut &[u8], config: &CodecConfig) -> Result<FieldValue, CodecError> {
    let [tag] = wire::read_array(cursor, FIELD_VALUE)?;
    let value = match tag {
        TAG_TEXT => {
            FieldValue::Text(wire::read_text(cursor, FIELD_VALUE, config.max_text_bytes)?)
        }
        TAG_INTEGER => FieldValue::Integer(wire::read_i64(cursor, FIELD_VALUE)?),
        TAG_FLOAT => FieldValue::Float(f64::from_bits(wire::read_u64(cursor, FIELD_VALUE)?)),
        TAG_BOOLEAN => FieldValue::Boolean(wire::read_bool(cursor, FIELD_VALUE)?),
        other => {
            return Err(CodecError::CorruptData {
                field: FIELD_VALUE,
                reason: format!("unknown value tag {other}"),
            });
        }
    };
    Ok(value)
}
