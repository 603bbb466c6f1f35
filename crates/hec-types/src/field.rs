//! Metadata values attached to an [`Event`](crate::Event).
//!
//! The HEC `fields` object maps text keys to text or scalar values. Nested
//! objects and arrays are not representable.

use serde::{Deserialize, Serialize};

/// A single metadata value: text or a scalar.
///
/// Serialized to JSON as the bare scalar (`"x"`, `5`, `1.5`, `true`).
///
/// Floats compare by IEEE-754 bit pattern, which makes equality total:
/// `NaN == NaN`, while `0.0 != -0.0`. This is the same relation the binary
/// codec preserves, so equal values always encode to equal bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// UTF-8 text.
    Text(String),
    /// Signed 64-bit integer.
    Integer(i64),
    /// 64-bit float.
    Float(f64),
    /// Boolean flag.
    Boolean(bool),
}

impl FieldValue {
    /// Return the text content if this is a [`FieldValue::Text`].
    pub const fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Integer(_) | Self::Float(_) | Self::Boolean(_) => None,
        }
    }

    /// Short name of the variant, used in diagnostics.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
        }
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a.to_bits() == b.to_bits(),
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for FieldValue {}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}
