//! The immutable log event record.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::builder::EventBuilder;
use crate::field::FieldValue;

/// Metadata attached to an event, keyed by name.
///
/// A `BTreeMap` keeps iteration in lexicographic key order, so two equal
/// maps always iterate identically regardless of insertion history.
pub type Fields = BTreeMap<String, FieldValue>;

/// One structured log entry.
///
/// The body is always present. Every other attribute is either `Some`
/// or `None`; an empty string or a zero timestamp is a real value, not an
/// encoding of absence. Events are read-only once built.
///
/// Serializes to the HEC JSON shape: absent attributes are omitted and
/// `source_type` is written as `sourcetype`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_field_names)] // `event` is the HEC key for the body.
pub struct Event {
    /// Raw log line or message body.
    pub(crate) event: String,
    /// Originating host identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) host: Option<String>,
    /// Destination index name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) index: Option<String>,
    /// Originating source identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) source: Option<String>,
    /// Originating source-type identifier.
    #[serde(
        default,
        rename = "sourcetype",
        skip_serializing_if = "Option::is_none"
    )]
    pub(crate) source_type: Option<String>,
    /// Epoch timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) time: Option<i64>,
    /// Auxiliary metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) fields: Option<Fields>,
}

/// Every attribute of an [`Event`], with optional ones as explicit `Option`s.
///
/// Used to build an event in one step when all attributes are already at
/// hand, and to take one apart without cloning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventParts {
    /// Raw log line or message body.
    pub event: String,
    /// Originating host identifier.
    pub host: Option<String>,
    /// Destination index name.
    pub index: Option<String>,
    /// Originating source identifier.
    pub source: Option<String>,
    /// Originating source-type identifier.
    pub source_type: Option<String>,
    /// Epoch timestamp.
    pub time: Option<i64>,
    /// Auxiliary metadata.
    pub fields: Option<Fields>,
}

impl From<EventParts> for Event {
    fn from(parts: EventParts) -> Self {
        Self {
            event: parts.event,
            host: parts.host,
            index: parts.index,
            source: parts.source,
            source_type: parts.source_type,
            time: parts.time,
            fields: parts.fields,
        }
    }
}

impl Event {
    /// Create an event carrying only a body.
    pub fn new(event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            host: None,
            index: None,
            source: None,
            source_type: None,
            time: None,
            fields: None,
        }
    }

    /// Start building an event.
    pub fn builder() -> EventBuilder {
        EventBuilder::default()
    }

    /// The event body.
    pub fn event(&self) -> &str {
        &self.event
    }

    /// The originating host, if set.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    /// The destination index, if set.
    pub fn index(&self) -> Option<&str> {
        self.index.as_deref()
    }

    /// The originating source, if set.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// The originating source type, if set.
    pub fn source_type(&self) -> Option<&str> {
        self.source_type.as_deref()
    }

    /// The epoch timestamp, if set.
    pub const fn time(&self) -> Option<i64> {
        self.time
    }

    /// The metadata map, if set. An empty map is distinct from `None`.
    pub const fn fields(&self) -> Option<&Fields> {
        self.fields.as_ref()
    }

    /// Take the event apart into its attributes.
    pub fn into_parts(self) -> EventParts {
        EventParts {
            event: self.event,
            host: self.host,
            index: self.index,
            source: self.source,
            source_type: self.source_type,
            time: self.time,
            fields: self.fields,
        }
    }

    /// Render the event as one compact HEC JSON object.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
