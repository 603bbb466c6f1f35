//! Builder for validated [`Event`] construction.

use crate::EventError;
use crate::event::{Event, Fields};
use crate::field::FieldValue;

/// Builder for constructing [`Event`] values.
///
/// Every attribute starts absent. Only the body is required; `build`
/// fails with [`EventError::MissingEvent`] if it was never set.
///
/// # Examples
///
/// ```
/// use hec_types::{Event, EventError};
///
/// let event = Event::builder()
///     .with_event("test-event")
///     .with_index("main")
///     .build();
/// assert!(event.is_ok());
///
/// let missing = Event::builder().with_host("web-01").build();
/// assert_eq!(missing.err(), Some(EventError::MissingEvent));
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventBuilder {
    event: Option<String>,
    host: Option<String>,
    index: Option<String>,
    source: Option<String>,
    source_type: Option<String>,
    time: Option<i64>,
    fields: Option<Fields>,
}

impl EventBuilder {
    /// Set the event body.
    #[must_use]
    pub fn with_event(mut self, event: impl Into<String>) -> Self {
        self.event = Some(event.into());
        self
    }

    /// Set the originating host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the destination index.
    #[must_use]
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = Some(index.into());
        self
    }

    /// Set the originating source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the originating source type.
    #[must_use]
    pub fn with_source_type(mut self, source_type: impl Into<String>) -> Self {
        self.source_type = Some(source_type.into());
        self
    }

    /// Set the epoch timestamp.
    #[must_use]
    pub const fn with_time(mut self, time: i64) -> Self {
        self.time = Some(time);
        self
    }

    /// Replace the whole metadata map.
    #[must_use]
    pub fn with_fields(mut self, fields: Fields) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Insert one metadata entry, creating the map if needed.
    ///
    /// A later entry with the same key replaces the earlier one.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: FieldValue) -> Self {
        self.fields
            .get_or_insert_with(Fields::new)
            .insert(key.into(), value);
        self
    }

    /// Finish the event.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::MissingEvent`] if no body was set.
    pub fn build(self) -> Result<Event, EventError> {
        let event = self.event.ok_or(EventError::MissingEvent)?;
        Ok(Event {
            event,
            host: self.host,
            index: self.index,
            source: self.source,
            source_type: self.source_type,
            time: self.time,
            fields: self.fields,
        })
    }
}
