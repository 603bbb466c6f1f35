//! The record codec: [`EventCodec`].

use std::io::{self, Read, Write};

use hec_types::{Event, EventParts, Fields};
use tracing::{debug, trace};

use crate::config::CodecConfig;
use crate::wire;
use crate::{CodecError, fields};

/// Stateless encode/decode engine for [`Event`] records.
///
/// Holds only its immutable [`CodecConfig`], so one value can be copied or
/// shared across threads and used for any number of concurrent calls on
/// independent sinks and sources. The codec never opens, flushes or closes
/// the I/O handles it is given.
///
/// # Examples
///
/// ```
/// use hec_codec::EventCodec;
/// use hec_types::Event;
///
/// let codec = EventCodec::new();
/// let event = Event::builder()
///     .with_event("test-event")
///     .with_time(123_456_789)
///     .build()?;
///
/// let mut bytes = Vec::new();
/// codec.encode(&event, &mut bytes)?;
/// let decoded = codec.decode(&mut bytes.as_slice())?;
/// assert_eq!(decoded, event);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventCodec {
    config: CodecConfig,
}

impl EventCodec {
    /// Create a codec with the default limits.
    pub const fn new() -> Self {
        Self {
            config: CodecConfig::DEFAULT,
        }
    }

    /// Create a codec with explicit limits.
    pub const fn with_config(config: CodecConfig) -> Self {
        Self { config }
    }

    /// The limits this codec enforces.
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode one record and write it to `sink`.
    ///
    /// The record is validated and serialized in memory first, then handed
    /// to the sink in a single `write_all`. A record that fails validation
    /// leaves the sink untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidRecord`] if an attribute does not fit its
    /// length prefix or the configured limits, and [`CodecError::Io`] if the
    /// sink rejects the write.
    pub fn encode<W: Write>(&self, event: &Event, sink: &mut W) -> Result<(), CodecError> {
        let bytes = self.encode_to_vec(event)?;
        sink.write_all(&bytes)?;
        Ok(())
    }

    /// Encode one record into a fresh buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidRecord`] as [`EventCodec::encode`] does.
    pub fn encode_to_vec(&self, event: &Event) -> Result<Vec<u8>, CodecError> {
        self.serialize(event).inspect_err(|err| {
            debug!(error = %err, "rejected record before encoding");
        })
    }

    fn serialize(&self, event: &Event) -> Result<Vec<u8>, CodecError> {
        let limit = self.config.max_text_bytes;
        let mut buf = Vec::new();

        wire::put_text(&mut buf, "event", event.event(), limit)?;
        wire::put_optional_text(&mut buf, "host", event.host(), limit)?;
        wire::put_optional_text(&mut buf, "index", event.index(), limit)?;
        wire::put_optional_text(&mut buf, "source", event.source(), limit)?;
        wire::put_optional_text(&mut buf, "sourcetype", event.source_type(), limit)?;

        wire::put_flag(&mut buf, event.time().is_some());
        if let Some(time) = event.time() {
            wire::put_i64(&mut buf, time);
        }

        wire::put_flag(&mut buf, event.fields().is_some());
        if let Some(map) = event.fields() {
            let blob = fields::encode(map, &self.config)?;
            wire::put_bytes(&mut buf, "fields", &blob, self.config.max_fields_bytes)?;
        }

        trace!(
            bytes = buf.len(),
            has_time = event.time().is_some(),
            field_count = event.fields().map_or(0, Fields::len),
            "event encoded"
        );
        Ok(buf)
    }

    /// Decode one record from `source`.
    ///
    /// Consumes exactly the bytes of one record and leaves `source`
    /// positioned right after it, so back-to-back records can be decoded
    /// with repeated calls.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::CorruptData`] if the stream ends inside the
    /// record (an empty stream included), a length prefix exceeds the
    /// configured limits, a flag byte is not 0 or 1, text is not UTF-8, or
    /// the metadata blob is malformed. Returns [`CodecError::Io`] for any
    /// other read fault.
    pub fn decode<R: Read>(&self, source: &mut R) -> Result<Event, CodecError> {
        let len = wire::read_u32(source, "event");
        len.and_then(|len| self.decode_after_len(source, len))
            .inspect_err(log_rejected)
    }

    /// Decode one record, or return `None` if `source` is already at a clean
    /// end of stream.
    ///
    /// A stream that ends anywhere after the first byte of a record is
    /// still [`CodecError::CorruptData`].
    ///
    /// # Errors
    ///
    /// As [`EventCodec::decode`].
    pub fn decode_next<R: Read>(&self, source: &mut R) -> Result<Option<Event>, CodecError> {
        let mut first = [0_u8; 1];
        loop {
            match source.read(&mut first) {
                Ok(0) => return Ok(None),
                Ok(_) => break,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(CodecError::Io(err)),
            }
        }
        let [b0] = first;
        let rest: Result<[u8; 3], CodecError> = wire::read_array(source, "event");
        rest.and_then(|[b1, b2, b3]| {
            self.decode_after_len(source, u32::from_be_bytes([b0, b1, b2, b3]))
        })
        .map(Some)
        .inspect_err(log_rejected)
    }

    /// Decode a record that must span all of `bytes`.
    ///
    /// # Errors
    ///
    /// As [`EventCodec::decode`], plus [`CodecError::CorruptData`] if bytes
    /// remain after the record.
    pub fn decode_from_slice(&self, bytes: &[u8]) -> Result<Event, CodecError> {
        let mut cursor = bytes;
        let event = self.decode(&mut cursor)?;
        if cursor.is_empty() {
            Ok(event)
        } else {
            Err(CodecError::CorruptData {
                field: "record",
                reason: format!("{} trailing bytes after the record", cursor.len()),
            })
        }
    }

    fn decode_after_len<R: Read>(&self, source: &mut R, len: u32) -> Result<Event, CodecError> {
        let limit = self.config.max_text_bytes;

        wire::check_limit("event", len, limit)?;
        let body = wire::read_exact_len(source, "event", len)?;
        let event = wire::into_text("event", body)?;

        let host = wire::read_optional_text(source, "host", limit)?;
        let index = wire::read_optional_text(source, "index", limit)?;
        let source_field = wire::read_optional_text(source, "source", limit)?;
        let source_type = wire::read_optional_text(source, "sourcetype", limit)?;

        let time = if wire::read_bool(source, "time")? {
            Some(wire::read_i64(source, "time")?)
        } else {
            None
        };

        let fields = if wire::read_bool(source, "fields")? {
            let blob = wire::read_bytes(source, "fields", self.config.max_fields_bytes)?;
            Some(fields::decode(&blob, &self.config)?)
        } else {
            None
        };

        trace!(
            has_time = time.is_some(),
            field_count = fields.as_ref().map_or(0, Fields::len),
            "event decoded"
        );

        Ok(Event::from(EventParts {
            event,
            host,
            index,
            source: source_field,
            source_type,
            time,
            fields,
        }))
    }
}

fn log_rejected(err: &CodecError) {
    debug!(error = %err, "rejected encoded record");
}
