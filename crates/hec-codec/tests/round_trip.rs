//! End-to-end tests for the `hec-codec` record format.
//!
//! Every test goes through the public API only: build an [`Event`], encode it
//! into an in-memory sink, decode it back from an in-memory source.

// Integration tests use unwrap extensively for clarity -- panicking on
// failure is the correct behavior in test code.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

use std::io::{self, Read, Write};

use hec_codec::{CodecError, EventCodec, EventReader};
use hec_types::{Event, FieldValue, Fields};
use proptest::prelude::*;

fn encode(event: &Event) -> Vec<u8> {
    let mut sink = Vec::new();
    EventCodec::new().encode(event, &mut sink).unwrap();
    sink
}

fn decode(bytes: &[u8]) -> Result<Event, CodecError> {
    let mut source = bytes;
    EventCodec::new().decode(&mut source)
}

// ---------------------------------------------------------------------------
// Concrete scenarios
// ---------------------------------------------------------------------------

#[test]
fn all_attributes_round_trip() {
    let event = Event::builder()
        .with_event("test-event")
        .with_host("test-host")
        .with_index("test-index")
        .with_source("test-source")
        .with_source_type("test-source-type")
        .with_time(123_456_789)
        .build()
        .unwrap();

    let decoded = decode(&encode(&event)).unwrap();
    assert_eq!(decoded, event);
    assert_eq!(decoded.source_type(), Some("test-source-type"));
    assert_eq!(decoded.time(), Some(123_456_789));
    assert!(decoded.fields().is_none());
}

#[test]
fn fields_only_round_trip() {
    let event = Event::builder()
        .with_event("test-event")
        .with_field("test-key", FieldValue::from("test-value"))
        .build()
        .unwrap();

    let decoded = decode(&encode(&event)).unwrap();
    assert_eq!(decoded, event);
    assert!(decoded.host().is_none());
    assert!(decoded.index().is_none());
    assert!(decoded.source().is_none());
    assert!(decoded.source_type().is_none());
    assert!(decoded.time().is_none());

    let fields = decoded.fields().unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(
        fields.get("test-key"),
        Some(&FieldValue::from("test-value"))
    );
}

#[test]
fn empty_strings_stay_present() {
    let event = Event::builder()
        .with_event("")
        .with_host("")
        .with_index("")
        .with_source("")
        .with_source_type("")
        .build()
        .unwrap();

    let decoded = decode(&encode(&event)).unwrap();
    assert_eq!(decoded.event(), "");
    assert_eq!(decoded.host(), Some(""));
    assert_eq!(decoded.index(), Some(""));
    assert_eq!(decoded.source(), Some(""));
    assert_eq!(decoded.source_type(), Some(""));
    assert_ne!(decoded, Event::new(""));
}

#[test]
fn utf8_is_preserved_byte_for_byte() {
    // Decomposed and precomposed forms must not be normalized into each other.
    let event = Event::builder()
        .with_event("cafe\u{301} / caf\u{e9} \u{1F680}\n\t\0")
        .with_host("  padded  ")
        .with_field("K\u{e9}y", FieldValue::from("Value"))
        .build()
        .unwrap();

    let decoded = decode(&encode(&event)).unwrap();
    assert_eq!(decoded.event().as_bytes(), event.event().as_bytes());
    assert_eq!(decoded.host(), Some("  padded  "));
    assert_eq!(decoded, event);
}

#[test]
fn extreme_timestamps_round_trip() {
    for time in [i64::MIN, -1, 0, 1, i64::MAX] {
        let event = Event::builder()
            .with_event("t")
            .with_time(time)
            .build()
            .unwrap();
        assert_eq!(decode(&encode(&event)).unwrap().time(), Some(time));
    }
}

#[test]
fn every_truncation_of_a_full_record_is_corruption() {
    let event = Event::builder()
        .with_event("test-event")
        .with_host("test-host")
        .with_index("test-index")
        .with_source("test-source")
        .with_source_type("test-source-type")
        .with_time(123_456_789)
        .with_field("count", FieldValue::from(42_i64))
        .with_field("ratio", FieldValue::from(0.5))
        .with_field("ok", FieldValue::from(true))
        .with_field("region", FieldValue::from("eu-west-1"))
        .build()
        .unwrap();
    let bytes = encode(&event);
    assert!(bytes.len() > 64);

    for len in 0..bytes.len() {
        let result = decode(&bytes[..len]);
        assert!(
            matches!(result, Err(CodecError::CorruptData { .. })),
            "prefix of {len} of {} bytes gave {result:?}",
            bytes.len()
        );

        let mut source = &bytes[..len];
        let next = EventCodec::new().decode_next(&mut source);
        if len == 0 {
            assert!(matches!(next, Ok(None)));
        } else {
            assert!(matches!(next, Err(CodecError::CorruptData { .. })));
        }
    }
    assert_eq!(decode(&bytes).unwrap(), event);
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn insertion_order_does_not_change_bytes() {
    let mut forward = Fields::new();
    let mut backward = Fields::new();
    let entries = [
        ("alpha", FieldValue::from(1_i64)),
        ("beta", FieldValue::from("two")),
        ("gamma", FieldValue::from(3.5)),
        ("delta", FieldValue::from(false)),
    ];
    for (key, value) in entries.iter().cloned() {
        forward.insert(key.to_owned(), value);
    }
    for (key, value) in entries.iter().rev().cloned() {
        backward.insert(key.to_owned(), value);
    }

    let a = Event::builder()
        .with_event("e")
        .with_fields(forward)
        .build()
        .unwrap();
    let b = Event::builder()
        .with_event("e")
        .with_fields(backward)
        .build()
        .unwrap();
    assert_eq!(encode(&a), encode(&b));
}

#[test]
fn empty_fields_and_absent_fields_encode_differently() {
    let empty = Event::builder()
        .with_event("e")
        .with_fields(Fields::new())
        .build()
        .unwrap();
    assert_ne!(encode(&empty), encode(&Event::new("e")));
    assert_eq!(decode(&encode(&empty)).unwrap(), empty);
}

// ---------------------------------------------------------------------------
// Streams
// ---------------------------------------------------------------------------

#[test]
fn back_to_back_records_decode_sequentially() {
    let events = [
        Event::new("one"),
        Event::builder()
            .with_event("two")
            .with_time(2)
            .build()
            .unwrap(),
        Event::builder()
            .with_event("three")
            .with_field("n", FieldValue::from(3_i64))
            .build()
            .unwrap(),
    ];
    let codec = EventCodec::new();
    let mut stream = Vec::new();
    for event in &events {
        codec.encode(event, &mut stream).unwrap();
    }

    // Plain repeated decode calls.
    let mut source = stream.as_slice();
    for event in &events {
        assert_eq!(&codec.decode(&mut source).unwrap(), event);
    }
    assert!(source.is_empty());

    // The iterator sees the same records.
    let read: Vec<Event> = EventReader::new(codec, stream.as_slice())
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(read, events);
}

// ---------------------------------------------------------------------------
// Failing I/O
// ---------------------------------------------------------------------------

struct FailingSink;

impl Write for FailingSink {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

struct FailingSource;

impl Read for FailingSource {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer went away"))
    }
}

#[test]
fn sink_failure_is_io_error() {
    let result = EventCodec::new().encode(&Event::new("e"), &mut FailingSink);
    assert!(matches!(result, Err(CodecError::Io(ref err)) if err.to_string() == "disk full"));
}

#[test]
fn source_failure_is_io_error_not_corruption() {
    let result = EventCodec::new().decode(&mut FailingSource);
    assert!(matches!(
        result,
        Err(CodecError::Io(ref err)) if err.kind() == io::ErrorKind::ConnectionReset
    ));
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

fn field_value() -> impl Strategy<Value = FieldValue> {
    prop_oneof![
        ".{0,12}".prop_map(FieldValue::Text),
        any::<i64>().prop_map(FieldValue::Integer),
        any::<f64>().prop_map(FieldValue::Float),
        any::<bool>().prop_map(FieldValue::Boolean),
    ]
}

fn event() -> impl Strategy<Value = Event> {
    (
        ".{0,24}",
        proptest::option::of(".{0,12}"),
        proptest::option::of(".{0,12}"),
        proptest::option::of(".{0,12}"),
        proptest::option::of(".{0,12}"),
        proptest::option::of(any::<i64>()),
        proptest::option::of(proptest::collection::btree_map(".{0,8}", field_value(), 0..5)),
    )
        .prop_map(|(event, host, index, source, source_type, time, fields)| {
            Event::from(hec_types::EventParts {
                event,
                host,
                index,
                source,
                source_type,
                time,
                fields,
            })
        })
}

proptest! {
    #[test]
    fn prop_round_trip(event in event()) {
        let bytes = encode(&event);
        let decoded = EventCodec::new().decode_from_slice(&bytes);
        prop_assert!(matches!(decoded, Ok(ref d) if *d == event));
    }

    #[test]
    fn prop_encoding_is_deterministic(event in event()) {
        let copy = event.clone();
        prop_assert_eq!(encode(&event), encode(&copy));
    }

    #[test]
    fn prop_truncation_is_corruption(event in event(), cut in 1_usize..64) {
        let bytes = encode(&event);
        let cut = cut.min(bytes.len());
        let truncated = &bytes[..bytes.len() - cut];
        let result = decode(truncated);
        prop_assert!(
            matches!(result, Err(CodecError::CorruptData { .. })),
            "truncating {} of {} bytes gave {:?}",
            cut,
            bytes.len(),
            result
        );
    }
}
