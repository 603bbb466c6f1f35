//! Sequential decoding of back-to-back records from one stream.

use std::io::Read;
use std::iter::FusedIterator;

use hec_types::Event;
use tracing::debug;

use crate::{CodecError, EventCodec};

/// Iterator over the records of a stream written by repeated
/// [`EventCodec::encode`] calls.
///
/// A clean end of stream at a record boundary ends the iteration. Any error
/// is yielded once and ends the iteration too; there is no resynchronization
/// after a corrupt record.
///
/// # Examples
///
/// ```
/// use hec_codec::{EventCodec, EventReader};
/// use hec_types::Event;
///
/// let codec = EventCodec::new();
/// let mut stream = Vec::new();
/// codec.encode(&Event::new("first"), &mut stream)?;
/// codec.encode(&Event::new("second"), &mut stream)?;
///
/// let events: Result<Vec<Event>, _> = EventReader::new(codec, stream.as_slice()).collect();
/// assert_eq!(events?.len(), 2);
/// # Ok::<(), hec_codec::CodecError>(())
/// ```
#[derive(Debug)]
pub struct EventReader<R> {
    codec: EventCodec,
    source: R,
    records_read: u64,
    finished: bool,
}

impl<R: Read> EventReader<R> {
    /// Wrap `source`, decoding with `codec`.
    pub const fn new(codec: EventCodec, source: R) -> Self {
        Self {
            codec,
            source,
            records_read: 0,
            finished: false,
        }
    }

    /// Number of records decoded so far.
    pub const fn records_read(&self) -> u64 {
        self.records_read
    }

    /// Give back the underlying source, positioned after the last record
    /// read.
    pub fn into_inner(self) -> R {
        self.source
    }
}

impl<R: Read> Iterator for EventReader<R> {
    type Item = Result<Event, CodecError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.codec.decode_next(&mut self.source) {
            Ok(Some(event)) => {
                self.records_read = self.records_read.saturating_add(1);
                Some(Ok(event))
            }
            Ok(None) => {
                self.finished = true;
                debug!(records = self.records_read, "end of record stream");
                None
            }
            Err(err) => {
                self.finished = true;
                debug!(
                    records = self.records_read,
                    error = %err,
                    "record stream stopped on error"
                );
                Some(Err(err))
            }
        }
    }
}

impl<R: Read> FusedIterator for EventReader<R> {}
