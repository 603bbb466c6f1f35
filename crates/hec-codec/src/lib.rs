//! Deterministic binary codec for HEC log event records.
//!
//! [`EventCodec`] turns an [`Event`](hec_types::Event) into bytes and back.
//! The format has no envelope, version byte or checksum; corruption is
//! detected purely by bounds-checking length prefixes and flag bytes.
//!
//! # Wire format
//!
//! | Field | Encoding |
//! |-------|----------|
//! | `event` | u32 length + UTF-8 |
//! | `host` | flag + (u32 length + UTF-8) |
//! | `index` | flag + (u32 length + UTF-8) |
//! | `source` | flag + (u32 length + UTF-8) |
//! | `sourcetype` | flag + (u32 length + UTF-8) |
//! | `time` | flag + i64 |
//! | `fields` | flag + (u32 length + metadata blob) |
//!
//! All integers are big-endian and every flag is one byte, 0 or 1. The
//! field order is part of the format. The metadata blob layout is
//! documented in the `fields` module.
//!
//! # Guarantees
//!
//! - **Round trip**: `decode(encode(e)) == e`, byte-exact for all text.
//! - **Determinism**: equal records encode to identical bytes. Metadata is
//!   written in key order, independent of insertion history.
//! - **No partial writes on invalid input**: validation happens before the
//!   sink sees a byte.
//!
//! # Modules
//!
//! - [`codec`] -- [`EventCodec`]: encode and decode one record
//! - [`reader`] -- [`EventReader`]: iterate back-to-back records
//! - [`config`] -- [`CodecConfig`]: size limits and their YAML loader

pub mod codec;
pub mod config;
mod fields;
pub mod reader;
mod wire;

// Re-export primary types at crate root.
pub use codec::EventCodec;
pub use config::{CodecConfig, ConfigError};
pub use reader::EventReader;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors produced by [`EventCodec`].
///
/// The codec never retries, skips or substitutes defaults; every failure
/// reaches the caller.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The record cannot be encoded. Detected before anything is written.
    #[error("invalid record: {field}: {reason}")]
    InvalidRecord {
        /// The offending attribute.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The byte stream is not a well-formed record.
    #[error("corrupt data in {field}: {reason}")]
    CorruptData {
        /// The attribute being read when the inconsistency was found.
        field: &'static str,
        /// What was inconsistent.
        reason: String,
    },

    /// The sink or source faulted.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
