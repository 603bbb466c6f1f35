//! `hec-dump`: print a stream of encoded event records as HEC JSON lines.
//!
//! Reads a file of back-to-back records written by `EventCodec::encode`,
//! decodes them in order, and writes one JSON object per line to stdout.
//! Logs go to stderr so the output stays machine-readable.
//!
//! ```text
//! hec-dump <FILE> [CONFIG.yaml]
//! ```
//!
//! The optional YAML file sets the codec's size limits. Decoding stops with
//! a non-zero exit at the first corrupt record.

mod error;

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;

use hec_codec::{CodecConfig, EventCodec, EventReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::DumpError;

/// Application entry point.
///
/// # Errors
///
/// Returns an error on bad usage, unreadable config or input, or the first
/// record that fails to decode.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(true)
        .init();

    let (input, config_path) = parse_args(std::env::args_os().skip(1))?;
    let config = config_path
        .as_deref()
        .map_or_else(|| Ok(CodecConfig::default()), CodecConfig::from_file)
        .map_err(DumpError::from)?;
    info!(
        input = %input.display(),
        max_text_bytes = config.max_text_bytes,
        max_fields_bytes = config.max_fields_bytes,
        "hec-dump starting"
    );

    let file = File::open(&input).map_err(DumpError::from)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let codec = EventCodec::with_config(config);
    let records = dump(codec, BufReader::new(file), &mut out)?;
    out.flush().map_err(DumpError::from)?;

    info!(records, "dump complete");
    Ok(())
}

/// Split the arguments into the input path and an optional config path.
fn parse_args(
    mut args: impl Iterator<Item = OsString>,
) -> Result<(PathBuf, Option<PathBuf>), DumpError> {
    let input = args.next().map(PathBuf::from).ok_or(DumpError::Usage)?;
    let config = args.next().map(PathBuf::from);
    if args.next().is_some() {
        return Err(DumpError::Usage);
    }
    Ok((input, config))
}

/// Decode every record from `source` and write one JSON line per record.
///
/// Returns the number of records written.
fn dump<R: Read, W: Write>(codec: EventCodec, source: R, out: &mut W) -> Result<u64, DumpError> {
    let mut written: u64 = 0;
    for result in EventReader::new(codec, source) {
        let event = result.map_err(|source| DumpError::Decode {
            index: written,
            source,
        })?;
        writeln!(out, "{}", event.to_json()?)?;
        written = written.saturating_add(1);
    }
    Ok(written)
}
