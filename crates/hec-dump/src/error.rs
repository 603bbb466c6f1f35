//! Error types for the `hec-dump` binary.
//!
//! [`DumpError`] wraps every failure mode so `main` can propagate with `?`.

/// Top-level error for the `hec-dump` binary.
#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    /// The command line was not understood.
    #[error("usage: hec-dump <FILE> [CONFIG.yaml]")]
    Usage,

    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: hec_codec::ConfigError,
    },

    /// A record could not be decoded.
    #[error("record {index}: {source}")]
    Decode {
        /// Zero-based position of the failing record in the stream.
        index: u64,
        /// The underlying codec error.
        source: hec_codec::CodecError,
    },

    /// A decoded record could not be rendered as JSON.
    #[error("JSON error: {source}")]
    Json {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// Opening the input or writing the output failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
