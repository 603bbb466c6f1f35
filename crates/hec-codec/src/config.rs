//! Size limits for the codec and their YAML loader.
//!
//! The limits apply symmetrically: the encoder refuses a record that breaks
//! one ([`CodecError::InvalidRecord`](crate::CodecError::InvalidRecord)) and
//! the decoder refuses a byte stream that claims to
//! ([`CodecError::CorruptData`](crate::CodecError::CorruptData)). The
//! defaults are the full range of the 4-byte length prefix, so a default
//! codec accepts every record the wire format can represent.
//!
//! ```yaml
//! max_text_bytes: 65536
//! max_fields_bytes: 1048576
//! max_field_entries: 256
//! ```

use std::path::Path;

use serde::Deserialize;

/// Environment variable overriding [`CodecConfig::max_text_bytes`].
pub const MAX_TEXT_BYTES_ENV: &str = "HEC_CODEC_MAX_TEXT_BYTES";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is not usable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Codec size limits, all in bytes except `max_field_entries`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(clippy::struct_field_names)] // Field names are the YAML keys.
pub struct CodecConfig {
    /// Longest text attribute, metadata key or metadata text value.
    #[serde(default = "default_limit")]
    pub max_text_bytes: u32,

    /// Longest serialized metadata blob.
    #[serde(default = "default_limit")]
    pub max_fields_bytes: u32,

    /// Most entries in one metadata map.
    #[serde(default = "default_limit")]
    pub max_field_entries: u32,
}

impl CodecConfig {
    /// Limits equal to the representable range of the length prefix.
    pub const DEFAULT: Self = Self {
        max_text_bytes: u32::MAX,
        max_fields_bytes: u32::MAX,
        max_field_entries: u32::MAX,
    };

    /// Load configuration from a YAML file at the given path.
    ///
    /// `HEC_CODEC_MAX_TEXT_BYTES`, when set to a valid `u32`, overrides
    /// `max_text_bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a limit is zero.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a limit is zero.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes as unit, not as an empty map.
        let mut config: Self = if yaml.trim().is_empty() {
            Self::DEFAULT
        } else {
            serde_yml::from_str(yaml)?
        };
        config.apply_env_override(std::env::var(MAX_TEXT_BYTES_ENV).ok().as_deref());
        config.validate()?;
        Ok(config)
    }

    /// Apply the `HEC_CODEC_MAX_TEXT_BYTES` override value, if it parses.
    pub(crate) fn apply_env_override(&mut self, max_text_bytes: Option<&str>) {
        if let Some(limit) = max_text_bytes.and_then(|raw| raw.trim().parse::<u32>().ok()) {
            self.max_text_bytes = limit;
        }
    }

    /// Reject limits that would make every record unencodable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first zero limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            ("max_text_bytes", self.max_text_bytes),
            ("max_fields_bytes", self.max_fields_bytes),
            ("max_field_entries", self.max_field_entries),
        ];
        for (name, value) in limits {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("{name} must be non-zero")));
            }
        }
        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

const fn default_limit() -> u32 {
    u32::MAX
}
