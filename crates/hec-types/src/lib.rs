//! Log event record type for the HEC event codec.
//!
//! An [`Event`] is one structured log entry: a required text body plus six
//! optional attributes. Absence is always explicit (`None`) and never
//! stood in for by an empty string or a zero, so the binary codec and the
//! HEC JSON shape can both tell the two apart.
//!
//! # Modules
//!
//! - [`event`] -- The immutable [`Event`] record and its HEC JSON shape
//! - [`field`] -- [`FieldValue`], the text-or-scalar metadata value
//! - [`builder`] -- [`EventBuilder`] for validated construction
//!
//! # Usage
//!
//! ```
//! use hec_types::{Event, FieldValue};
//!
//! let event = Event::builder()
//!     .with_event("disk full")
//!     .with_host("web-01")
//!     .with_time(1_700_000_000)
//!     .with_field("region", FieldValue::from("eu-west-1"))
//!     .build();
//!
//! assert!(event.is_ok());
//! ```

pub mod builder;
pub mod event;
pub mod field;

// Re-export primary types at crate root.
pub use builder::EventBuilder;
pub use event::{Event, EventParts, Fields};
pub use field::FieldValue;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when constructing an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    /// The builder was finished without an event body.
    #[error("missing required field: event")]
    MissingEvent,
}
