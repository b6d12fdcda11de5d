//! Error types for the GDV core model.
//!
//! Every failure here is a synchronous, non-retryable validation error:
//! it is raised at the point of violation and nothing is coerced or
//! clamped on the way. Callers (catalog loaders, import drivers) are
//! responsible for turning these into user-facing diagnostics.

use thiserror::Error;

/// Validation errors of the core record model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GdvError {
    /// Byte address outside the valid record range of 1..=256.
    #[error("byte address {value} is outside 1..=256")]
    OutOfRange { value: i32 },

    /// Content does not fit into the declared field length.
    #[error("field {bezeichner}: content of {length} chars is longer than {max} bytes")]
    ContentTooLong {
        bezeichner: String,
        length: usize,
        max: usize,
    },

    /// Adding the field would overlap an already registered field.
    #[error("{neu} overlaps with {vorhanden}")]
    OverlapViolation { neu: String, vorhanden: String },

    /// Lookup by identifier, address or ordinal failed.
    #[error("field '{name}' not found")]
    FeldNotFound { name: String },

    /// A second field with the same technical name at another address.
    #[error("field '{name}' is already present at address {adresse}")]
    DuplicateName { name: String, adresse: u16 },

    /// Input that cannot be parsed or is out of the documented value range.
    #[error("not a valid Satz-Typ: '{input}'")]
    InvalidFormat { input: String },

    /// A record type key with the wrong number of segments.
    #[error("expected 1..=4 segments, got {count}")]
    InvalidArity { count: usize },

    /// Accessor invoked for a concept the record type does not carry.
    #[error("{satz_typ} has no {attribut}")]
    NotApplicable {
        satz_typ: String,
        attribut: &'static str,
    },
}

/// Result type for core model operations.
pub type Result<T> = std::result::Result<T, GdvError>;
