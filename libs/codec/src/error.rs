//! Error type of the codec layer.

use thiserror::Error;

use gdv_types::GdvError;

/// Failures while loading catalogs, parsing lines or exporting records.
#[derive(Debug, Error)]
pub enum CodecError {
    /// A core-model invariant was violated (overlap, range, length).
    #[error(transparent)]
    Model(#[from] GdvError),

    /// Content does not satisfy the field's declared datatype.
    #[error("field {bezeichner}: '{content}' is not valid for {datentyp}")]
    InvalidContent {
        bezeichner: String,
        content: String,
        datentyp: &'static str,
    },

    /// A raw line longer than the 256-byte record boundary.
    #[error("line of {length} chars exceeds the record length of 256")]
    LineTooLong { length: usize },

    /// No layout registered for the requested record type.
    #[error("no layout registered for Satzart {satz_typ}")]
    UnknownSatzTyp { satz_typ: String },

    /// Malformed catalog or config TOML.
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for codec operations.
pub type CodecResult<T> = std::result::Result<T, CodecError>;
