//! Error types.
//!
//! Only recoverable failures live here: bad order records and encoding
//! failures. Broken book or engine invariants panic instead.

use ssz_rs::SerializeError;
use thiserror::Error;

/// A textual order record that cannot reach the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Wrong number of comma-separated fields
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    /// First field is not the order message marker
    #[error("unknown message marker `{0}`")]
    UnknownMarker(String),

    /// Neither `A` (add) nor `C` (cancel)
    #[error("unknown order kind `{0}`")]
    UnknownKind(String),

    /// Neither `B` nor `S`
    #[error("unknown side `{0}`")]
    UnknownSide(String),

    /// A numeric field failed to parse
    #[error("invalid {field} `{value}`")]
    InvalidNumber { field: &'static str, value: String },

    /// Share counts must be positive
    #[error("share count must be positive")]
    ZeroShares,

    /// Record addressed to another instrument
    #[error("record for ticker `{found}` sent to `{expected}` exchange")]
    TickerMismatch { expected: String, found: String },
}

/// Crate-level error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("bad order record: {0}")]
    Record(#[from] RecordError),

    #[error("ssz encoding failed: {0:?}")]
    Encoding(SerializeError),
}

impl From<SerializeError> for Error {
    fn from(err: SerializeError) -> Self {
        Error::Encoding(err)
    }
}
