//! Error types for columnar batch construction and checked access.
//!
//! Most accessor misuse (out-of-range indices, reading a null cell, asking a
//! vector for a kind it does not hold) is a caller bug and panics. The errors
//! here cover the producer-facing paths that can reasonably be checked and
//! reported: populating a batch, building decimal/timestamp values and
//! allocating vectors from a schema.

use thiserror::Error;

use crate::vector::VectorKind;

/// Result type alias using [`BatchError`].
pub type Result<T> = std::result::Result<T, BatchError>;

/// Error types for columnar batch operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    /// The number of vectors does not match the schema arity.
    #[error("Arity mismatch: expected {expected} columns, got {actual}")]
    ArityMismatch { expected: usize, actual: usize },

    /// A vector is not of the kind its column type is stored in.
    #[error("Column {col} ({name}) is stored in a {expected} vector, found {actual}")]
    KindMismatch {
        col: usize,
        name: String,
        expected: VectorKind,
        actual: VectorKind,
    },

    /// A column declared non-nullable holds null rows.
    #[error("Column {col} ({name}) is not nullable but holds {null_count} nulls")]
    UnexpectedNulls {
        col: usize,
        name: String,
        null_count: usize,
    },

    /// Row count set beyond the batch capacity.
    #[error("Row count {num_rows} exceeds batch capacity {capacity}")]
    RowCountExceedsCapacity { num_rows: usize, capacity: usize },

    /// A column holds fewer values than the requested row count.
    #[error("Column {col} holds {len} values, fewer than the row count {num_rows}")]
    VectorTooShort {
        col: usize,
        len: usize,
        num_rows: usize,
    },

    /// Decimal precision/scale out of range, or a value that does not fit.
    #[error("Invalid decimal: {0}")]
    InvalidDecimal(String),

    /// Timestamp precision or sub-millisecond component out of range.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// A bytes cell read as text is not valid UTF-8.
    #[error("Invalid UTF-8 at row {row}, column {col}")]
    InvalidUtf8 { row: usize, col: usize },
}
