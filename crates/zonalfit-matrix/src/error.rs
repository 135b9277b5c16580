//! Error types for zone-indexed matrices.

use thiserror::Error;

/// Which axis of a matrix (or which kind of vector) a zone number refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Row axis (origin zones).
    Row,
    /// Column axis (destination zones).
    Column,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// Errors that can occur when building or addressing a zone matrix.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatrixError {
    /// External zone number is not part of the numbering, or maps outside storage.
    #[error("Invalid index: {axis} zone {external} is not mapped in this matrix")]
    InvalidIndex { axis: Axis, external: u32 },

    /// Operand dimensions do not agree.
    #[error("Invalid dimensions: expected ({expected_rows}, {expected_cols}), got ({actual_rows}, {actual_cols})")]
    InvalidDimensions {
        expected_rows: usize,
        expected_cols: usize,
        actual_rows: usize,
        actual_cols: usize,
    },

    /// A vector or buffer has the wrong length for the axis it is applied to.
    #[error("Length mismatch on {axis} axis: expected {expected}, got {actual}")]
    LengthMismatch {
        axis: Axis,
        expected: usize,
        actual: usize,
    },

    /// External numbers must be strictly ascending.
    #[error("Invalid external numbers: {reason}")]
    InvalidExternalNumbers { reason: String },

    /// A square-numbering convenience was used on a matrix whose row and
    /// column numbering differ.
    #[error("Row and column numbering are not equal; use the row or column specific accessor")]
    NonSquareNumbering,

    /// Row data passed to a constructor is ragged.
    #[error("Ragged input: row {row} has {actual} values, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Result type for zone matrix operations.
pub type Result<T> = std::result::Result<T, MatrixError>;
