//! Error types for N-dimensional arrays.

use thiserror::Error;
use zonalfit_matrix::MatrixError;

/// Errors raised by [`NdArray`](crate::NdArray) and [`LabelledArray`](crate::LabelledArray).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NdArrayError {
    /// The shape has no axes.
    #[error("array shape must have at least one axis")]
    EmptyShape,

    /// A location or per-axis argument has the wrong number of entries.
    #[error("rank mismatch: expected {expected} coordinates, got {actual}")]
    RankMismatch { expected: usize, actual: usize },

    /// A coordinate is outside its axis extent.
    #[error("index {index} out of bounds for axis {axis} with extent {extent}")]
    IndexOutOfBounds {
        axis: usize,
        index: usize,
        extent: usize,
    },

    /// A flat index is outside `[0, len)`.
    #[error("flat index {index} out of bounds for array of length {len}")]
    FlatIndexOutOfBounds { index: usize, len: usize },

    /// An axis number is not below the rank.
    #[error("axis {axis} out of range for rank {rank}")]
    AxisOutOfRange { axis: usize, rank: usize },

    /// A vector location does not have exactly one free axis, or has a negative coordinate.
    #[error("invalid vector location: {reason}")]
    InvalidVectorLocation { reason: String },

    /// A vector is not as long as the axis it is applied along.
    #[error("length mismatch along axis {axis}: expected {expected}, got {actual}")]
    LengthMismatch {
        axis: usize,
        expected: usize,
        actual: usize,
    },

    /// Two arrays, or an array and a matrix, have different shapes.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Flat data does not hold one value per cell.
    #[error("data length {actual} does not match shape product {expected}")]
    DataLength { expected: usize, actual: usize },

    /// A rank-1 array cannot lose an axis.
    #[error("cannot collapse a rank-1 array")]
    CollapseRankOne,

    /// A label is not registered on its axis.
    #[error("unknown label '{label}' on axis {axis}")]
    UnknownLabel { axis: usize, label: String },

    /// A label appears twice on the same axis.
    #[error("duplicate label '{label}' on axis {axis}")]
    DuplicateLabel { axis: usize, label: String },

    /// Registering a label would exceed the axis extent.
    #[error("axis {axis} already holds {extent} labels")]
    TooManyLabels { axis: usize, extent: usize },

    /// A matrix conversion was given an array whose rank is not 2.
    #[error("expected a rank-2 array, got rank {rank}")]
    NotMatrix { rank: usize },

    /// Zone matrix error.
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

pub type Result<T> = std::result::Result<T, NdArrayError>;
