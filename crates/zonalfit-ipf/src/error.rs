//! Error types for proportional fitting.

use thiserror::Error;
use zonalfit_matrix::{Axis, MatrixError};
use zonalfit_ndarray::NdArrayError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum IpfError {
    /// Closure settings are missing or invalid.
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    /// Target totals disagree and the configured policy does not reconcile them.
    #[error("Target totals do not match: {expected} vs {actual}")]
    TargetTotalsMismatch { expected: f64, actual: f64 },

    /// A zone has a non-zero target but its seed sums to zero.
    #[error("{axis} {zone}: seed sums to zero but target is {target}")]
    InfeasibleTarget { axis: Axis, zone: u32, target: f64 },

    /// Targets do not line up with the seed.
    #[error("Dimension mismatch: {reason}")]
    DimensionMismatch { reason: String },

    #[error(transparent)]
    Matrix(#[from] MatrixError),

    #[error(transparent)]
    Array(#[from] NdArrayError),
}

pub type Result<T> = std::result::Result<T, IpfError>;
