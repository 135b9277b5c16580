//! Error types for controlled rounding.

use thiserror::Error;
use zonalfit_ndarray::NdArrayError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DiscretizeError {
    #[error("cell {index} holds non-finite value {value}")]
    NonFiniteValue { index: usize, value: f64 },

    #[error("invalid option: {reason}")]
    InvalidOption { reason: String },

    #[error(transparent)]
    Array(#[from] NdArrayError),
}

pub type Result<T> = std::result::Result<T, DiscretizeError>;
