//! Error type for the balance-then-round pipeline.

use thiserror::Error;
use zonalfit_discretize::DiscretizeError;
use zonalfit_ipf::IpfError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FitError {
    #[error("balancing failed: {0}")]
    Balance(#[from] IpfError),

    #[error("rounding failed: {0}")]
    Rounding(#[from] DiscretizeError),
}

pub type Result<T> = std::result::Result<T, FitError>;
