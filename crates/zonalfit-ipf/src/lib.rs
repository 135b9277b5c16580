//! Iterative proportional fitting (IPF).
//!
//! Two balancers share the same [`ClosureCriteria`]:
//! - [`balance_matrix`] / [`MatrixBalancer`]: row/column fitting of a
//!   [`ZoneMatrix`](zonalfit_matrix::ZoneMatrix) to row and column targets
//! - [`balance_array`] / [`ArrayBalancer`]: per-axis fitting of an
//!   [`NdArray`](zonalfit_ndarray::NdArray) to one target vector per axis
//!
//! Both take the seed by value and return it balanced, together with the
//! iteration count and final error.

pub mod array_balancer;
pub mod closure;
pub mod error;
pub mod matrix_balancer;

pub use array_balancer::{balance_array, ArrayBalance, ArrayBalanceOptions, ArrayBalancer, POSITIVE_TARGET};
pub use closure::{relative_difference, ClosureCriteria, ClosureCriteriaBuilder};
pub use error::{IpfError, Result};
pub use matrix_balancer::{
    balance_matrix, MatrixBalance, MatrixBalanceOptions, MatrixBalancer, TargetReconciliation,
    ZeroSeedPolicy, DEFAULT_REPAIR_EPSILON,
};
