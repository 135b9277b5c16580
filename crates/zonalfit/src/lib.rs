//! Iterative proportional fitting over zone-indexed data.
//!
//! This crate re-exports the zonalfit building blocks:
//! - [`ZoneMatrix`] and [`ZoneVector`]: dense 2-D and 1-D stores addressed by
//!   external zone numbers
//! - [`NdArray`] and [`LabelledArray`]: dense N-dimensional arrays
//! - [`balance_matrix`] and [`balance_array`]: 2-D and N-D iterative
//!   proportional fitting
//! - [`discretize`]: controlled rounding to integers
//!
//! and adds [`fit_integer_table`], which balances a seed array to its axis
//! targets and rounds the result.
//!
//! # Example
//! ```
//! use zonalfit::{fit_integer_table, IntegerTableOptions, NdArray};
//!
//! let seed = NdArray::<f64>::filled(&[2, 3], 1.0).unwrap();
//! let targets = vec![vec![4.0, 6.0], vec![3.0, 3.0, 4.0]];
//! let table = fit_integer_table(seed, targets, &IntegerTableOptions::default()).unwrap();
//! assert_eq!(table.rounded.array.sum(), 10.0);
//! ```

pub mod error;
pub mod pipeline;

pub use zonalfit_discretize as rounding;
pub use zonalfit_ipf as ipf;
pub use zonalfit_matrix as matrix;
pub use zonalfit_ndarray as ndarray;

pub use zonalfit_discretize::{
    discretize, ControlledRounding, ControlledRoundingOptions, DiscretizeError, Discretized,
};
pub use zonalfit_ipf::{
    balance_array, balance_matrix, ArrayBalance, ArrayBalanceOptions, ArrayBalancer,
    ClosureCriteria, ClosureCriteriaBuilder, IpfError, MatrixBalance, MatrixBalanceOptions,
    MatrixBalancer, TargetReconciliation, ZeroSeedPolicy,
};
pub use zonalfit_matrix::{
    Axis, MatrixError, MatrixStats, Scalar, ZoneMatrix, ZoneNumbering, ZoneVector,
};
pub use zonalfit_ndarray::{ArrayOp, LabelledArray, NdArray, NdArrayError, VectorLocation, FREE};

pub use error::{FitError, Result};
pub use pipeline::{fit_integer_table, IntegerTable, IntegerTableOptions};
