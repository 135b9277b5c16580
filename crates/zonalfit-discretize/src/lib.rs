//! Controlled rounding of real-valued N-dimensional arrays to integers.
//!
//! [`discretize`] keeps each cell's integer part and distributes the
//! fractional mass as whole units, preferring cells that sit on large
//! remainder marginals so the integer table's marginals stay close to the
//! input's.
//!
//! # Example
//! ```
//! use zonalfit_discretize::ControlledRounding;
//! use zonalfit_ndarray::NdArray;
//!
//! let a = NdArray::<f64>::from_vec(&[3], vec![0.4, 0.4, 0.4]).unwrap();
//! let out = ControlledRounding::new().discretize(a).unwrap();
//! assert_eq!(out.array.sum(), 1.0);
//! assert!(out.array.as_slice().iter().all(|&v| v == 0.0 || v == 1.0));
//! ```

pub mod error;
pub mod rounding;

pub use error::{DiscretizeError, Result};
pub use rounding::{
    discretize, ControlledRounding, ControlledRoundingOptions, Discretized,
    DEFAULT_EXHAUSTED_TOLERANCE,
};
