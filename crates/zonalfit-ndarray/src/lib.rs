//! Dense N-dimensional arrays.
//!
//! [`NdArray`] stores a rank-`D` array in row-major order and offers the
//! axis-wise operations needed by proportional fitting and controlled
//! rounding: 1-D slices addressed by *vector locations* (one coordinate set
//! to [`FREE`]), marginals along an axis, broadcasting a vector along an
//! axis, and collapsing an axis away. Slices along an axis are walked with
//! [`Lanes`], an iterative odometer over the stride table.
//!
//! [`LabelledArray`] wraps an array with string labels per axis.
//!
//! # Example
//!
//! ```
//! use zonalfit_ndarray::{ArrayOp, NdArray, FREE};
//!
//! let mut a = NdArray::<f64>::filled(&[2, 3, 4], 1.0).unwrap();
//! a.multiply_along(&[1.0, 2.0, 3.0], 1).unwrap();
//! a.operate_vector(&[1.0; 4], &[0, 0, FREE], ArrayOp::Add).unwrap();
//!
//! assert_eq!(a.collapse_to_vector_f64(1).unwrap(), vec![12.0, 16.0, 24.0]);
//! assert_eq!(a.collapse_dimension(2).unwrap().shape(), &[2, 3]);
//! ```

pub mod array;
pub mod convert;
pub mod error;
pub mod labelled;
pub mod lanes;
pub mod layout;
pub mod op;

pub use array::{NdArray, VectorLocation, FREE};
pub use error::{NdArrayError, Result};
pub use labelled::LabelledArray;
pub use lanes::{Lane, Lanes};
pub use layout::{compute_strides, Layout};
pub use op::ArrayOp;
