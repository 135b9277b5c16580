//! Zone-indexed matrices.
//!
//! This crate provides the 2-D value store used by the balancing and
//! rounding crates:
//! - [`ZoneNumbering`]: sparse external zone numbers mapped to dense slots
//! - [`ZoneMatrix`]: a dense matrix addressed by external row/column zones
//! - [`ZoneVector`]: a dense vector addressed by external zones
//! - [`Scalar`]: the `f32`/`f64` element trait shared with `zonalfit-ndarray`
//!
//! # Example
//!
//! ```
//! use zonalfit_matrix::{ZoneMatrix, ZoneNumbering};
//!
//! let zones = ZoneNumbering::new(vec![101, 102, 205]).unwrap();
//! let mut trips: ZoneMatrix = ZoneMatrix::zeros(zones.clone(), zones);
//! trips.set(101, 205, 12.0).unwrap();
//! trips.add_to_value_at(101, 205, 3.0).unwrap();
//!
//! assert_eq!(trips.row_sum(101).unwrap(), 15.0);
//! assert_eq!(trips.transpose().get(205, 101).unwrap(), 15.0);
//! ```

pub mod error;
pub mod matrix;
pub mod numbering;
pub mod scalar;
pub mod vector;

pub use error::{Axis, MatrixError, Result};
pub use matrix::{MatrixStats, ZoneMatrix};
pub use numbering::{ZoneNumbering, NOT_MAPPED};
pub use scalar::Scalar;
pub use vector::ZoneVector;
