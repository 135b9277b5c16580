//! Conversions between [`NdArray`] and [`ZoneMatrix`].

use zonalfit_matrix::{Scalar, ZoneMatrix, ZoneNumbering};

use crate::array::NdArray;
use crate::error::{NdArrayError, Result};

impl<T: Scalar> NdArray<T> {
    /// Rank-2 array holding the matrix cells in storage order.
    ///
    /// Zone numbering is dropped; keep the matrix's numbering to convert back.
    pub fn from_zone_matrix(matrix: &ZoneMatrix<T>) -> Result<Self> {
        let shape = [matrix.nrows(), matrix.ncols()];
        let array = Self::from_vec(&shape, matrix.as_slice().to_vec())?;
        Ok(array.with_name(matrix.name()))
    }

    /// Rank-2 array into a matrix over the given numbering.
    pub fn to_zone_matrix(&self, rows: ZoneNumbering, cols: ZoneNumbering) -> Result<ZoneMatrix<T>> {
        if self.rank() != 2 {
            return Err(NdArrayError::NotMatrix { rank: self.rank() });
        }
        let expected = [rows.len(), cols.len()];
        if self.shape() != expected {
            return Err(NdArrayError::ShapeMismatch {
                expected: expected.to_vec(),
                actual: self.shape().to_vec(),
            });
        }
        let matrix = ZoneMatrix::from_flat(rows, cols, self.as_slice().to_vec())?;
        Ok(matrix.with_name(self.name()))
    }

    /// Rank-2 array into a matrix numbered `1..=n` on both axes.
    pub fn to_sequential_zone_matrix(&self) -> Result<ZoneMatrix<T>> {
        if self.rank() != 2 {
            return Err(NdArrayError::NotMatrix { rank: self.rank() });
        }
        self.to_zone_matrix(
            ZoneNumbering::sequential(self.shape()[0]),
            ZoneNumbering::sequential(self.shape()[1]),
        )
    }
}
