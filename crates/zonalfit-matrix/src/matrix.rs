//! Dense zone-indexed matrix.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::{Axis, MatrixError, Result};
use crate::numbering::ZoneNumbering;
use crate::scalar::Scalar;
use crate::vector::ZoneVector;

/// Summary statistics of a matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixStats {
    /// Sum of all cells, accumulated in `f64`.
    pub sum: f64,
    /// Smallest cell value.
    pub min: f64,
    /// Largest cell value.
    pub max: f64,
    /// Number of cells equal to zero.
    pub zero_count: usize,
    /// Number of rows.
    pub nrows: usize,
    /// Number of columns.
    pub ncols: usize,
}

/// A dense 2-D matrix addressed by external zone numbers.
///
/// Storage is flat and row-major. Every public accessor that takes a zone
/// number translates it through the row or column [`ZoneNumbering`] first;
/// an unmapped number is an [`MatrixError::InvalidIndex`] fault. Indexing
/// with `m[[r, c]]` uses internal storage slots directly.
///
/// The element type defaults to `f32`; sums are accumulated in `f64`.
///
/// # Example
/// ```
/// use zonalfit_matrix::{ZoneMatrix, ZoneNumbering};
///
/// let zones = ZoneNumbering::new(vec![1, 2, 5, 7]).unwrap();
/// let mut m: ZoneMatrix = ZoneMatrix::zeros(zones.clone(), zones);
/// m.set(5, 7, 3.5).unwrap();
/// assert_eq!(m.get(5, 7).unwrap(), 3.5);
/// assert!(m.get(3, 7).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneMatrix<T: Scalar = f32> {
    name: String,
    description: String,
    rows: ZoneNumbering,
    cols: ZoneNumbering,
    data: Vec<T>,
    square_numbering: bool,
}

impl<T: Scalar> ZoneMatrix<T> {
    /// Zero matrix over the given row and column numbering.
    pub fn zeros(rows: ZoneNumbering, cols: ZoneNumbering) -> Self {
        Self::filled(rows, cols, T::zero())
    }

    /// Matrix with every cell set to `value`.
    pub fn filled(rows: ZoneNumbering, cols: ZoneNumbering, value: T) -> Self {
        let data = vec![value; rows.len() * cols.len()];
        let square_numbering = rows == cols;
        Self {
            name: String::new(),
            description: String::new(),
            rows,
            cols,
            data,
            square_numbering,
        }
    }

    /// Zero matrix numbered `1..=nrows` by `1..=ncols`.
    pub fn sequential(nrows: usize, ncols: usize) -> Self {
        Self::zeros(
            ZoneNumbering::sequential(nrows),
            ZoneNumbering::sequential(ncols),
        )
    }

    /// Matrix from flat row-major data.
    pub fn from_flat(rows: ZoneNumbering, cols: ZoneNumbering, data: Vec<T>) -> Result<Self> {
        if data.len() != rows.len() * cols.len() {
            return Err(MatrixError::InvalidDimensions {
                expected_rows: rows.len(),
                expected_cols: cols.len(),
                actual_rows: if cols.is_empty() { 0 } else { data.len() / cols.len() },
                actual_cols: cols.len(),
            });
        }
        let square_numbering = rows == cols;
        Ok(Self {
            name: String::new(),
            description: String::new(),
            rows,
            cols,
            data,
            square_numbering,
        })
    }

    /// Matrix from nested rows, numbered `1..=n` on both axes.
    pub fn from_vec2d(values: Vec<Vec<T>>) -> Result<Self> {
        let nrows = values.len();
        let ncols = values.first().map_or(0, Vec::len);
        Self::from_rows(
            ZoneNumbering::sequential(nrows),
            ZoneNumbering::sequential(ncols),
            values,
        )
    }

    /// Matrix from nested rows over explicit numbering.
    pub fn from_rows(
        rows: ZoneNumbering,
        cols: ZoneNumbering,
        values: Vec<Vec<T>>,
    ) -> Result<Self> {
        if values.len() != rows.len() {
            return Err(MatrixError::InvalidDimensions {
                expected_rows: rows.len(),
                expected_cols: cols.len(),
                actual_rows: values.len(),
                actual_cols: values.first().map_or(0, Vec::len),
            });
        }
        let mut data = Vec::with_capacity(rows.len() * cols.len());
        for (row, v) in values.into_iter().enumerate() {
            if v.len() != cols.len() {
                return Err(MatrixError::RaggedRows {
                    row,
                    expected: cols.len(),
                    actual: v.len(),
                });
            }
            data.extend(v);
        }
        Self::from_flat(rows, cols, data)
    }

    /// Set the name, builder style.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the description, builder style.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.cols.len()
    }

    pub fn row_numbering(&self) -> &ZoneNumbering {
        &self.rows
    }

    pub fn column_numbering(&self) -> &ZoneNumbering {
        &self.cols
    }

    /// Whether the row and column numbering are identical.
    pub fn is_square_numbering(&self) -> bool {
        self.square_numbering
    }

    /// The shared numbering of a square-numbered matrix.
    pub fn numbering(&self) -> Result<&ZoneNumbering> {
        if self.square_numbering {
            Ok(&self.rows)
        } else {
            Err(MatrixError::NonSquareNumbering)
        }
    }

    /// Internal slot of an external number on a square-numbered matrix.
    pub fn internal_number(&self, external: u32) -> Result<usize> {
        self.numbering()?.try_internal(external, Axis::Row)
    }

    /// External number at a slot of a square-numbered matrix.
    pub fn external_number(&self, internal: usize) -> Result<Option<u32>> {
        Ok(self.numbering()?.external(internal))
    }

    pub fn internal_row_number(&self, external: u32) -> Option<usize> {
        self.rows.internal(external)
    }

    pub fn internal_column_number(&self, external: u32) -> Option<usize> {
        self.cols.internal(external)
    }

    pub fn external_row_number(&self, internal: usize) -> Option<u32> {
        self.rows.external(internal)
    }

    pub fn external_column_number(&self, internal: usize) -> Option<u32> {
        self.cols.external(internal)
    }

    /// Replace the external numbering of both axes.
    ///
    /// The new numbering must have the same extents as the old one.
    pub fn renumber(&mut self, rows: ZoneNumbering, cols: ZoneNumbering) -> Result<()> {
        if rows.len() != self.nrows() {
            return Err(MatrixError::LengthMismatch {
                axis: Axis::Row,
                expected: self.nrows(),
                actual: rows.len(),
            });
        }
        if cols.len() != self.ncols() {
            return Err(MatrixError::LengthMismatch {
                axis: Axis::Column,
                expected: self.ncols(),
                actual: cols.len(),
            });
        }
        self.square_numbering = rows == cols;
        self.rows = rows;
        self.cols = cols;
        Ok(())
    }

    /// Flat row-major storage.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Storage of one row by internal slot.
    pub fn row_slice(&self, row: usize) -> &[T] {
        let n = self.ncols();
        &self.data[row * n..(row + 1) * n]
    }

    pub fn row_slice_mut(&mut self, row: usize) -> &mut [T] {
        let n = self.ncols();
        &mut self.data[row * n..(row + 1) * n]
    }

    fn slots(&self, row: u32, col: u32) -> Result<(usize, usize)> {
        let r = self.rows.try_internal(row, Axis::Row)?;
        let c = self.cols.try_internal(col, Axis::Column)?;
        Ok((r, c))
    }

    /// Value at external `(row, col)`.
    pub fn get(&self, row: u32, col: u32) -> Result<T> {
        let (r, c) = self.slots(row, col)?;
        Ok(self[[r, c]])
    }

    /// Set the value at external `(row, col)`.
    pub fn set(&mut self, row: u32, col: u32, value: T) -> Result<()> {
        let (r, c) = self.slots(row, col)?;
        self[[r, c]] = value;
        Ok(())
    }

    /// Add `delta` to the value at external `(row, col)`.
    pub fn add_to_value_at(&mut self, row: u32, col: u32, delta: T) -> Result<()> {
        let (r, c) = self.slots(row, col)?;
        self[[r, c]] = self[[r, c]] + delta;
        Ok(())
    }

    /// Set from an `f64`, substituting the given values when it does not fit
    /// the element type.
    pub fn set_value_at_f64(
        &mut self,
        row: u32,
        col: u32,
        value: f64,
        negative_infinity: T,
        positive_infinity: T,
    ) -> Result<()> {
        let limit = T::max_value().as_f64();
        let v = if value < -limit {
            negative_infinity
        } else if value > limit {
            positive_infinity
        } else {
            T::from_f64(value)
        };
        self.set(row, col, v)
    }

    /// Row values in column storage order.
    pub fn row(&self, row: u32) -> Result<Vec<T>> {
        let r = self.rows.try_internal(row, Axis::Row)?;
        Ok(self.row_slice(r).to_vec())
    }

    /// Column values in row storage order.
    pub fn column(&self, col: u32) -> Result<Vec<T>> {
        let c = self.cols.try_internal(col, Axis::Column)?;
        Ok(self.column_iter(c).collect())
    }

    fn column_iter(&self, col: usize) -> impl Iterator<Item = T> + '_ {
        self.data.iter().skip(col).step_by(self.ncols().max(1)).copied()
    }

    /// Overwrite one row.
    pub fn set_row(&mut self, row: u32, values: &[T]) -> Result<()> {
        let r = self.rows.try_internal(row, Axis::Row)?;
        if values.len() != self.ncols() {
            return Err(MatrixError::LengthMismatch {
                axis: Axis::Column,
                expected: self.ncols(),
                actual: values.len(),
            });
        }
        self.row_slice_mut(r).copy_from_slice(values);
        Ok(())
    }

    /// Overwrite one column.
    pub fn set_column(&mut self, col: u32, values: &[T]) -> Result<()> {
        let c = self.cols.try_internal(col, Axis::Column)?;
        if values.len() != self.nrows() {
            return Err(MatrixError::LengthMismatch {
                axis: Axis::Row,
                expected: self.nrows(),
                actual: values.len(),
            });
        }
        for (r, &v) in values.iter().enumerate() {
            self[[r, c]] = v;
        }
        Ok(())
    }

    /// Row sum, accumulated in `f64`.
    pub fn row_sum(&self, row: u32) -> Result<T> {
        let r = self.rows.try_internal(row, Axis::Row)?;
        Ok(T::from_f64(self.row_sum_f64(r)))
    }

    /// Column sum, accumulated in `f64`.
    pub fn column_sum(&self, col: u32) -> Result<T> {
        let c = self.cols.try_internal(col, Axis::Column)?;
        Ok(T::from_f64(self.column_sum_f64(c)))
    }

    /// Row sum by internal slot.
    pub fn row_sum_f64(&self, row: usize) -> f64 {
        self.row_slice(row).iter().map(|v| v.as_f64()).sum()
    }

    /// Column sum by internal slot.
    pub fn column_sum_f64(&self, col: usize) -> f64 {
        self.column_iter(col).map(|v| v.as_f64()).sum()
    }

    /// Smallest value in a column.
    pub fn column_min(&self, col: u32) -> Result<T> {
        let c = self.cols.try_internal(col, Axis::Column)?;
        Ok(self.column_iter(c).fold(T::max_value(), T::min))
    }

    /// Row totals in double precision, in row storage order.
    pub fn row_totals_f64(&self) -> Vec<f64> {
        (0..self.nrows()).map(|r| self.row_sum_f64(r)).collect()
    }

    /// Column totals in double precision, in column storage order.
    pub fn column_totals_f64(&self) -> Vec<f64> {
        let mut totals = vec![0.0; self.ncols()];
        for r in 0..self.nrows() {
            for (t, v) in totals.iter_mut().zip(self.row_slice(r)) {
                *t += v.as_f64();
            }
        }
        totals
    }

    /// Row totals as a vector over the row numbering.
    pub fn row_totals(&self) -> ZoneVector<T> {
        let values = self.row_totals_f64().into_iter().map(T::from_f64).collect();
        ZoneVector::from_parts(self.rows.clone(), values)
    }

    /// Column totals as a vector over the column numbering.
    pub fn column_totals(&self) -> ZoneVector<T> {
        let values = self.column_totals_f64().into_iter().map(T::from_f64).collect();
        ZoneVector::from_parts(self.cols.clone(), values)
    }

    /// Sum of all cells.
    pub fn sum(&self) -> f64 {
        self.data.iter().map(|v| v.as_f64()).sum()
    }

    /// Largest cell value (`T::min_value()` when empty).
    pub fn max(&self) -> T {
        self.data.iter().copied().fold(T::min_value(), T::max)
    }

    /// Smallest cell value (`T::max_value()` when empty).
    pub fn min(&self) -> T {
        self.data.iter().copied().fold(T::max_value(), T::min)
    }

    /// Number of cells equal to zero.
    pub fn zero_count(&self) -> usize {
        self.data.iter().filter(|v| v.is_zero()).count()
    }

    pub fn stats(&self) -> MatrixStats {
        MatrixStats {
            sum: self.sum(),
            min: self.min().as_f64(),
            max: self.max().as_f64(),
            zero_count: self.zero_count(),
            nrows: self.nrows(),
            ncols: self.ncols(),
        }
    }

    /// Log [`stats`](Self::stats) at info level.
    pub fn log_stats(&self) {
        let s = self.stats();
        log::info!(
            "matrix '{}' ({}x{}): sum={} min={} max={} zeros={}",
            self.name,
            s.nrows,
            s.ncols,
            s.sum,
            s.min,
            s.max,
            s.zero_count
        );
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Multiply every cell by `factor` in place.
    pub fn scale(&mut self, factor: T) {
        for v in &mut self.data {
            *v = *v * factor;
        }
    }

    /// Copy multiplied by `factor`.
    pub fn scaled(&self, factor: T) -> Self {
        let mut out = self.clone();
        out.scale(factor);
        out
    }

    fn check_same_dims(&self, other: &Self) -> Result<()> {
        if self.nrows() != other.nrows() || self.ncols() != other.ncols() {
            return Err(MatrixError::InvalidDimensions {
                expected_rows: self.nrows(),
                expected_cols: self.ncols(),
                actual_rows: other.nrows(),
                actual_cols: other.ncols(),
            });
        }
        Ok(())
    }

    fn zip_with(&self, other: &Self, f: impl Fn(T, T) -> T) -> Result<Self> {
        self.check_same_dims(other)?;
        let mut out = self.clone();
        for (a, &b) in out.data.iter_mut().zip(&other.data) {
            *a = f(*a, b);
        }
        Ok(out)
    }

    /// Cell-wise sum; the result keeps this matrix's numbering.
    pub fn add(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a + b)
    }

    /// Cell-wise difference; the result keeps this matrix's numbering.
    pub fn subtract(&self, other: &Self) -> Result<Self> {
        self.zip_with(other, |a, b| a - b)
    }

    /// Matrix product. Rows come from `self`, columns from `other`.
    pub fn matmul(&self, other: &Self) -> Result<Self> {
        if self.ncols() != other.nrows() {
            return Err(MatrixError::InvalidDimensions {
                expected_rows: self.ncols(),
                expected_cols: other.ncols(),
                actual_rows: other.nrows(),
                actual_cols: other.ncols(),
            });
        }
        let (n, k, m) = (self.nrows(), self.ncols(), other.ncols());
        let mut data = vec![T::zero(); n * m];
        for i in 0..n {
            for j in 0..m {
                let acc: f64 = (0..k)
                    .map(|l| self[[i, l]].as_f64() * other[[l, j]].as_f64())
                    .sum();
                data[i * m + j] = T::from_f64(acc);
            }
        }
        let mut out = Self::from_flat(self.rows.clone(), other.cols.clone(), data)?;
        out.name = self.name.clone();
        Ok(out)
    }

    /// Matrix times column vector; the vector must match the column axis.
    pub fn mul_column_vector(&self, v: &ZoneVector<T>) -> Result<ZoneVector<T>> {
        if v.len() != self.ncols() {
            return Err(MatrixError::LengthMismatch {
                axis: Axis::Column,
                expected: self.ncols(),
                actual: v.len(),
            });
        }
        let values = (0..self.nrows())
            .map(|r| {
                let acc: f64 = self
                    .row_slice(r)
                    .iter()
                    .zip(v.values())
                    .map(|(a, b)| a.as_f64() * b.as_f64())
                    .sum();
                T::from_f64(acc)
            })
            .collect();
        ZoneVector::from_values(self.rows.clone(), values)
    }

    /// Row vector times matrix; the vector must match the row axis.
    pub fn row_vector_mul(&self, v: &ZoneVector<T>) -> Result<ZoneVector<T>> {
        if v.len() != self.nrows() {
            return Err(MatrixError::LengthMismatch {
                axis: Axis::Row,
                expected: self.nrows(),
                actual: v.len(),
            });
        }
        let mut acc = vec![0.0; self.ncols()];
        for (r, w) in v.values().iter().enumerate() {
            for (a, x) in acc.iter_mut().zip(self.row_slice(r)) {
                *a += w.as_f64() * x.as_f64();
            }
        }
        ZoneVector::from_values(self.cols.clone(), acc.into_iter().map(T::from_f64).collect())
    }

    /// Transpose, swapping storage and numbering together.
    pub fn transpose(&self) -> Self {
        let (n, m) = (self.nrows(), self.ncols());
        let mut data = vec![T::zero(); n * m];
        for i in 0..n {
            for j in 0..m {
                data[j * n + i] = self[[i, j]];
            }
        }
        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            rows: self.cols.clone(),
            cols: self.rows.clone(),
            data,
            square_numbering: self.square_numbering,
        }
    }

    /// Sub-matrix over the given row and column zones (in any order).
    pub fn sub_matrix(&self, rows: &[u32], cols: &[u32]) -> Result<Self> {
        let rows = ZoneNumbering::from_unsorted(rows);
        let cols = ZoneNumbering::from_unsorted(cols);
        self.sub_matrix_over(rows, cols)
    }

    /// Sub-matrix using the same zones on both axes.
    pub fn sub_matrix_square(&self, zones: &[u32]) -> Result<Self> {
        let zones = ZoneNumbering::from_unsorted(zones);
        self.sub_matrix_over(zones.clone(), zones)
    }

    /// Sub-matrix over zone sets.
    pub fn sub_matrix_from_sets(&self, rows: &BTreeSet<u32>, cols: &BTreeSet<u32>) -> Result<Self> {
        self.sub_matrix_over(ZoneNumbering::from_set(rows), ZoneNumbering::from_set(cols))
    }

    fn sub_matrix_over(&self, rows: ZoneNumbering, cols: ZoneNumbering) -> Result<Self> {
        let row_slots = rows
            .externals()
            .iter()
            .map(|&e| self.rows.try_internal(e, Axis::Row))
            .collect::<Result<Vec<_>>>()?;
        let col_slots = cols
            .externals()
            .iter()
            .map(|&e| self.cols.try_internal(e, Axis::Column))
            .collect::<Result<Vec<_>>>()?;

        let mut data = Vec::with_capacity(row_slots.len() * col_slots.len());
        for &r in &row_slots {
            data.extend(col_slots.iter().map(|&c| self[[r, c]]));
        }
        let mut out = Self::from_flat(rows, cols, data)?;
        out.name = self.name.clone();
        Ok(out)
    }

    /// Set each diagonal cell to half the smallest off-diagonal value of its row.
    ///
    /// Diagonal means equal internal slots. Rows without an off-diagonal cell
    /// are left unchanged.
    pub fn set_intrazonal_to_half_nearest_neighbor(&mut self) {
        let half = T::from_f64(0.5);
        for r in 0..self.nrows().min(self.ncols()) {
            let nearest = self
                .row_slice(r)
                .iter()
                .enumerate()
                .filter(|&(c, _)| c != r)
                .map(|(_, &v)| v)
                .fold(None, |acc: Option<T>, v| Some(acc.map_or(v, |a| a.min(v))));
            if let Some(v) = nearest {
                self[[r, r]] = half * v;
            }
        }
    }
}

impl<T: Scalar> Index<[usize; 2]> for ZoneMatrix<T> {
    type Output = T;

    fn index(&self, idx: [usize; 2]) -> &Self::Output {
        &self.data[idx[0] * self.ncols() + idx[1]]
    }
}

impl<T: Scalar> IndexMut<[usize; 2]> for ZoneMatrix<T> {
    fn index_mut(&mut self, idx: [usize; 2]) -> &mut Self::Output {
        let n = self.ncols();
        &mut self.data[idx[0] * n + idx[1]]
    }
}

impl<T: Scalar> fmt::Display for ZoneMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ZoneMatrix '{}' {}x{}", self.name, self.nrows(), self.ncols())?;
        write!(f, "{:>8}", "")?;
        for c in self.cols.externals() {
            write!(f, " {:>10}", c)?;
        }
        writeln!(f)?;
        for (r, ext) in self.rows.iter() {
            write!(f, "{:>8}", ext)?;
            for v in self.row_slice(r) {
                write!(f, " {:>10.4}", v)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> ZoneMatrix<f64> {
        ZoneMatrix::from_vec2d(vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_totals() {
        let m = sample();
        assert_eq!(m.row_totals_f64(), vec![6.0, 15.0]);
        assert_eq!(m.column_totals_f64(), vec![5.0, 7.0, 9.0]);
        assert_eq!(m.row_sum(2).unwrap(), 15.0);
        assert_eq!(m.column_sum(3).unwrap(), 9.0);
        assert_eq!(m.column_totals().values(), &[5.0, 7.0, 9.0]);
        assert_relative_eq!(m.sum(), 21.0);
    }

    #[test]
    fn test_square_numbering_flag() {
        let m = sample();
        assert!(!m.is_square_numbering());
        assert_eq!(m.internal_number(1), Err(MatrixError::NonSquareNumbering));

        let sq = ZoneMatrix::<f32>::sequential(3, 3);
        assert!(sq.is_square_numbering());
        assert_eq!(sq.internal_number(2).unwrap(), 1);
        assert_eq!(sq.external_number(2).unwrap(), Some(3));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let err = ZoneMatrix::<f64>::from_vec2d(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::RaggedRows {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_set_value_clamps_out_of_range() {
        let mut m = ZoneMatrix::<f32>::sequential(1, 1);
        m.set_value_at_f64(1, 1, 1e300, -1.0, 99.0).unwrap();
        assert_eq!(m.get(1, 1).unwrap(), 99.0);
        m.set_value_at_f64(1, 1, -1e300, -1.0, 99.0).unwrap();
        assert_eq!(m.get(1, 1).unwrap(), -1.0);
        m.set_value_at_f64(1, 1, 2.5, -1.0, 99.0).unwrap();
        assert_eq!(m.get(1, 1).unwrap(), 2.5);
    }

    #[test]
    fn test_matmul_shape_and_numbering() {
        let a = sample();
        let b = a.transpose();
        let p = a.matmul(&b).unwrap();
        assert_eq!((p.nrows(), p.ncols()), (2, 2));
        assert_eq!(p.get(1, 1).unwrap(), 14.0);
        assert_eq!(p.get(1, 2).unwrap(), 32.0);
        assert_eq!(p.get(2, 2).unwrap(), 77.0);
        assert!(a.matmul(&a).is_err());
    }

    #[test]
    fn test_vector_products() {
        let m = sample();
        let x = ZoneVector::sequential(vec![1.0, 0.0, 1.0]);
        assert_eq!(m.mul_column_vector(&x).unwrap().values(), &[4.0, 10.0]);
        let y = ZoneVector::sequential(vec![1.0, 1.0]);
        assert_eq!(m.row_vector_mul(&y).unwrap().values(), &[5.0, 7.0, 9.0]);
        assert!(m.mul_column_vector(&y).is_err());
    }

    #[test]
    fn test_intrazonal_half_nearest_neighbor() {
        let mut m = ZoneMatrix::<f64>::from_vec2d(vec![
            vec![0.0, 4.0, 6.0],
            vec![2.0, 0.0, 8.0],
            vec![5.0, 3.0, 0.0],
        ])
        .unwrap();
        m.set_intrazonal_to_half_nearest_neighbor();
        assert_eq!(m[[0, 0]], 2.0);
        assert_eq!(m[[1, 1]], 1.0);
        assert_eq!(m[[2, 2]], 1.5);
    }

    #[test]
    fn test_stats() {
        let mut m = sample();
        m.set(1, 2, 0.0).unwrap();
        let s = m.stats();
        assert_eq!(s.zero_count, 1);
        assert_eq!(s.min, 0.0);
        assert_eq!(s.max, 6.0);
        assert_relative_eq!(s.sum, 19.0);
        assert_eq!(m.column_min(2).unwrap(), 0.0);
    }

    #[test]
    fn test_renumber_checks_extent() {
        let mut m = sample();
        let rows = ZoneNumbering::new(vec![10, 20]).unwrap();
        let cols = ZoneNumbering::new(vec![5, 6, 7]).unwrap();
        m.renumber(rows, cols).unwrap();
        assert_eq!(m.get(20, 7).unwrap(), 6.0);
        assert!(m
            .renumber(ZoneNumbering::sequential(3), ZoneNumbering::sequential(3))
            .is_err());
    }
}
