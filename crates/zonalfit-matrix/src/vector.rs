//! Zone-indexed vectors (row/column totals and balancing targets).

use crate::error::{Axis, MatrixError, Result};
use crate::numbering::ZoneNumbering;
use crate::scalar::Scalar;

/// A dense vector addressed by external zone number.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneVector<T: Scalar = f32> {
    numbering: ZoneNumbering,
    values: Vec<T>,
}

impl<T: Scalar> ZoneVector<T> {
    /// Zero vector over the given numbering.
    pub fn zeros(numbering: ZoneNumbering) -> Self {
        let values = vec![T::zero(); numbering.len()];
        Self { numbering, values }
    }

    /// Vector from values in storage (ascending external) order.
    pub fn from_values(numbering: ZoneNumbering, values: Vec<T>) -> Result<Self> {
        if values.len() != numbering.len() {
            return Err(MatrixError::LengthMismatch {
                axis: Axis::Row,
                expected: numbering.len(),
                actual: values.len(),
            });
        }
        Ok(Self { numbering, values })
    }

    /// Caller guarantees `values.len() == numbering.len()`.
    pub(crate) fn from_parts(numbering: ZoneNumbering, values: Vec<T>) -> Self {
        debug_assert_eq!(values.len(), numbering.len());
        Self { numbering, values }
    }

    /// Vector over sequential zones `1..=values.len()`.
    pub fn sequential(values: Vec<T>) -> Self {
        Self {
            numbering: ZoneNumbering::sequential(values.len()),
            values,
        }
    }

    /// Vector from `f64` values, converted to the element precision.
    pub fn from_f64(numbering: ZoneNumbering, values: &[f64]) -> Result<Self> {
        Self::from_values(numbering, values.iter().map(|&v| T::from_f64(v)).collect())
    }

    /// The zone numbering of this vector.
    pub fn numbering(&self) -> &ZoneNumbering {
        &self.numbering
    }

    /// Number of zones.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if there are no zones.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in storage order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Values widened to `f64`, in storage order.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.as_f64()).collect()
    }

    /// Value for an external zone.
    pub fn get(&self, external: u32) -> Result<T> {
        let slot = self.numbering.try_internal(external, Axis::Row)?;
        Ok(self.values[slot])
    }

    /// Set the value for an external zone.
    pub fn set(&mut self, external: u32, value: T) -> Result<()> {
        let slot = self.numbering.try_internal(external, Axis::Row)?;
        self.values[slot] = value;
        Ok(())
    }

    /// Sum accumulated in double precision.
    pub fn sum(&self) -> f64 {
        self.values.iter().map(|v| v.as_f64()).sum()
    }

    /// Multiply every element by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.values {
            *v = T::from_f64(v.as_f64() * factor);
        }
    }

    /// Iterate over `(external, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (u32, T)> + '_ {
        self.numbering
            .externals()
            .iter()
            .copied()
            .zip(self.values.iter().copied())
    }

    /// Consume into `(numbering, values)`.
    pub fn into_parts(self) -> (ZoneNumbering, Vec<T>) {
        (self.numbering, self.values)
    }
}
