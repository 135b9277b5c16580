//! Dense N-dimensional array.

use zonalfit_matrix::Scalar;

use crate::error::{NdArrayError, Result};
use crate::lanes::{Lane, Lanes};
use crate::layout::Layout;
use crate::op::ArrayOp;

/// Coordinate value marking the free axis of a vector location.
pub const FREE: isize = -1;

/// A resolved vector location: the 1-D slice along `axis` through the fixed
/// coordinates of every other axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VectorLocation {
    pub axis: usize,
    lane: Lane,
}

impl VectorLocation {
    /// Resolve a location holding exactly one [`FREE`] coordinate.
    pub fn resolve(location: &[isize], layout: &Layout) -> Result<Self> {
        if location.len() != layout.rank() {
            return Err(NdArrayError::RankMismatch {
                expected: layout.rank(),
                actual: location.len(),
            });
        }
        let mut free = None;
        let mut base = 0;
        for (d, &coord) in location.iter().enumerate() {
            if coord == FREE {
                if free.replace(d).is_some() {
                    return Err(NdArrayError::InvalidVectorLocation {
                        reason: format!("more than one free axis in {location:?}"),
                    });
                }
                continue;
            }
            let index = usize::try_from(coord).map_err(|_| NdArrayError::InvalidVectorLocation {
                reason: format!("negative coordinate {coord} on axis {d}"),
            })?;
            if index >= layout.shape()[d] {
                return Err(NdArrayError::IndexOutOfBounds {
                    axis: d,
                    index,
                    extent: layout.shape()[d],
                });
            }
            base += index * layout.strides()[d];
        }
        let axis = free.ok_or_else(|| NdArrayError::InvalidVectorLocation {
            reason: format!("no free axis in {location:?}"),
        })?;
        Ok(Self {
            axis,
            lane: Lane {
                base,
                stride: layout.strides()[axis],
                len: layout.shape()[axis],
            },
        })
    }

    /// Flat offsets along the free axis.
    pub fn offsets(&self) -> impl Iterator<Item = usize> {
        self.lane.offsets()
    }

    pub fn len(&self) -> usize {
        self.lane.len
    }

    pub fn is_empty(&self) -> bool {
        self.lane.len == 0
    }
}

/// A dense rank-`D` array with row-major stride addressing.
///
/// # Example
/// ```
/// use zonalfit_ndarray::{NdArray, FREE};
///
/// let mut a = NdArray::<f64>::zeros(&[2, 3]).unwrap();
/// a.set(&[1, 2], 4.0).unwrap();
/// assert_eq!(a.vector(&[1, FREE]).unwrap(), vec![0.0, 0.0, 4.0]);
/// assert_eq!(a.collapse_to_vector_f64(1).unwrap(), vec![0.0, 0.0, 4.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray<T: Scalar = f64> {
    name: String,
    axis_names: Vec<String>,
    layout: Layout,
    data: Vec<T>,
}

impl<T: Scalar> NdArray<T> {
    pub fn zeros(shape: &[usize]) -> Result<Self> {
        Self::filled(shape, T::zero())
    }

    pub fn filled(shape: &[usize], value: T) -> Result<Self> {
        let layout = Layout::new(shape)?;
        let data = vec![value; layout.len()];
        Ok(Self::from_layout(layout, data))
    }

    /// Array from row-major data.
    pub fn from_vec(shape: &[usize], data: Vec<T>) -> Result<Self> {
        let layout = Layout::new(shape)?;
        if data.len() != layout.len() {
            return Err(NdArrayError::DataLength {
                expected: layout.len(),
                actual: data.len(),
            });
        }
        Ok(Self::from_layout(layout, data))
    }

    fn from_layout(layout: Layout, data: Vec<T>) -> Self {
        Self {
            name: String::new(),
            axis_names: Vec::new(),
            layout,
            data,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name every axis. The number of names must equal the rank.
    pub fn set_axis_names(&mut self, names: Vec<String>) -> Result<()> {
        if names.len() != self.rank() {
            return Err(NdArrayError::RankMismatch {
                expected: self.rank(),
                actual: names.len(),
            });
        }
        self.axis_names = names;
        Ok(())
    }

    /// Axis names, empty when never set.
    pub fn axis_names(&self) -> &[String] {
        &self.axis_names
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn rank(&self) -> usize {
        self.layout.rank()
    }

    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    pub fn strides(&self) -> &[usize] {
        self.layout.strides()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Flat offset of a location.
    pub fn offset(&self, location: &[usize]) -> Result<usize> {
        self.layout.offset(location)
    }

    /// Location of a flat offset.
    pub fn location(&self, flat: usize) -> Result<Vec<usize>> {
        self.layout.location(flat)
    }

    pub fn get(&self, location: &[usize]) -> Result<T> {
        Ok(self.data[self.layout.offset(location)?])
    }

    pub fn set(&mut self, location: &[usize], value: T) -> Result<()> {
        let off = self.layout.offset(location)?;
        self.data[off] = value;
        Ok(())
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Sum of every element, accumulated in `f64`.
    pub fn sum(&self) -> f64 {
        self.data.iter().map(|v| v.as_f64()).sum()
    }

    fn check_lane_values(&self, axis: usize, len: usize) -> Result<()> {
        let expected = self.shape()[axis];
        if len != expected {
            return Err(NdArrayError::LengthMismatch {
                axis,
                expected,
                actual: len,
            });
        }
        Ok(())
    }

    /// Values of the slice selected by a vector location.
    pub fn vector(&self, location: &[isize]) -> Result<Vec<T>> {
        let loc = VectorLocation::resolve(location, &self.layout)?;
        Ok(loc.offsets().map(|off| self.data[off]).collect())
    }

    /// Overwrite the slice selected by a vector location.
    pub fn set_vector(&mut self, location: &[isize], values: &[T]) -> Result<()> {
        let loc = VectorLocation::resolve(location, &self.layout)?;
        self.check_lane_values(loc.axis, values.len())?;
        for (off, &v) in loc.offsets().zip(values) {
            self.data[off] = v;
        }
        Ok(())
    }

    /// Sum of the slice selected by a vector location.
    pub fn vector_sum(&self, location: &[isize]) -> Result<f64> {
        let loc = VectorLocation::resolve(location, &self.layout)?;
        Ok(loc.offsets().map(|off| self.data[off].as_f64()).sum())
    }

    /// Apply `op` between one slice and `values`, element by element.
    pub fn operate_vector(&mut self, values: &[T], location: &[isize], op: ArrayOp) -> Result<()> {
        let loc = VectorLocation::resolve(location, &self.layout)?;
        self.check_lane_values(loc.axis, values.len())?;
        for (off, &v) in loc.offsets().zip(values) {
            self.data[off] = op.apply(self.data[off], v);
        }
        Ok(())
    }

    pub fn multiply_vector(&mut self, values: &[T], location: &[isize]) -> Result<()> {
        self.operate_vector(values, location, ArrayOp::Mul)
    }

    /// Marginal along `axis`, summed over every other axis in `f64`.
    pub fn collapse_to_vector_f64(&self, axis: usize) -> Result<Vec<f64>> {
        self.layout.check_axis(axis)?;
        let mut totals = vec![0.0; self.shape()[axis]];
        for lane in Lanes::new(&self.layout, axis) {
            for (t, off) in totals.iter_mut().zip(lane.offsets()) {
                *t += self.data[off].as_f64();
            }
        }
        Ok(totals)
    }

    /// Marginal along `axis` in the element precision.
    pub fn collapse_to_vector(&self, axis: usize) -> Result<Vec<T>> {
        Ok(self
            .collapse_to_vector_f64(axis)?
            .into_iter()
            .map(T::from_f64)
            .collect())
    }

    /// Rank `D-1` array of sums over `axis`.
    pub fn collapse_dimension(&self, axis: usize) -> Result<Self> {
        self.layout.check_axis(axis)?;
        if self.rank() == 1 {
            return Err(NdArrayError::CollapseRankOne);
        }
        // Lanes along `axis` come out in row-major order of the remaining axes.
        let data = Lanes::new(&self.layout, axis)
            .map(|lane| {
                let total: f64 = lane.offsets().map(|off| self.data[off].as_f64()).sum();
                T::from_f64(total)
            })
            .collect();
        let mut out = Self::from_vec(&self.layout.shape_without(axis), data)?;
        out.name = self.name.clone();
        if !self.axis_names.is_empty() {
            out.axis_names = self
                .axis_names
                .iter()
                .enumerate()
                .filter(|&(d, _)| d != axis)
                .map(|(_, n)| n.clone())
                .collect();
        }
        Ok(out)
    }

    /// Apply `op` with a scalar to every element.
    pub fn operate_scalar(&mut self, value: T, op: ArrayOp) {
        for v in &mut self.data {
            *v = op.apply(*v, value);
        }
    }

    pub fn multiply_scalar(&mut self, value: T) {
        self.operate_scalar(value, ArrayOp::Mul);
    }

    /// Broadcast `values` over every slice along `axis` and apply `op`.
    pub fn operate_along(&mut self, values: &[T], axis: usize, op: ArrayOp) -> Result<()> {
        self.layout.check_axis(axis)?;
        self.check_lane_values(axis, values.len())?;
        let Self { layout, data, .. } = self;
        for lane in Lanes::new(layout, axis) {
            for (off, &v) in lane.offsets().zip(values) {
                data[off] = op.apply(data[off], v);
            }
        }
        Ok(())
    }

    pub fn multiply_along(&mut self, values: &[T], axis: usize) -> Result<()> {
        self.operate_along(values, axis, ArrayOp::Mul)
    }

    /// Multiply by one factor vector per axis.
    pub fn multiply_factors(&mut self, factors: &[Vec<T>]) -> Result<()> {
        if factors.len() != self.rank() {
            return Err(NdArrayError::RankMismatch {
                expected: self.rank(),
                actual: factors.len(),
            });
        }
        for (axis, f) in factors.iter().enumerate() {
            self.multiply_along(f, axis)?;
        }
        Ok(())
    }

    /// Element-wise product with an array of the same shape.
    pub fn multiply_elementwise(&mut self, other: &Self) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(NdArrayError::ShapeMismatch {
                expected: self.shape().to_vec(),
                actual: other.shape().to_vec(),
            });
        }
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a = *a * b;
        }
        Ok(())
    }

    /// Copy in another precision.
    pub fn cast<U: Scalar>(&self) -> NdArray<U> {
        NdArray {
            name: self.name.clone(),
            axis_names: self.axis_names.clone(),
            layout: self.layout.clone(),
            data: self.data.iter().map(|v| U::from_f64(v.as_f64())).collect(),
        }
    }

    /// Element-wise map into a new array of the same shape.
    pub fn map<F: Fn(T) -> T>(&self, f: F) -> Self {
        let mut out = self.clone();
        for v in &mut out.data {
            *v = f(*v);
        }
        out
    }
}
