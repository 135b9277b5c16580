//! Row-major shape and stride bookkeeping.

use crate::error::{NdArrayError, Result};

/// Row-major strides: `strides[D-1] == 1`, `strides[d] == strides[d+1] * shape[d+1]`.
pub fn compute_strides(shape: &[usize]) -> Vec<usize> {
    if shape.is_empty() {
        return vec![];
    }
    let mut strides = vec![1; shape.len()];
    for i in (0..shape.len() - 1).rev() {
        strides[i] = strides[i + 1] * shape[i + 1];
    }
    strides
}

/// Shape, strides and total length of a dense row-major array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    shape: Vec<usize>,
    strides: Vec<usize>,
    len: usize,
}

impl Layout {
    pub fn new(shape: &[usize]) -> Result<Self> {
        if shape.is_empty() {
            return Err(NdArrayError::EmptyShape);
        }
        Ok(Self {
            shape: shape.to_vec(),
            strides: compute_strides(shape),
            len: shape.iter().product(),
        })
    }

    #[inline]
    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn check_axis(&self, axis: usize) -> Result<()> {
        if axis >= self.rank() {
            return Err(NdArrayError::AxisOutOfRange {
                axis,
                rank: self.rank(),
            });
        }
        Ok(())
    }

    /// Flat offset `Σ location[d] * strides[d]`, with rank and range checks.
    pub fn offset(&self, location: &[usize]) -> Result<usize> {
        if location.len() != self.rank() {
            return Err(NdArrayError::RankMismatch {
                expected: self.rank(),
                actual: location.len(),
            });
        }
        let mut flat = 0;
        for (axis, ((&index, &extent), &stride)) in location
            .iter()
            .zip(&self.shape)
            .zip(&self.strides)
            .enumerate()
        {
            if index >= extent {
                return Err(NdArrayError::IndexOutOfBounds {
                    axis,
                    index,
                    extent,
                });
            }
            flat += index * stride;
        }
        Ok(flat)
    }

    /// Inverse of [`offset`](Self::offset).
    pub fn location(&self, flat: usize) -> Result<Vec<usize>> {
        if flat >= self.len {
            return Err(NdArrayError::FlatIndexOutOfBounds {
                index: flat,
                len: self.len,
            });
        }
        let mut remaining = flat;
        let location = self
            .strides
            .iter()
            .map(|&stride| {
                let index = remaining / stride;
                remaining %= stride;
                index
            })
            .collect();
        Ok(location)
    }

    /// Shape with one axis removed.
    pub fn shape_without(&self, axis: usize) -> Vec<usize> {
        self.shape
            .iter()
            .enumerate()
            .filter(|&(d, _)| d != axis)
            .map(|(_, &n)| n)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strides_row_major() {
        assert_eq!(compute_strides(&[2, 3, 4]), vec![12, 4, 1]);
        assert_eq!(compute_strides(&[5]), vec![1]);
    }

    #[test]
    fn test_offset_checks() {
        let layout = Layout::new(&[2, 3]).unwrap();
        assert_eq!(layout.offset(&[1, 2]).unwrap(), 5);
        assert!(matches!(
            layout.offset(&[1]),
            Err(NdArrayError::RankMismatch {
                expected: 2,
                actual: 1
            })
        ));
        assert!(matches!(
            layout.offset(&[2, 0]),
            Err(NdArrayError::IndexOutOfBounds { axis: 0, .. })
        ));
    }

    #[test]
    fn test_location_inverse() {
        let layout = Layout::new(&[2, 3, 4]).unwrap();
        assert_eq!(layout.location(23).unwrap(), vec![1, 2, 3]);
        assert_eq!(layout.location(5).unwrap(), vec![0, 1, 1]);
        assert!(layout.location(24).is_err());
    }

    #[test]
    fn test_empty_shape_rejected() {
        assert_eq!(Layout::new(&[]), Err(NdArrayError::EmptyShape));
    }
}
