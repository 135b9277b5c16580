//! Iteration over every 1-D slice of an array along one axis.
//!
//! The walk is an odometer over the other axes, advanced with the stride
//! table, so it works for any rank without recursion.

use crate::layout::Layout;

/// One 1-D slice: `len` elements starting at `base`, `stride` apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lane {
    pub base: usize,
    pub stride: usize,
    pub len: usize,
}

impl Lane {
    /// Flat offsets of the slice elements in axis order.
    pub fn offsets(self) -> impl Iterator<Item = usize> {
        (0..self.len).map(move |i| self.base + i * self.stride)
    }
}

/// Iterator over all lanes along `axis`, in row-major order of the other axes.
///
/// # Example
/// ```
/// use zonalfit_ndarray::{Lanes, Layout};
///
/// let layout = Layout::new(&[2, 3]).unwrap();
/// let bases: Vec<usize> = Lanes::new(&layout, 0).map(|lane| lane.base).collect();
/// assert_eq!(bases, vec![0, 1, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct Lanes<'a> {
    layout: &'a Layout,
    axis: usize,
    counter: Vec<usize>,
    base: usize,
    remaining: usize,
}

impl<'a> Lanes<'a> {
    /// Lanes along `axis`. The axis must be valid for `layout`.
    pub fn new(layout: &'a Layout, axis: usize) -> Self {
        let remaining = layout
            .shape()
            .iter()
            .enumerate()
            .filter(|&(d, _)| d != axis)
            .map(|(_, &n)| n)
            .product();
        Self {
            layout,
            axis,
            counter: vec![0; layout.rank()],
            base: 0,
            remaining,
        }
    }

    fn advance(&mut self) {
        let shape = self.layout.shape();
        let strides = self.layout.strides();
        for d in (0..shape.len()).rev() {
            if d == self.axis {
                continue;
            }
            self.counter[d] += 1;
            self.base += strides[d];
            if self.counter[d] < shape[d] {
                return;
            }
            self.base -= self.counter[d] * strides[d];
            self.counter[d] = 0;
        }
    }
}

impl Iterator for Lanes<'_> {
    type Item = Lane;

    fn next(&mut self) -> Option<Lane> {
        if self.remaining == 0 {
            return None;
        }
        let lane = Lane {
            base: self.base,
            stride: self.layout.strides()[self.axis],
            len: self.layout.shape()[self.axis],
        };
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance();
        }
        Some(lane)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Lanes<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lanes_cover_every_cell_once() {
        let layout = Layout::new(&[2, 3, 4]).unwrap();
        for axis in 0..3 {
            let mut seen = vec![0usize; layout.len()];
            for lane in Lanes::new(&layout, axis) {
                assert_eq!(lane.len, layout.shape()[axis]);
                for off in lane.offsets() {
                    seen[off] += 1;
                }
            }
            assert!(seen.iter().all(|&n| n == 1), "axis {axis}");
        }
    }

    #[test]
    fn test_lane_bases_middle_axis() {
        let layout = Layout::new(&[2, 3, 2]).unwrap();
        let bases: Vec<usize> = Lanes::new(&layout, 1).map(|l| l.base).collect();
        assert_eq!(bases, vec![0, 1, 6, 7]);
    }

    #[test]
    fn test_rank_one_single_lane() {
        let layout = Layout::new(&[5]).unwrap();
        let lanes: Vec<Lane> = Lanes::new(&layout, 0).collect();
        assert_eq!(
            lanes,
            vec![Lane {
                base: 0,
                stride: 1,
                len: 5
            }]
        );
    }
}
