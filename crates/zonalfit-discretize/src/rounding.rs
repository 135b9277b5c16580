//! Controlled rounding.
//!
//! Every cell keeps its integer part (truncated toward zero). The fractional
//! remainders are then rounded up one cell at a time, best score first,
//! where a cell's score is its remainder times the product of the remainder
//! marginals through it. Selecting a cell consumes one unit of each marginal
//! it lies on; once a marginal is exhausted, every still-available cell of
//! that hyperplane is closed. When the ordered list runs out before the
//! required number of round-ups is reached, the closed cell with the largest
//! sum of remaining marginals is forced instead.
//!
//! The fallback scan is linear in the number of cells, so heavily
//! constrained inputs cost quadratic time.

use std::cmp::Ordering;

use zonalfit_matrix::Scalar;
use zonalfit_ndarray::{Layout, NdArray};

use crate::error::{DiscretizeError, Result};

/// Marginal value at or below which a hyperplane counts as exhausted.
pub const DEFAULT_EXHAUSTED_TOLERANCE: f64 = 1e-6;

/// Options for [`discretize`].
#[derive(Debug, Clone, PartialEq)]
pub struct ControlledRoundingOptions {
    pub exhausted_tolerance: f64,
}

impl Default for ControlledRoundingOptions {
    fn default() -> Self {
        Self {
            exhausted_tolerance: DEFAULT_EXHAUSTED_TOLERANCE,
        }
    }
}

/// Outcome of a controlled rounding.
#[derive(Debug, Clone)]
pub struct Discretized<T: Scalar = f64> {
    /// Integer-valued array of the input's shape.
    pub array: NdArray<T>,
    /// Sum of the truncated integer parts.
    pub integer_part_total: f64,
    /// Round-ups requested: the total fractional mass rounded to nearest.
    pub required_round_ups: usize,
    /// Round-ups performed.
    pub round_ups: usize,
    /// Round-ups that came from the fallback search.
    pub fallback_selections: usize,
}

impl<T: Scalar> Discretized<T> {
    /// `integer_part_total + round_ups`, the sum of [`array`](Self::array).
    pub fn integer_total(&self) -> f64 {
        self.integer_part_total + self.round_ups as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    /// Remainder is not positive; never selected.
    Excluded,
    Available,
    Selected,
    /// Closed by an exhausted marginal; fallback candidate.
    Unavailable,
}

/// Round `array` to integers while keeping its marginals as close as the
/// structure allows.
///
/// # Example
/// ```
/// use zonalfit_discretize::{discretize, ControlledRoundingOptions};
/// use zonalfit_ndarray::NdArray;
///
/// let a = NdArray::<f64>::from_vec(&[2, 2], vec![1.3, 0.7, 0.4, 1.6]).unwrap();
/// let out = discretize(a.clone(), &ControlledRoundingOptions::default()).unwrap();
/// assert_eq!(out.integer_total(), 4.0);
/// for (x, y) in a.as_slice().iter().zip(out.array.as_slice()) {
///     assert!(y.fract() == 0.0 && (y - x).abs() < 1.0);
/// }
/// ```
pub fn discretize<T: Scalar>(
    array: NdArray<T>,
    options: &ControlledRoundingOptions,
) -> Result<Discretized<T>> {
    let tolerance = options.exhausted_tolerance;
    if !tolerance.is_finite() || tolerance < 0.0 {
        return Err(DiscretizeError::InvalidOption {
            reason: format!("exhausted tolerance must be a non-negative number, got {tolerance}"),
        });
    }

    let layout = array.layout().clone();
    let mut integer = Vec::with_capacity(array.len());
    let mut fraction = Vec::with_capacity(array.len());
    let mut cells = Vec::with_capacity(array.len());
    for (index, v) in array.as_slice().iter().enumerate() {
        let value = v.as_f64();
        if !value.is_finite() {
            return Err(DiscretizeError::NonFiniteValue { index, value });
        }
        let whole = value.trunc();
        let frac = value - whole;
        integer.push(whole);
        if frac > 0.0 {
            fraction.push(frac);
            cells.push(Cell::Available);
        } else {
            fraction.push(0.0);
            cells.push(Cell::Excluded);
        }
    }

    let remainders = NdArray::from_vec(layout.shape(), fraction)?;
    let mut marginals: Vec<Vec<f64>> = (0..layout.rank())
        .map(|axis| remainders.collapse_to_vector_f64(axis))
        .collect::<std::result::Result<_, _>>()?;
    let fraction = remainders.into_vec();

    let order = score_order(&layout, &fraction, &marginals)?;
    let total_fraction: f64 = fraction.iter().sum();
    let required = (total_fraction + 0.5).floor().max(0.0) as usize;
    log::debug!("controlled rounding: fractional mass {total_fraction}, {required} round-ups");

    let mut cursor = order.iter();
    let mut round_ups = 0;
    let mut fallback_selections = 0;
    while round_ups < required {
        let next = cursor.by_ref().copied().find(|&i| cells[i] == Cell::Available);
        let index = match next {
            Some(i) => i,
            None => match fallback_cell(&layout, &cells, &marginals)? {
                Some(i) => {
                    fallback_selections += 1;
                    log::debug!("ordered cells exhausted, forcing cell {i}");
                    i
                }
                None => {
                    log::warn!(
                        "controlled rounding placed {round_ups} of {required} round-ups, no candidate cells left"
                    );
                    break;
                }
            },
        };
        select(&layout, index, &mut cells, &mut marginals, tolerance)?;
        round_ups += 1;
    }

    let data: Vec<T> = integer
        .iter()
        .zip(&cells)
        .map(|(&whole, &cell)| {
            let up = if cell == Cell::Selected { 1.0 } else { 0.0 };
            T::from_f64(whole + up)
        })
        .collect();
    let integer_part_total = integer.iter().sum();

    let mut out = NdArray::from_vec(layout.shape(), data)?;
    if !array.name().is_empty() {
        out = out.with_name(array.name());
    }
    if !array.axis_names().is_empty() {
        out.set_axis_names(array.axis_names().to_vec())?;
    }

    Ok(Discretized {
        array: out,
        integer_part_total,
        required_round_ups: required,
        round_ups,
        fallback_selections,
    })
}

/// Flat indices sorted by score, descending; ties keep index order.
fn score_order(layout: &Layout, fraction: &[f64], marginals: &[Vec<f64>]) -> Result<Vec<usize>> {
    let mut scores = Vec::with_capacity(fraction.len());
    for (i, &frac) in fraction.iter().enumerate() {
        let location = layout.location(i)?;
        let product: f64 = location
            .iter()
            .zip(marginals)
            .map(|(&c, m)| m[c])
            .product();
        scores.push(frac * product);
    }
    let mut order: Vec<usize> = (0..fraction.len()).collect();
    order.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));
    Ok(order)
}

/// Closed cell with the largest sum of remaining marginals; ties go to the
/// lowest flat index.
fn fallback_cell(layout: &Layout, cells: &[Cell], marginals: &[Vec<f64>]) -> Result<Option<usize>> {
    let mut best: Option<(usize, f64)> = None;
    for (i, _) in cells
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c == Cell::Unavailable)
    {
        let location = layout.location(i)?;
        let sum: f64 = location.iter().zip(marginals).map(|(&c, m)| m[c]).sum();
        if best.map_or(true, |(_, s)| sum > s) {
            best = Some((i, sum));
        }
    }
    Ok(best.map(|(i, _)| i))
}

/// Select a cell, consume its marginals and close exhausted hyperplanes.
fn select(
    layout: &Layout,
    index: usize,
    cells: &mut [Cell],
    marginals: &mut [Vec<f64>],
    tolerance: f64,
) -> Result<()> {
    cells[index] = Cell::Selected;
    let location = layout.location(index)?;
    for (axis, &coord) in location.iter().enumerate() {
        marginals[axis][coord] -= 1.0;
        if marginals[axis][coord] <= tolerance {
            close_hyperplane(layout, axis, coord, cells);
        }
    }
    Ok(())
}

/// Mark every available cell with `location[axis] == coord` unavailable.
fn close_hyperplane(layout: &Layout, axis: usize, coord: usize, cells: &mut [Cell]) {
    let run = layout.strides()[axis];
    let repeat = layout.shape()[axis] * run;
    for block in (0..layout.len()).step_by(repeat) {
        let start = block + coord * run;
        for cell in &mut cells[start..start + run] {
            if *cell == Cell::Available {
                *cell = Cell::Unavailable;
            }
        }
    }
}

/// Setter-style front end to [`discretize`].
#[derive(Debug, Clone, Default)]
pub struct ControlledRounding {
    options: ControlledRoundingOptions,
}

impl ControlledRounding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exhausted_tolerance(mut self, tolerance: f64) -> Self {
        self.options.exhausted_tolerance = tolerance;
        self
    }

    pub fn options(&self) -> &ControlledRoundingOptions {
        &self.options
    }

    /// Round `array`, consuming the rounder.
    pub fn discretize<T: Scalar>(self, array: NdArray<T>) -> Result<Discretized<T>> {
        discretize(array, &self.options)
    }
}
