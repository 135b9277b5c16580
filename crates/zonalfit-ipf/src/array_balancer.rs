//! N-dimensional IPF on an [`NdArray`].
//!
//! One factor vector is kept per axis. Each iteration visits the axes in
//! order: the seed is multiplied by every other axis's factors and by a
//! 0/1 mask of this axis's positive targets, collapsed onto the axis, and
//! the axis factors are reset to `target / achieved`. The run stops when the
//! largest relative factor change across all axes is below the tolerance,
//! repeats the previous iteration's value exactly, or the iteration cap is
//! hit.
//!
//! Unlike the 2-D balancer, disagreeing target totals are always repaired:
//! every axis is rescaled to the total of axis 0. The one exception is an
//! axis whose targets sum to zero while axis 0's do not: it cannot be
//! rescaled and fails with [`IpfError::TargetTotalsMismatch`].

use zonalfit_matrix::Scalar;
use zonalfit_ndarray::NdArray;

use crate::closure::{relative_difference, ClosureCriteria};
use crate::error::{IpfError, Result};

/// Targets at or below this value are treated as zero.
pub const POSITIVE_TARGET: f64 = 1e-8;

/// Options for [`balance_array`].
#[derive(Debug, Clone, PartialEq)]
pub struct ArrayBalanceOptions {
    /// Iteration cap and relative factor-change tolerance. An absolute error
    /// is not supported here.
    pub closure: ClosureCriteria,
    /// Log every factor update at info level.
    pub trace: bool,
}

impl Default for ArrayBalanceOptions {
    fn default() -> Self {
        Self {
            closure: ClosureCriteria::new(50, 1e-3),
            trace: false,
        }
    }
}

/// Outcome of an N-D balance.
#[derive(Debug, Clone)]
pub struct ArrayBalance<T: Scalar = f64> {
    /// Seed multiplied by the final factors.
    pub array: NdArray<T>,
    /// Number of completed iterations.
    pub iterations: usize,
    /// Largest relative factor change in the last iteration.
    pub max_factor_change: f64,
    /// Final factor vector per axis.
    pub factors: Vec<Vec<f64>>,
    /// Targets per axis after rescaling to the total of axis 0.
    pub targets: Vec<Vec<f64>>,
}

/// Balance `seed` to one target vector per axis.
///
/// # Example
/// ```
/// use zonalfit_ipf::{balance_array, ArrayBalanceOptions};
/// use zonalfit_ndarray::NdArray;
///
/// let seed = NdArray::<f64>::filled(&[2, 3, 2], 1.0).unwrap();
/// let targets = vec![
///     vec![4.0, 8.0],
///     vec![2.0, 4.0, 6.0],
///     vec![6.0, 6.0],
/// ];
/// let out = balance_array(seed, targets, &ArrayBalanceOptions::default()).unwrap();
/// let m = out.array.collapse_to_vector_f64(1).unwrap();
/// assert!((m[2] - 6.0).abs() < 1e-6);
/// ```
pub fn balance_array<T: Scalar>(
    seed: NdArray<T>,
    targets: Vec<Vec<f64>>,
    options: &ArrayBalanceOptions,
) -> Result<ArrayBalance<T>> {
    let closure = options.closure;
    closure.validate()?;
    if closure.max_absolute_error.is_some() {
        let reason = "absolute error closure is not supported for N-dimensional balancing";
        log::error!("{reason}");
        return Err(IpfError::Configuration {
            reason: reason.to_string(),
        });
    }
    check_targets(&seed, &targets)?;

    log::info!(
        "balancing array '{}' of shape {:?} by iterative proportional fitting",
        seed.name(),
        seed.shape()
    );
    closure.log_settings();

    let targets = rescale_targets(targets, closure.total_tolerance())?;
    let work: NdArray<f64> = seed.cast();
    let rank = work.rank();

    let mut factors: Vec<Vec<f64>> = targets
        .iter()
        .map(|t| t.iter().map(|&v| positive_mask(v)).collect())
        .collect();

    let mut iterations = 0;
    let mut max_change = 0.0;
    let mut previous: Option<f64> = None;

    while closure.max_iterations.map_or(true, |max| iterations < max) {
        if options.trace {
            log::info!("----- iteration {iterations} -----");
        }
        let mut axis_changes = vec![0.0f64; rank];

        for axis in 0..rank {
            let mut weights = factors.clone();
            weights[axis] = targets[axis].iter().map(|&v| positive_mask(v)).collect();

            let mut scaled = work.clone();
            scaled.multiply_factors(&weights)?;
            let totals = scaled.collapse_to_vector_f64(axis)?;

            for (i, (&target, &total)) in targets[axis].iter().zip(&totals).enumerate() {
                let last = factors[axis][i];
                if total > 0.0 && target > 0.0 {
                    let factor = target / total;
                    factors[axis][i] = factor;
                    axis_changes[axis] = axis_changes[axis].max(((factor - last) / factor).abs());
                }
                if options.trace {
                    log::info!(
                        "axis {axis} element {i} last={last} target={target} total={total} factor={} change={}",
                        factors[axis][i],
                        axis_changes[axis]
                    );
                }
            }
        }

        iterations += 1;
        max_change = axis_changes.iter().copied().fold(0.0, f64::max);
        if options.trace {
            log::info!("iteration {iterations}: max factor change {max_change:e}");
        } else {
            log::debug!("iteration {iterations}: max factor change {max_change:e}");
        }

        if closure.max_relative_error.is_some_and(|tol| max_change < tol) {
            log::info!("converged after {iterations} iterations, max factor change {max_change:.1e}");
            break;
        }
        if previous == Some(max_change) {
            log::info!("factor change stalled at {max_change:e} after {iterations} iterations");
            break;
        }
        previous = Some(max_change);
    }

    let mut balanced = work;
    balanced.multiply_factors(&factors)?;

    Ok(ArrayBalance {
        array: balanced.cast(),
        iterations,
        max_factor_change: max_change,
        factors,
        targets,
    })
}

fn positive_mask(target: f64) -> f64 {
    if target > POSITIVE_TARGET {
        1.0
    } else {
        0.0
    }
}

fn check_targets<T: Scalar>(seed: &NdArray<T>, targets: &[Vec<f64>]) -> Result<()> {
    let reason = if targets.len() != seed.rank() {
        format!(
            "{} target vectors given for a rank-{} seed",
            targets.len(),
            seed.rank()
        )
    } else if let Some((axis, t)) = targets
        .iter()
        .enumerate()
        .find(|(axis, t)| t.len() != seed.shape()[*axis])
    {
        format!(
            "target for axis {axis} has length {}, seed extent is {}",
            t.len(),
            seed.shape()[axis]
        )
    } else {
        return Ok(());
    };
    log::error!("{reason}");
    Err(IpfError::DimensionMismatch { reason })
}

/// Rescale every axis whose total differs from axis 0's.
fn rescale_targets(mut targets: Vec<Vec<f64>>, tolerance: f64) -> Result<Vec<Vec<f64>>> {
    let reference: f64 = targets.first().map_or(0.0, |t| t.iter().sum());
    for (axis, t) in targets.iter_mut().enumerate().skip(1) {
        let total: f64 = t.iter().sum();
        if relative_difference(total, reference) <= tolerance {
            continue;
        }
        if total == 0.0 {
            log::error!("targets for axis {axis} sum to zero, cannot rescale to {reference}");
            return Err(IpfError::TargetTotalsMismatch {
                expected: reference,
                actual: total,
            });
        }
        log::info!("sum of targets for axis {axis} ({total}) differs from axis 0 ({reference}), rescaling");
        let ratio = reference / total;
        for v in t.iter_mut() {
            *v *= ratio;
        }
    }
    Ok(targets)
}

/// Setter-style front end to [`balance_array`].
#[derive(Debug, Clone, Default)]
pub struct ArrayBalancer {
    options: ArrayBalanceOptions,
}

impl ArrayBalancer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: ArrayBalanceOptions) -> Self {
        Self { options }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.options.closure.max_iterations = Some(max_iterations);
        self
    }

    pub fn with_max_relative_error(mut self, max_relative_error: f64) -> Self {
        self.options.closure.max_relative_error = Some(max_relative_error);
        self
    }

    pub fn with_trace(mut self, trace: bool) -> Self {
        self.options.trace = trace;
        self
    }

    pub fn options(&self) -> &ArrayBalanceOptions {
        &self.options
    }

    /// Run the balance, consuming the balancer.
    pub fn balance<T: Scalar>(
        self,
        seed: NdArray<T>,
        targets: Vec<Vec<f64>>,
    ) -> Result<ArrayBalance<T>> {
        balance_array(seed, targets, &self.options)
    }
}
