//! Two-dimensional IPF on a [`ZoneMatrix`].
//!
//! Each iteration scales every row to its target, then every column, then
//! measures the worst row deviation. Target totals that disagree are handled
//! by a [`TargetReconciliation`] policy; rows or columns whose seed sums to
//! zero under a non-zero target are handled by a [`ZeroSeedPolicy`].

use zonalfit_matrix::{Axis, Scalar, ZoneMatrix, ZoneVector};

use crate::closure::{relative_difference, ClosureCriteria};
use crate::error::{IpfError, Result};

/// Seed value written into zero-sum rows and columns by the repair policy.
pub const DEFAULT_REPAIR_EPSILON: f64 = 0.001;

/// What to do when row and column target totals disagree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TargetReconciliation {
    /// Fail with [`IpfError::TargetTotalsMismatch`].
    #[default]
    Strict,
    /// Scale the row targets to the column total.
    ScaleRowTargets,
    /// Scale the column targets to the row total.
    ScaleColumnTargets,
    /// Scale both to the average of the two totals.
    ScaleToAverage,
}

/// What to do with a zero-sum seed row or column whose target is non-zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZeroSeedPolicy {
    /// Fail with [`IpfError::InfeasibleTarget`].
    Fail,
    /// Before each row and column pass, set every cell of such a row or
    /// column to `epsilon`.
    Repair { epsilon: f64 },
}

impl ZeroSeedPolicy {
    /// Check that a repair epsilon is a finite positive number.
    pub fn validate(&self) -> Result<()> {
        match *self {
            ZeroSeedPolicy::Repair { epsilon } if !(epsilon.is_finite() && epsilon > 0.0) => {
                let reason =
                    format!("zero-seed repair epsilon must be finite and positive, got {epsilon}");
                log::error!("{reason}");
                Err(IpfError::Configuration { reason })
            }
            _ => Ok(()),
        }
    }
}

impl Default for ZeroSeedPolicy {
    fn default() -> Self {
        ZeroSeedPolicy::Repair {
            epsilon: DEFAULT_REPAIR_EPSILON,
        }
    }
}

/// Options for [`balance_matrix`].
///
/// The default closure is unset and must be configured before balancing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatrixBalanceOptions {
    pub closure: ClosureCriteria,
    pub reconciliation: TargetReconciliation,
    pub zero_seed: ZeroSeedPolicy,
}

/// Outcome of a 2-D balance.
#[derive(Debug, Clone)]
pub struct MatrixBalance<T: Scalar = f32> {
    /// The balanced matrix.
    pub matrix: ZoneMatrix<T>,
    /// Number of completed iterations.
    pub iterations: usize,
    /// Worst row relative error after the last iteration.
    pub relative_error: f64,
    /// Worst row absolute error after the last iteration.
    pub absolute_error: f64,
    /// Row targets after reconciliation.
    pub row_targets: ZoneVector<T>,
    /// Column targets after reconciliation.
    pub column_targets: ZoneVector<T>,
    /// Number of cells overwritten by the zero-seed repair.
    pub repaired_cells: usize,
}

/// Balance `seed` to the row and column targets.
///
/// The target vectors must use the seed's row and column numbering.
///
/// # Example
/// ```
/// use zonalfit_ipf::{balance_matrix, ClosureCriteria, MatrixBalanceOptions};
/// use zonalfit_matrix::{ZoneMatrix, ZoneVector};
///
/// let seed = ZoneMatrix::<f64>::from_vec2d(vec![vec![1.0; 2]; 2]).unwrap();
/// let rows = ZoneVector::sequential(vec![3.0, 7.0]);
/// let cols = ZoneVector::sequential(vec![5.0, 5.0]);
/// let options = MatrixBalanceOptions {
///     closure: ClosureCriteria::new(50, 1e-6),
///     ..Default::default()
/// };
///
/// let out = balance_matrix(seed, rows, cols, &options).unwrap();
/// assert!((out.matrix.row_sum(2).unwrap() - 7.0).abs() < 1e-9);
/// ```
pub fn balance_matrix<T: Scalar>(
    seed: ZoneMatrix<T>,
    row_targets: ZoneVector<T>,
    column_targets: ZoneVector<T>,
    options: &MatrixBalanceOptions,
) -> Result<MatrixBalance<T>> {
    let closure = options.closure;
    closure.validate()?;
    options.zero_seed.validate()?;

    if row_targets.numbering() != seed.row_numbering() {
        return Err(dimension_mismatch("row targets", Axis::Row));
    }
    if column_targets.numbering() != seed.column_numbering() {
        return Err(dimension_mismatch("column targets", Axis::Column));
    }

    log::info!(
        "balancing {}x{} matrix '{}' by iterative proportional fitting",
        seed.nrows(),
        seed.ncols(),
        seed.name()
    );
    closure.log_settings();

    let (row_targets, column_targets) = reconcile_targets(
        row_targets,
        column_targets,
        closure.total_tolerance(),
        options.reconciliation,
    )?;
    let rows = row_targets.to_f64_vec();
    let cols = column_targets.to_f64_vec();

    let mut matrix = seed;
    let mut iteration = 0;
    let mut relative_error = 0.0;
    let mut absolute_error = 0.0;
    let mut repaired_cells = 0;

    while !closure.is_closed(iteration, relative_error, absolute_error) {
        iteration += 1;

        if let ZeroSeedPolicy::Repair { epsilon } = options.zero_seed {
            repaired_cells += repair_zero_seeds(&mut matrix, &rows, &cols, epsilon);
        }
        scale_rows(&mut matrix, &rows)?;

        if let ZeroSeedPolicy::Repair { epsilon } = options.zero_seed {
            repaired_cells += repair_zero_seeds(&mut matrix, &rows, &cols, epsilon);
        }
        scale_columns(&mut matrix, &cols)?;

        (relative_error, absolute_error) = row_errors(&matrix, &rows);
        log::debug!(
            "iteration {iteration}: relative error {relative_error:e}, absolute error {absolute_error:e}"
        );
    }

    log::info!(
        "closed after {iteration} iterations, relative error {relative_error:.1e}, absolute error {absolute_error:.1e}"
    );

    Ok(MatrixBalance {
        matrix,
        iterations: iteration,
        relative_error,
        absolute_error,
        row_targets,
        column_targets,
        repaired_cells,
    })
}

fn dimension_mismatch(what: &str, axis: Axis) -> IpfError {
    let reason = format!("{what} must use the seed's {axis} numbering");
    log::error!("{reason}");
    IpfError::DimensionMismatch { reason }
}

fn reconcile_targets<T: Scalar>(
    mut rows: ZoneVector<T>,
    mut cols: ZoneVector<T>,
    tolerance: f64,
    policy: TargetReconciliation,
) -> Result<(ZoneVector<T>, ZoneVector<T>)> {
    let row_total = rows.sum();
    let col_total = cols.sum();
    if relative_difference(row_total, col_total) <= tolerance {
        return Ok((rows, cols));
    }

    let mismatch = || {
        log::error!(
            "row targets sum ({row_total}) does not match column targets sum ({col_total})"
        );
        IpfError::TargetTotalsMismatch {
            expected: row_total,
            actual: col_total,
        }
    };

    match policy {
        TargetReconciliation::Strict => return Err(mismatch()),
        TargetReconciliation::ScaleRowTargets => {
            if row_total == 0.0 {
                return Err(mismatch());
            }
            rows.scale(col_total / row_total);
            log::info!("scaled row targets from {row_total} to {col_total}");
        }
        TargetReconciliation::ScaleColumnTargets => {
            if col_total == 0.0 {
                return Err(mismatch());
            }
            cols.scale(row_total / col_total);
            log::info!("scaled column targets from {col_total} to {row_total}");
        }
        TargetReconciliation::ScaleToAverage => {
            if row_total == 0.0 || col_total == 0.0 {
                return Err(mismatch());
            }
            let average = 0.5 * (row_total + col_total);
            rows.scale(average / row_total);
            cols.scale(average / col_total);
            log::info!("scaled row and column targets to their average {average}");
        }
    }
    Ok((rows, cols))
}

/// Set every cell of a zero-sum row or column with a non-zero target to `epsilon`.
fn repair_zero_seeds<T: Scalar>(
    matrix: &mut ZoneMatrix<T>,
    rows: &[f64],
    cols: &[f64],
    epsilon: f64,
) -> usize {
    let column_sums = matrix.column_totals_f64();
    let adjust_row: Vec<bool> = (0..matrix.nrows())
        .map(|r| matrix.row_sum_f64(r) == 0.0 && rows[r] != 0.0)
        .collect();
    let adjust_col: Vec<bool> = column_sums
        .iter()
        .zip(cols)
        .map(|(&sum, &target)| sum == 0.0 && target != 0.0)
        .collect();

    for (r, _) in adjust_row.iter().enumerate().filter(|&(_, &a)| a) {
        log::warn!(
            "target for row {} is non-zero but seed values are 0, seed values set to {epsilon}",
            matrix.external_row_number(r).unwrap_or_default()
        );
    }
    for (c, _) in adjust_col.iter().enumerate().filter(|&(_, &a)| a) {
        log::warn!(
            "target for column {} is non-zero but seed values are 0, seed values set to {epsilon}",
            matrix.external_column_number(c).unwrap_or_default()
        );
    }

    let value = T::from_f64(epsilon);
    let mut repaired = 0;
    for (r, &row_flag) in adjust_row.iter().enumerate() {
        for (c, &col_flag) in adjust_col.iter().enumerate() {
            if row_flag || col_flag {
                matrix[[r, c]] = value;
                repaired += 1;
            }
        }
    }
    repaired
}

/// Scaling factor for a line summing to `sum` with target `target`.
///
/// Returns `None` when the line sums to zero but the target does not.
fn line_factor<T: Scalar>(sum: f64, target: f64) -> Option<f64> {
    if sum == 0.0 {
        return (target == 0.0).then_some(0.0);
    }
    let factor = target / sum;
    if factor.is_nan() {
        log::debug!("NaN scaling factor ({target} / {sum}) replaced by 1");
        return Some(1.0);
    }
    if T::from_f64(factor).is_infinite() {
        log::debug!("infinite scaling factor ({target} / {sum}) replaced by a large finite value");
        return Some(T::large_finite());
    }
    Some(factor)
}

fn scale_rows<T: Scalar>(matrix: &mut ZoneMatrix<T>, targets: &[f64]) -> Result<()> {
    for (r, &target) in targets.iter().enumerate() {
        let sum = matrix.row_sum_f64(r);
        let zone = matrix.external_row_number(r).unwrap_or_default();
        let factor = line_factor::<T>(sum, target).ok_or_else(|| {
            log::error!("row {zone}: seed row adds to 0 but target is {target}");
            IpfError::InfeasibleTarget {
                axis: Axis::Row,
                zone,
                target,
            }
        })?;
        log::debug!("scaling factor for row {zone}: {factor}");
        for v in matrix.row_slice_mut(r) {
            *v = T::from_f64(v.as_f64() * factor);
        }
    }
    Ok(())
}

fn scale_columns<T: Scalar>(matrix: &mut ZoneMatrix<T>, targets: &[f64]) -> Result<()> {
    let sums = matrix.column_totals_f64();
    let mut factors = Vec::with_capacity(targets.len());
    for (c, (&sum, &target)) in sums.iter().zip(targets).enumerate() {
        let zone = matrix.external_column_number(c).unwrap_or_default();
        let factor = line_factor::<T>(sum, target).ok_or_else(|| {
            log::error!("column {zone}: seed column adds to 0 but target is {target}");
            IpfError::InfeasibleTarget {
                axis: Axis::Column,
                zone,
                target,
            }
        })?;
        log::debug!("scaling factor for column {zone}: {factor}");
        factors.push(factor);
    }
    for r in 0..matrix.nrows() {
        for (v, &factor) in matrix.row_slice_mut(r).iter_mut().zip(&factors) {
            *v = T::from_f64(v.as_f64() * factor);
        }
    }
    Ok(())
}

/// Worst relative and absolute deviation of row sums from their targets.
///
/// A NaN deviation on any row makes the corresponding result NaN.
fn row_errors<T: Scalar>(matrix: &ZoneMatrix<T>, targets: &[f64]) -> (f64, f64) {
    let mut relative = 0.0f64;
    let mut absolute = 0.0f64;
    for (r, &target) in targets.iter().enumerate() {
        let achieved = matrix.row_sum_f64(r);
        let rel = relative_difference(target, achieved);
        log::debug!(
            "relative error on row {}: {rel}",
            matrix.external_row_number(r).unwrap_or_default()
        );
        relative = worst(relative, rel);
        absolute = worst(absolute, (target - achieved).abs());
    }
    (relative, absolute)
}

fn worst(current: f64, candidate: f64) -> f64 {
    if current.is_nan() || candidate.is_nan() {
        f64::NAN
    } else {
        current.max(candidate)
    }
}

/// Setter-style front end to [`balance_matrix`].
///
/// # Example
/// ```
/// use zonalfit_ipf::{MatrixBalancer, TargetReconciliation};
/// use zonalfit_matrix::{ZoneMatrix, ZoneVector};
///
/// let seed = ZoneMatrix::<f32>::from_vec2d(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
/// let out = MatrixBalancer::new()
///     .with_max_iterations(100)
///     .with_max_relative_error(1e-5)
///     .with_reconciliation(TargetReconciliation::ScaleColumnTargets)
///     .balance(
///         seed,
///         ZoneVector::sequential(vec![10.0, 10.0]),
///         ZoneVector::sequential(vec![4.0, 6.0]),
///     )
///     .unwrap();
/// assert!((out.matrix.sum() - 20.0).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MatrixBalancer {
    options: MatrixBalanceOptions,
}

impl MatrixBalancer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_options(options: MatrixBalanceOptions) -> Self {
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

    pub fn with_max_absolute_error(mut self, max_absolute_error: f64) -> Self {
        self.options.closure.max_absolute_error = Some(max_absolute_error);
        self
    }

    pub fn with_reconciliation(mut self, reconciliation: TargetReconciliation) -> Self {
        self.options.reconciliation = reconciliation;
        self
    }

    pub fn with_zero_seed_policy(mut self, zero_seed: ZeroSeedPolicy) -> Self {
        self.options.zero_seed = zero_seed;
        self
    }

    pub fn options(&self) -> &MatrixBalanceOptions {
        &self.options
    }

    /// Run the balance, consuming the balancer.
    pub fn balance<T: Scalar>(
        self,
        seed: ZoneMatrix<T>,
        row_targets: ZoneVector<T>,
        column_targets: ZoneVector<T>,
    ) -> Result<MatrixBalance<T>> {
        balance_matrix(seed, row_targets, column_targets, &self.options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_line_factor_guards() {
        assert_eq!(line_factor::<f64>(0.0, 0.0), Some(0.0));
        assert_eq!(line_factor::<f64>(0.0, 5.0), None);
        assert_eq!(line_factor::<f64>(2.0, 5.0), Some(2.5));
        assert_eq!(line_factor::<f32>(1e-300, 1e10), Some(<f32 as Scalar>::large_finite()));
        assert_eq!(line_factor::<f64>(f64::INFINITY, f64::INFINITY), Some(1.0));
    }

    #[test]
    fn test_reconcile_policies() {
        let rows = || ZoneVector::<f64>::sequential(vec![4.0, 6.0]);
        let cols = || ZoneVector::<f64>::sequential(vec![10.0, 10.0]);

        assert!(matches!(
            reconcile_targets(rows(), cols(), 0.0, TargetReconciliation::Strict),
            Err(IpfError::TargetTotalsMismatch { .. })
        ));

        let (r, c) =
            reconcile_targets(rows(), cols(), 0.0, TargetReconciliation::ScaleRowTargets).unwrap();
        assert_relative_eq!(r.sum(), 20.0);
        assert_relative_eq!(c.sum(), 20.0);

        let (r, c) =
            reconcile_targets(rows(), cols(), 0.0, TargetReconciliation::ScaleColumnTargets)
                .unwrap();
        assert_relative_eq!(r.sum(), 10.0);
        assert_eq!(c.values(), &[5.0, 5.0]);

        let (r, c) =
            reconcile_targets(rows(), cols(), 0.0, TargetReconciliation::ScaleToAverage).unwrap();
        assert_relative_eq!(r.sum(), 15.0);
        assert_relative_eq!(c.sum(), 15.0);

        // within tolerance nothing changes, even under Strict
        let (r, _) = reconcile_targets(rows(), cols(), 1.5, TargetReconciliation::Strict).unwrap();
        assert_eq!(r.values(), &[4.0, 6.0]);
    }

    #[test]
    fn test_repair_marks_row_and_column_cells() {
        let mut m = ZoneMatrix::<f64>::from_vec2d(vec![
            vec![0.0, 0.0, 0.0],
            vec![1.0, 0.0, 2.0],
            vec![3.0, 0.0, 4.0],
        ])
        .unwrap();
        let repaired = repair_zero_seeds(&mut m, &[5.0, 3.0, 7.0], &[4.0, 2.0, 9.0], 0.001);
        // row 0 (3 cells) plus column 1 outside row 0 (2 cells)
        assert_eq!(repaired, 5);
        assert_eq!(m[[0, 2]], 0.001);
        assert_eq!(m[[2, 1]], 0.001);
        assert_eq!(m[[2, 2]], 4.0);
    }

    #[test]
    fn test_repair_epsilon_validated() {
        assert!(ZeroSeedPolicy::default().validate().is_ok());
        assert!(ZeroSeedPolicy::Fail.validate().is_ok());
        for epsilon in [f64::NAN, f64::INFINITY, 0.0, -0.5] {
            assert!(matches!(
                ZeroSeedPolicy::Repair { epsilon }.validate(),
                Err(IpfError::Configuration { .. })
            ));
        }
    }

    #[test]
    fn test_row_errors_keep_nan() {
        let m = ZoneMatrix::<f64>::from_vec2d(vec![vec![f64::NAN, 1.0], vec![2.0, 3.0]]).unwrap();
        let (relative, absolute) = row_errors(&m, &[4.0, 5.0]);
        assert!(relative.is_nan());
        assert!(absolute.is_nan());

        let m = ZoneMatrix::<f64>::from_vec2d(vec![vec![1.0, 1.0], vec![2.0, 3.0]]).unwrap();
        let (relative, absolute) = row_errors(&m, &[4.0, 5.0]);
        assert_relative_eq!(relative, 1.0);
        assert_relative_eq!(absolute, 2.0);
    }
}
