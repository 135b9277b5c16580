//! Balance a seed array to its axis targets, then round it to integers.

use zonalfit_discretize::{discretize, ControlledRoundingOptions, DiscretizeError, Discretized};
use zonalfit_ipf::{balance_array, ArrayBalance, ArrayBalanceOptions};
use zonalfit_matrix::Scalar;
use zonalfit_ndarray::NdArray;

use crate::error::Result;

/// Options for [`fit_integer_table`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntegerTableOptions {
    pub balance: ArrayBalanceOptions,
    pub rounding: ControlledRoundingOptions,
}

/// Both stages of [`fit_integer_table`].
#[derive(Debug, Clone)]
pub struct IntegerTable<T: Scalar = f64> {
    /// Real-valued balance, including factors and rescaled targets.
    pub balanced: ArrayBalance<T>,
    /// Integer table rounded from `balanced.array`.
    pub rounded: Discretized<T>,
}

impl<T: Scalar> IntegerTable<T> {
    /// Largest absolute gap between a rounded marginal and its target.
    pub fn max_marginal_deviation(&self) -> Result<f64> {
        let mut worst = 0.0f64;
        for (axis, targets) in self.balanced.targets.iter().enumerate() {
            let achieved = self
                .rounded
                .array
                .collapse_to_vector_f64(axis)
                .map_err(DiscretizeError::from)?;
            for (t, a) in targets.iter().zip(&achieved) {
                worst = worst.max((t - a).abs());
            }
        }
        Ok(worst)
    }
}

/// Balance `seed` to one target vector per axis and round the result.
pub fn fit_integer_table<T: Scalar>(
    seed: NdArray<T>,
    targets: Vec<Vec<f64>>,
    options: &IntegerTableOptions,
) -> Result<IntegerTable<T>> {
    let balanced = balance_array(seed, targets, &options.balance)?;
    let rounded = discretize(balanced.array.clone(), &options.rounding)?;
    log::info!(
        "integer table: {} iterations, {} round-ups ({} forced)",
        balanced.iterations,
        rounded.round_ups,
        rounded.fallback_selections
    );
    Ok(IntegerTable { balanced, rounded })
}
