//! Closure (termination) settings shared by both balancers.

use crate::error::{IpfError, Result};

/// When a balancing run stops.
///
/// At least one criterion must be set. An unset iteration cap is allowed but
/// logged as a warning since the run then only ends on convergence.
///
/// # Example
/// ```
/// use zonalfit_ipf::ClosureCriteria;
///
/// let closure = ClosureCriteria::builder()
///     .with_max_iterations(100)
///     .with_max_relative_error(1e-4)
///     .build()
///     .unwrap();
/// assert_eq!(closure.max_iterations, Some(100));
///
/// assert!(ClosureCriteria::builder().build().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClosureCriteria {
    /// Stop after this many iterations.
    pub max_iterations: Option<usize>,
    /// Stop once the relative error drops below this value.
    pub max_relative_error: Option<f64>,
    /// Stop once the absolute error drops below this value.
    pub max_absolute_error: Option<f64>,
}

impl ClosureCriteria {
    pub fn builder() -> ClosureCriteriaBuilder {
        ClosureCriteriaBuilder::default()
    }

    /// Iteration cap plus relative error, the usual pairing.
    pub fn new(max_iterations: usize, max_relative_error: f64) -> Self {
        Self {
            max_iterations: Some(max_iterations),
            max_relative_error: Some(max_relative_error),
            max_absolute_error: None,
        }
    }

    /// Whether any criterion is set.
    pub fn is_set(&self) -> bool {
        self.max_iterations.is_some()
            || self.max_relative_error.is_some()
            || self.max_absolute_error.is_some()
    }

    /// Relative-error threshold used when comparing target totals.
    pub fn total_tolerance(&self) -> f64 {
        self.max_relative_error.unwrap_or(0.0)
    }

    /// Check that at least one criterion is set and every value is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.is_set() {
            return Err(configuration("no closure criteria set"));
        }
        if self.max_iterations == Some(0) {
            return Err(configuration("maximum iterations must be positive"));
        }
        for (name, value) in [
            ("relative", self.max_relative_error),
            ("absolute", self.max_absolute_error),
        ] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(configuration(&format!(
                        "maximum {name} error must be a non-negative number, got {v}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Log the active settings at the start of a run.
    pub fn log_settings(&self) {
        match self.max_iterations {
            Some(n) => log::info!("maximum number of iterations set to {n}"),
            None => log::warn!("no maximum number of iterations set"),
        }
        if let Some(e) = self.max_relative_error {
            log::info!("maximum relative error set to {e}");
        }
        if let Some(e) = self.max_absolute_error {
            log::info!("maximum absolute error set to {e}");
        }
    }

    /// Whether a run has closed after `iteration` completed iterations.
    pub fn is_closed(&self, iteration: usize, relative_error: f64, absolute_error: f64) -> bool {
        if self.max_iterations.is_some_and(|max| iteration >= max) {
            log::info!("reached iteration maximum");
            return true;
        }
        if iteration == 0 {
            return false;
        }
        if self.max_relative_error.is_some_and(|max| relative_error < max) {
            log::info!("reached maximum relative error after {iteration} iterations");
            return true;
        }
        if self.max_absolute_error.is_some_and(|max| absolute_error < max) {
            log::info!("reached maximum absolute error after {iteration} iterations");
            return true;
        }
        false
    }
}

fn configuration(reason: &str) -> IpfError {
    log::error!("{reason}");
    IpfError::Configuration {
        reason: reason.to_string(),
    }
}

/// Builder for [`ClosureCriteria`].
#[derive(Debug, Clone, Default)]
pub struct ClosureCriteriaBuilder {
    inner: ClosureCriteria,
}

impl ClosureCriteriaBuilder {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.inner.max_iterations = Some(max_iterations);
        self
    }

    pub fn with_max_relative_error(mut self, max_relative_error: f64) -> Self {
        self.inner.max_relative_error = Some(max_relative_error);
        self
    }

    pub fn with_max_absolute_error(mut self, max_absolute_error: f64) -> Self {
        self.inner.max_absolute_error = Some(max_absolute_error);
        self
    }

    /// Build, rejecting an empty or invalid set of criteria.
    pub fn build(self) -> Result<ClosureCriteria> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}

/// `|x - y| / min(x, y)`, zero when both are zero.
pub fn relative_difference(x: f64, y: f64) -> f64 {
    if x == 0.0 && y == 0.0 {
        return 0.0;
    }
    (x - y).abs() / x.min(y)
}
