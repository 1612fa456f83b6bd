//! Configuration of the correction pipeline.

use crate::labelgtc::error::LabelGtcError;
use crate::solver::CostModel;

/// Default support threshold above which an internal vertex is trusted
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// Default bound on the number of solutions requested from the engine
pub const DEFAULT_MAX_SOLUTIONS: usize = 1000;

/// Configuration of [LabelGtc](crate::labelgtc::LabelGtc).
///
/// # Configuration
/// * `with_threshold(threshold)` - Support threshold in `[0, 1]`; an internal
///   vertex is trusted iff its support is at least the threshold. Inherited
///   unchanged by all sub-instances.
/// * `with_costs(costs)` - Duplication and loss weights handed to the engine
/// * `with_max_solutions(n)` - Maximal number of resolutions requested from
///   the engine (at least 1)
///
/// # Example
/// ```
/// use labelgtc::labelgtc::LabelGtcConfig;
/// use labelgtc::solver::CostModel;
///
/// let config = LabelGtcConfig::new()
///     .with_threshold(0.6)
///     .with_costs(CostModel::new(2.0, 1.0));
/// assert!(config.validate().is_ok());
/// assert!(LabelGtcConfig::new().with_threshold(1.5).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelGtcConfig {
    threshold: f64,
    costs: CostModel,
    max_solutions: usize,
}

impl LabelGtcConfig {
    /// Creates a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the support threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the duplication and loss weights.
    pub fn with_costs(mut self, costs: CostModel) -> Self {
        self.costs = costs;
        self
    }

    /// Sets the maximal number of solutions requested from the engine.
    pub fn with_max_solutions(mut self, max_solutions: usize) -> Self {
        self.max_solutions = max_solutions;
        self
    }

    /// Returns the support threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns the duplication and loss weights.
    pub fn costs(&self) -> &CostModel {
        &self.costs
    }

    /// Returns the maximal number of solutions requested from the engine.
    pub fn max_solutions(&self) -> usize {
        self.max_solutions
    }

    /// Checks that all values are in range.
    ///
    /// # Errors
    /// [LabelGtcError::InvalidConfig] if the threshold is outside `[0, 1]`,
    /// a cost is negative or not finite, or no solution is requested.
    pub fn validate(&self) -> Result<(), LabelGtcError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(LabelGtcError::InvalidConfig(format!(
                "threshold must be in [0, 1], got {}",
                self.threshold
            )));
        }
        for (what, cost) in [
            ("duplication", self.costs.duplication),
            ("loss", self.costs.loss),
        ] {
            if !(cost.is_finite() && cost >= 0.0) {
                return Err(LabelGtcError::InvalidConfig(format!(
                    "{} cost must be non-negative, got {}",
                    what, cost
                )));
            }
        }
        if self.max_solutions == 0 {
            return Err(LabelGtcError::InvalidConfig(
                "max_solutions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LabelGtcConfig {
    fn default() -> Self {
        LabelGtcConfig {
            threshold: DEFAULT_THRESHOLD,
            costs: CostModel::default(),
            max_solutions: DEFAULT_MAX_SOLUTIONS,
        }
    }
}
