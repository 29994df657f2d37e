//! Search configuration.
//!
//! [`SolverConfig`] bounds the enumeration and controls parallelism.

/// Configuration shared by the group solver and the multi-group assigner.
///
/// Every limit is optional; with none set the search is exhaustive.
///
/// # Examples
///
/// ```
/// use u_select::solver::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_max_solutions(5)
///     .with_time_limit_ms(2_000);
/// assert_eq!(config.max_solutions, Some(5));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Maximum number of candidate subsets evaluated.
    ///
    /// Counts every candidate reaching the filters, across all groups of
    /// one exclusive search.
    pub max_evaluations: Option<u64>,

    /// Optional wall-clock limit in milliseconds, checked before every
    /// candidate.
    pub time_limit_ms: Option<u64>,

    /// Stop once this many selections (single group) or assignments
    /// (exclusive search) are found.
    pub max_solutions: Option<usize>,

    /// Candidates handed to the worker pool at once in parallel mode.
    ///
    /// Limits are re-checked between batches, so a stop may overrun by up
    /// to one batch of evaluations.
    pub batch_size: usize,

    /// Evaluate candidate batches and top-level branches with rayon.
    ///
    /// Has no effect unless the `parallel` feature is enabled.
    pub parallel: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_evaluations: None,
            time_limit_ms: None,
            max_solutions: None,
            batch_size: 256,
            parallel: false,
        }
    }
}

impl SolverConfig {
    pub fn with_max_evaluations(mut self, n: u64) -> Self {
        self.max_evaluations = Some(n);
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    pub fn with_max_solutions(mut self, n: usize) -> Self {
        self.max_solutions = Some(n);
        self
    }

    pub fn with_batch_size(mut self, n: usize) -> Self {
        self.batch_size = n;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("batch_size must be at least 1".into());
        }
        if self.max_solutions == Some(0) {
            return Err("max_solutions must be at least 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded() {
        let c = SolverConfig::default();
        assert!(c.max_evaluations.is_none());
        assert!(c.time_limit_ms.is_none());
        assert!(c.max_solutions.is_none());
        assert!(!c.parallel);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let c = SolverConfig::default()
            .with_max_evaluations(1_000)
            .with_batch_size(64)
            .with_parallel(true);
        assert_eq!(c.max_evaluations, Some(1_000));
        assert_eq!(c.batch_size, 64);
        assert!(c.parallel);
    }

    #[test]
    fn test_invalid_values() {
        assert!(SolverConfig::default().with_batch_size(0).validate().is_err());
        assert!(SolverConfig::default().with_max_solutions(0).validate().is_err());
    }
}
