//! Single-group enumeration.
//!
//! [`GroupSolver`] walks every `k`-subset of the pool in lexicographic
//! order and runs each through the range filter, the coverage filter and
//! (for dependency groups) the consumption simulation. The cheap filters
//! run first so the simulation only sees survivors.

use std::ops::ControlFlow;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use super::budget::Budget;
use super::config::SolverConfig;
use super::types::{Evaluation, GroupResult, Rejection};
use crate::combination::subsets_of;
use crate::error::{ConfigError, SelectError};
use crate::model::{Entity, GroupRequirement, Pool, Selection};
use crate::simulate::ConsumptionSimulator;

/// Finds every valid selection for one group.
///
/// Construction validates the group against the pool, so evaluation never
/// meets a missing attribute.
///
/// # Examples
///
/// ```
/// use u_select::model::{Axis, Entity, GroupRequirement, Pool, Strategy};
/// use u_select::solver::{GroupSolver, SolverConfig};
///
/// let pool = Pool::new(vec![
///     Entity::new("A").with_attribute("t", 5.0),
///     Entity::new("B").with_attribute("t", 7.0),
///     Entity::new("C").with_attribute("t", 10.0),
/// ])
/// .unwrap();
/// let group = GroupRequirement::new("tank", 2, Strategy::average_traits(Vec::<String>::new()))
///     .with_axis(Axis::within("t", 5.0, 8.0));
///
/// let result = GroupSolver::new(&pool, &group, &SolverConfig::default())
///     .unwrap()
///     .solve()
///     .unwrap();
/// // mean of [A, B] is 6, of [A, C] 7.5, of [B, C] 8.5
/// assert_eq!(result.selections.len(), 2);
/// assert!(result.is_complete());
/// ```
#[derive(Debug, Clone)]
pub struct GroupSolver<'a> {
    pool: &'a Pool,
    group: &'a GroupRequirement,
    config: SolverConfig,
}

impl<'a> GroupSolver<'a> {
    /// Validates `group` against `pool` and the solver configuration.
    pub fn new(
        pool: &'a Pool,
        group: &'a GroupRequirement,
        config: &SolverConfig,
    ) -> Result<Self, SelectError> {
        config.validate().map_err(ConfigError::Solver)?;
        group.validate(pool)?;
        Ok(Self {
            pool,
            group,
            config: config.clone(),
        })
    }

    pub fn group(&self) -> &'a GroupRequirement {
        self.group
    }

    pub fn pool(&self) -> &'a Pool {
        self.pool
    }

    /// Runs one candidate through every check.
    ///
    /// `indices` are pool positions in ascending order; the selection lists
    /// members in that order.
    ///
    /// # Panics
    /// Panics if an index is out of bounds for the pool.
    pub fn evaluate(&self, indices: &[usize]) -> Result<Evaluation, SelectError> {
        debug_assert!(indices.windows(2).all(|w| w[0] < w[1]));
        let members: Vec<&Entity> = indices.iter().map(|&i| &self.pool[i]).collect();
        let strategy = &self.group.strategy;

        let readings = match strategy.range_filter().check(&members, &self.group.axes) {
            Ok(readings) => readings,
            Err(violation) => return Ok(Evaluation::Rejected(Rejection::Range(violation))),
        };
        if let Err(gap) = strategy.coverage_filter().check(&members) {
            return Ok(Evaluation::Rejected(Rejection::Coverage(gap)));
        }
        let feeding = match strategy.simulation() {
            Some(sim) => {
                let outcome = ConsumptionSimulator::new(sim).run(&self.group.name, &members)?;
                if !outcome.is_success() {
                    return Ok(Evaluation::Rejected(Rejection::Simulation(outcome)));
                }
                Some(outcome)
            }
            None => None,
        };

        Ok(Evaluation::Accepted(Selection {
            group: self.group.name.clone(),
            members: members.iter().map(|e| e.name.clone()).collect(),
            readings,
            feeding,
        }))
    }

    /// Evaluates a hand-picked selection given by entity names.
    ///
    /// Fails with a [`ConfigError`] if a name is unknown or the number of
    /// distinct names differs from the group size.
    pub fn check(&self, names: &[&str]) -> Result<Evaluation, SelectError> {
        let mut indices = names
            .iter()
            .map(|n| {
                self.pool
                    .position(n)
                    .ok_or_else(|| ConfigError::UnknownEntity(n.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        indices.sort_unstable();
        indices.dedup();
        if indices.len() != self.group.size {
            return Err(ConfigError::SelectionSize {
                group: self.group.name.clone(),
                expected: self.group.size,
                actual: indices.len(),
            }
            .into());
        }
        self.evaluate(&indices)
    }

    /// Enumerates every valid selection within the configured limits.
    pub fn solve(&self) -> Result<GroupResult, SelectError> {
        self.solve_with_cancel(None)
    }

    /// Like [`solve`](Self::solve), stopping early once `cancel` is set.
    pub fn solve_with_cancel(
        &self,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GroupResult, SelectError> {
        let budget = Budget::new(&self.config, cancel);
        self.solve_with_budget(&budget)
    }

    pub(crate) fn solve_with_budget(&self, budget: &Budget) -> Result<GroupResult, SelectError> {
        debug!(
            group = %self.group.name,
            size = self.group.size,
            pool = self.pool.len(),
            "solving group"
        );
        let all: Vec<usize> = (0..self.pool.len()).collect();

        #[cfg(feature = "parallel")]
        let selections = if self.config.parallel {
            self.collect_parallel(&all, budget)?
        } else {
            self.collect(&all, budget)?
        };
        #[cfg(not(feature = "parallel"))]
        let selections = self.collect(&all, budget)?;

        let termination = budget.termination();
        if !termination.is_complete() {
            warn!(
                group = %self.group.name,
                ?termination,
                found = selections.len(),
                "search stopped early"
            );
        }
        debug!(
            group = %self.group.name,
            found = selections.len(),
            evaluated = budget.evaluated(),
            "group solved"
        );
        Ok(GroupResult {
            group: self.group.name.clone(),
            selections,
            evaluated: budget.evaluated(),
            termination,
        })
    }

    fn collect(&self, available: &[usize], budget: &Budget) -> Result<Vec<Selection>, SelectError> {
        let mut out = Vec::new();
        let _flow = self.for_each_valid(available, budget, |_, selection| {
            if budget.admit() {
                out.push(selection);
            }
            Ok(match budget.stopped() {
                Some(_) => ControlFlow::Break(()),
                None => ControlFlow::Continue(()),
            })
        })?;
        Ok(out)
    }

    /// Evaluates batches on the rayon pool, keeping enumeration order.
    #[cfg(feature = "parallel")]
    fn collect_parallel(
        &self,
        available: &[usize],
        budget: &Budget,
    ) -> Result<Vec<Selection>, SelectError> {
        use rayon::prelude::*;

        let mut subsets = subsets_of(available, self.group.size);
        let mut out = Vec::new();
        while budget.stopped().is_none() {
            let batch: Vec<Vec<usize>> = subsets.by_ref().take(self.config.batch_size).collect();
            if batch.is_empty() {
                break;
            }
            let results: Vec<Result<Option<Selection>, SelectError>> = batch
                .par_iter()
                .map(|indices| {
                    if budget.tick().is_err() {
                        return Ok(None);
                    }
                    Ok(self.evaluate(indices)?.selection().cloned())
                })
                .collect();
            for result in results {
                if let Some(selection) = result? {
                    if budget.admit() {
                        out.push(selection);
                    }
                }
            }
        }
        Ok(out)
    }

    /// Visits every valid `k`-subset of `available` in lexicographic order.
    ///
    /// Returns `Break` if the visitor asked to stop or the budget ran out.
    pub(crate) fn for_each_valid<F>(
        &self,
        available: &[usize],
        budget: &Budget,
        mut visit: F,
    ) -> Result<ControlFlow<()>, SelectError>
    where
        F: FnMut(&[usize], Selection) -> Result<ControlFlow<()>, SelectError>,
    {
        for indices in subsets_of(available, self.group.size) {
            if budget.tick().is_err() {
                return Ok(ControlFlow::Break(()));
            }
            match self.evaluate(&indices)? {
                Evaluation::Accepted(selection) => {
                    if visit(&indices, selection)?.is_break() {
                        return Ok(ControlFlow::Break(()));
                    }
                }
                Evaluation::Rejected(reason) => {
                    trace!(group = %self.group.name, ?indices, %reason, "rejected");
                }
            }
        }
        Ok(ControlFlow::Continue(()))
    }
}
