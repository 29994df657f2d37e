//! Multi-group assignment.
//!
//! In reuse mode every group is solved on its own and may draw on the
//! whole pool. In exclusive mode a depth-first search picks one selection
//! per group, in group order, over the entities no earlier group holds.
//! The used set is a mask indexed by pool position that is restored after
//! each branch.

use std::collections::HashSet;
use std::ops::ControlFlow;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::budget::Budget;
use super::config::SolverConfig;
use super::group::GroupSolver;
use super::types::{AssignmentResult, Exclusivity, GroupResult, MultiGroupOutcome};
use crate::error::{ConfigError, SelectError};
use crate::model::{Assignment, GroupRequirement, Pool, Selection};

/// Solves several groups over one pool.
///
/// # Examples
///
/// ```
/// use u_select::model::{Axis, Entity, GroupRequirement, Pool, Strategy};
/// use u_select::solver::{MultiGroupAssigner, SolverConfig};
///
/// let pool = Pool::new(
///     ["A", "B", "C", "D"]
///         .iter()
///         .map(|n| Entity::new(*n).with_attribute("x", 1.0))
///         .collect(),
/// )
/// .unwrap();
/// let groups = vec![
///     GroupRequirement::new("left", 2, Strategy::average_traits(Vec::<String>::new()))
///         .with_axis(Axis::within("x", 0.0, 2.0)),
///     GroupRequirement::new("right", 2, Strategy::average_traits(Vec::<String>::new()))
///         .with_axis(Axis::within("x", 0.0, 2.0)),
/// ];
///
/// let assigner = MultiGroupAssigner::new(&pool, &groups, &SolverConfig::default()).unwrap();
/// let result = assigner.solve_exclusive().unwrap();
/// // every way to split four entities into two ordered pairs
/// assert_eq!(result.assignments.len(), 6);
/// assert!(result.assignments.iter().all(|a| a.is_exclusive()));
/// ```
#[derive(Debug)]
pub struct MultiGroupAssigner<'a> {
    pool: &'a Pool,
    solvers: Vec<GroupSolver<'a>>,
    config: SolverConfig,
    /// Members still needed by the groups from each depth onward.
    demand: Vec<usize>,
}

impl<'a> MultiGroupAssigner<'a> {
    /// Validates every group and rejects duplicate group names.
    pub fn new(
        pool: &'a Pool,
        groups: &'a [GroupRequirement],
        config: &SolverConfig,
    ) -> Result<Self, SelectError> {
        let mut seen = HashSet::new();
        for group in groups {
            if !seen.insert(group.name.as_str()) {
                return Err(ConfigError::DuplicateGroup(group.name.clone()).into());
            }
        }
        let solvers = groups
            .iter()
            .map(|g| GroupSolver::new(pool, g, config))
            .collect::<Result<Vec<_>, _>>()?;

        let mut demand = vec![0; groups.len() + 1];
        for (i, group) in groups.iter().enumerate().rev() {
            demand[i] = demand[i + 1] + group.size;
        }

        Ok(Self {
            pool,
            solvers,
            config: config.clone(),
            demand,
        })
    }

    pub fn groups(&self) -> impl Iterator<Item = &'a GroupRequirement> + '_ {
        self.solvers.iter().map(|s| s.group())
    }

    /// Dispatches on `mode`.
    pub fn solve(&self, mode: Exclusivity) -> Result<MultiGroupOutcome, SelectError> {
        match mode {
            Exclusivity::Reuse => Ok(MultiGroupOutcome::Independent {
                groups: self.solve_independent()?,
            }),
            Exclusivity::Exclusive => Ok(MultiGroupOutcome::Exclusive(self.solve_exclusive()?)),
        }
    }

    /// Solves each group over the whole pool, one result per group in
    /// group order. Each group gets its own budget.
    pub fn solve_independent(&self) -> Result<Vec<GroupResult>, SelectError> {
        self.solve_independent_with_cancel(None)
    }

    pub fn solve_independent_with_cancel(
        &self,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<Vec<GroupResult>, SelectError> {
        info!(groups = self.solvers.len(), "solving groups independently");

        #[cfg(feature = "parallel")]
        if self.config.parallel {
            use rayon::prelude::*;
            return self
                .solvers
                .par_iter()
                .map(|s| s.solve_with_budget(&Budget::new(&self.config, cancel.clone())))
                .collect();
        }

        self.solvers
            .iter()
            .map(|s| s.solve_with_budget(&Budget::new(&self.config, cancel.clone())))
            .collect()
    }

    /// Finds every assignment where no entity serves two groups.
    pub fn solve_exclusive(&self) -> Result<AssignmentResult, SelectError> {
        self.solve_exclusive_with_cancel(None)
    }

    /// Like [`solve_exclusive`](Self::solve_exclusive), stopping early once
    /// `cancel` is set. Limits apply to the search as a whole.
    pub fn solve_exclusive_with_cancel(
        &self,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<AssignmentResult, SelectError> {
        info!(
            groups = self.solvers.len(),
            pool = self.pool.len(),
            demand = self.demand[0],
            "solving groups exclusively"
        );
        let budget = Budget::new(&self.config, cancel);
        let mut assignments = Vec::new();

        if self.demand[0] > self.pool.len() {
            debug!("groups need more entities than the pool holds");
        } else if self.solvers.is_empty() {
            if budget.admit() {
                assignments.push(Assignment::default());
            }
        } else {
            assignments = self.search_all(&budget)?;
        }

        let termination = budget.termination();
        if !termination.is_complete() {
            warn!(?termination, found = assignments.len(), "exclusive search stopped early");
        }
        debug!(
            found = assignments.len(),
            evaluated = budget.evaluated(),
            "exclusive search done"
        );
        Ok(AssignmentResult {
            assignments,
            evaluated: budget.evaluated(),
            termination,
        })
    }

    fn search_all(&self, budget: &Budget) -> Result<Vec<Assignment>, SelectError> {
        #[cfg(feature = "parallel")]
        if self.config.parallel {
            return self.search_parallel(budget);
        }

        let mut used = vec![false; self.pool.len()];
        let mut chosen = Vec::with_capacity(self.solvers.len());
        let mut out = Vec::new();
        // a break is already latched in the budget
        let _flow = self.search(0, &mut used, &mut chosen, budget, &mut out)?;
        Ok(out)
    }

    fn search(
        &self,
        depth: usize,
        used: &mut [bool],
        chosen: &mut Vec<Selection>,
        budget: &Budget,
        out: &mut Vec<Assignment>,
    ) -> Result<ControlFlow<()>, SelectError> {
        if depth == self.solvers.len() {
            if budget.admit() {
                out.push(Assignment {
                    selections: chosen.clone(),
                });
            }
            return Ok(match budget.stopped() {
                Some(_) => ControlFlow::Break(()),
                None => ControlFlow::Continue(()),
            });
        }

        let available: Vec<usize> = (0..used.len()).filter(|&i| !used[i]).collect();
        if available.len() < self.demand[depth] {
            return Ok(ControlFlow::Continue(()));
        }

        self.solvers[depth].for_each_valid(&available, budget, |indices, selection| {
            for &i in indices {
                used[i] = true;
            }
            chosen.push(selection);
            let flow = self.search(depth + 1, used, chosen, budget, out);
            chosen.pop();
            for &i in indices {
                used[i] = false;
            }
            flow
        })
    }

    /// Splits the search on the first group's candidates; each branch runs
    /// on its own mask and results are merged in enumeration order.
    #[cfg(feature = "parallel")]
    fn search_parallel(&self, budget: &Budget) -> Result<Vec<Assignment>, SelectError> {
        use rayon::prelude::*;

        let all: Vec<usize> = (0..self.pool.len()).collect();
        let mut roots = Vec::new();
        let _flow = self.solvers[0].for_each_valid(&all, budget, |indices, selection| {
            roots.push((indices.to_vec(), selection));
            Ok(ControlFlow::Continue(()))
        })?;
        debug!(branches = roots.len(), "exclusive search split");

        let branches: Vec<Result<Vec<Assignment>, SelectError>> = roots
            .into_par_iter()
            .map(|(indices, selection)| {
                let mut used = vec![false; self.pool.len()];
                for &i in &indices {
                    used[i] = true;
                }
                let mut chosen = vec![selection];
                let mut out = Vec::new();
                let _flow = self.search(1, &mut used, &mut chosen, budget, &mut out)?;
                Ok(out)
            })
            .collect();

        let mut assignments = Vec::new();
        for branch in branches {
            assignments.extend(branch?);
        }
        Ok(assignments)
    }
}
