//! Constrained subset selection.
//!
//! Picks groups of `k` entities from a pool so that every group satisfies
//! its compatibility rules:
//!
//! - **Range compatibility**: members' ranges share a common window on
//!   every axis, or members' values average inside a target range.
//! - **Coverage**: every consumer finds one of its dependencies among the
//!   members, or the members' traits cover a required set.
//! - **Consumption simulation**: consumers eat from their dependencies in
//!   a fixed order, and every consumer must be fed without eating a
//!   supplier down to zero.
//! - **Multi-group assignment**: groups are solved independently, or
//!   exclusively so that no entity serves two groups.
//!
//! The search is exhaustive: candidates are enumerated in lexicographic
//! order and every valid one is reported, subject to optional evaluation,
//! time and solution limits.
//!
//! # Modules
//!
//! - [`model`]: entities, pools, group requirements, selections
//! - [`combination`]: lexicographic `k`-subset enumeration
//! - [`filter`]: range and coverage checks
//! - [`simulate`]: ordered consumption simulation
//! - [`solver`]: group solver, multi-group assigner, budgets
//! - [`scenario`]: problem files and built-in scenarios
//!
//! # Example
//!
//! ```
//! use u_select::scenario;
//! use u_select::solver::{GroupSolver, SolverConfig};
//!
//! let (pool, groups) = scenario::reef().build().unwrap();
//! let solver = GroupSolver::new(&pool, &groups[0], &SolverConfig::default()).unwrap();
//! let result = solver.solve().unwrap();
//! assert_eq!(result.selections.len(), 21);
//! ```

pub mod combination;
pub mod error;
pub mod filter;
pub mod model;
pub mod scenario;
pub mod simulate;
pub mod solver;

pub use error::{ConfigError, SelectError};
