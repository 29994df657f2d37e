//! Exhaustive search.
//!
//! [`GroupSolver`] enumerates one group; [`MultiGroupAssigner`] combines
//! groups, either independently or with no entity shared between groups.
//! Both share [`SolverConfig`] limits and report how the search ended
//! through [`Termination`].
//!
//! # Key Types
//!
//! - [`Evaluation`] / [`Rejection`]: the verdict on one candidate
//! - [`GroupResult`]: selections of one group
//! - [`AssignmentResult`]: assignments of an exclusive search
//! - [`Budget`]: evaluation, time and solution limits plus cancellation
//!
//! # Parallelism
//!
//! With the `parallel` feature and [`SolverConfig::parallel`] set, candidate
//! batches (single group) or first-group branches (exclusive search) run on
//! the rayon pool. Results come back in enumeration order.

mod assign;
mod budget;
mod config;
mod group;
mod types;

pub use assign::MultiGroupAssigner;
pub use budget::{Budget, Termination};
pub use config::SolverConfig;
pub use group::GroupSolver;
pub use types::{
    AssignmentResult, Evaluation, Exclusivity, GroupResult, MultiGroupOutcome, Rejection,
};
