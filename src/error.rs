//! Error types.
//!
//! Malformed input is reported as a [`ConfigError`] before any enumeration
//! starts. An empty result is never an error.

use thiserror::Error;

use crate::solver::Termination;

/// Malformed problem definition.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid range on `{axis}` for `{owner}`: min {min} > max {max}")]
    InvalidRange {
        owner: String,
        axis: String,
        min: f64,
        max: f64,
    },

    #[error("group `{group}`: size {size} is invalid for a pool of {pool_size}")]
    InvalidSize {
        group: String,
        size: usize,
        pool_size: usize,
    },

    #[error("group `{group}`: entity `{entity}` has no attribute `{attribute}`")]
    MissingAttribute {
        group: String,
        entity: String,
        attribute: String,
    },

    #[error("group `{group}`: attribute `{attribute}` of `{entity}` must be a scalar")]
    ExpectedScalar {
        group: String,
        entity: String,
        attribute: String,
    },

    #[error("group `{group}`: axis `{axis}` needs a target range for averaging")]
    MissingTarget { group: String, axis: String },

    #[error("entity `{entity}` depends on `{link}`, which is not in the pool")]
    UnknownLink { entity: String, link: String },

    #[error("duplicate entity name `{0}`")]
    DuplicateEntity(String),

    #[error("duplicate group name `{0}`")]
    DuplicateGroup(String),

    #[error("unknown entity `{0}`")]
    UnknownEntity(String),

    #[error("group `{group}` expects {expected} members, got {actual}")]
    SelectionSize {
        group: String,
        expected: usize,
        actual: usize,
    },

    #[error("invalid solver configuration: {0}")]
    Solver(String),
}

/// Errors raised by the solvers.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SelectError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The simulator met equally good food sources under [`TieBreak::Reject`].
    ///
    /// [`TieBreak::Reject`]: crate::simulate::TieBreak::Reject
    #[error("group `{group}`: `{consumer}` has tied food sources {candidates:?}")]
    Ambiguity {
        group: String,
        consumer: String,
        candidates: Vec<String>,
    },

    /// A search stopped before it was exhaustive.
    #[error("search stopped ({termination:?}) after {evaluated} evaluations with {found} results")]
    ResourceExhausted {
        termination: Termination,
        evaluated: u64,
        found: usize,
    },
}

impl SelectError {
    /// Whether this error comes from malformed input.
    pub fn is_config(&self) -> bool {
        matches!(self, SelectError::Config(_))
    }
}
