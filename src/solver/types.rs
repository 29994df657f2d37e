//! Solver result types.

use super::budget::Termination;
use crate::error::SelectError;
use crate::filter::{AxisViolation, CoverageGap};
use crate::model::{Assignment, Selection};
use crate::simulate::SimulationOutcome;

/// Why a candidate subset was turned down.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    Range(AxisViolation),
    Coverage(CoverageGap),
    /// The consumption simulation did not end in survival.
    Simulation(SimulationOutcome),
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Range(v) => write!(f, "{v}"),
            Rejection::Coverage(g) => write!(f, "{g}"),
            Rejection::Simulation(o) => write!(f, "{}", o.verdict),
        }
    }
}

/// Verdict on a single candidate subset.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Accepted(Selection),
    Rejected(Rejection),
}

impl Evaluation {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Evaluation::Accepted(_))
    }

    pub fn selection(&self) -> Option<&Selection> {
        match self {
            Evaluation::Accepted(s) => Some(s),
            Evaluation::Rejected(_) => None,
        }
    }
}

/// All selections found for one group.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupResult {
    pub group: String,
    /// Valid selections in enumeration order.
    pub selections: Vec<Selection>,
    /// Candidates examined.
    pub evaluated: u64,
    pub termination: Termination,
}

impl GroupResult {
    pub fn is_complete(&self) -> bool {
        self.termination.is_complete()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// The selections, or [`SelectError::ResourceExhausted`] if the search
    /// stopped early.
    pub fn into_complete(self) -> Result<Vec<Selection>, SelectError> {
        if self.is_complete() {
            Ok(self.selections)
        } else {
            Err(SelectError::ResourceExhausted {
                termination: self.termination,
                evaluated: self.evaluated,
                found: self.selections.len(),
            })
        }
    }
}

/// All assignments found by an exclusive search.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentResult {
    /// Each assignment holds one selection per group, in group order.
    pub assignments: Vec<Assignment>,
    pub evaluated: u64,
    pub termination: Termination,
}

impl AssignmentResult {
    pub fn is_complete(&self) -> bool {
        self.termination.is_complete()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn into_complete(self) -> Result<Vec<Assignment>, SelectError> {
        if self.is_complete() {
            Ok(self.assignments)
        } else {
            Err(SelectError::ResourceExhausted {
                termination: self.termination,
                evaluated: self.evaluated,
                found: self.assignments.len(),
            })
        }
    }
}

/// Whether an entity may serve more than one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Exclusivity {
    /// Groups are solved independently.
    #[default]
    Reuse,
    /// No entity appears in two groups of one assignment.
    Exclusive,
}

impl From<bool> for Exclusivity {
    fn from(exclusive: bool) -> Self {
        if exclusive {
            Exclusivity::Exclusive
        } else {
            Exclusivity::Reuse
        }
    }
}

/// Result of [`MultiGroupAssigner::solve`](super::MultiGroupAssigner::solve).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "snake_case"))]
pub enum MultiGroupOutcome {
    /// One result per group, in group order.
    Independent { groups: Vec<GroupResult> },
    Exclusive(AssignmentResult),
}

impl MultiGroupOutcome {
    pub fn is_complete(&self) -> bool {
        match self {
            MultiGroupOutcome::Independent { groups } => groups.iter().all(GroupResult::is_complete),
            MultiGroupOutcome::Exclusive(r) => r.is_complete(),
        }
    }

    /// Whether nothing at all was found.
    ///
    /// In reuse mode this means every group came back empty.
    pub fn is_empty(&self) -> bool {
        match self {
            MultiGroupOutcome::Independent { groups } => groups.iter().all(GroupResult::is_empty),
            MultiGroupOutcome::Exclusive(r) => r.is_empty(),
        }
    }

    pub fn evaluated(&self) -> u64 {
        match self {
            MultiGroupOutcome::Independent { groups } => groups.iter().map(|g| g.evaluated).sum(),
            MultiGroupOutcome::Exclusive(r) => r.evaluated,
        }
    }
}
