//! Solver outputs: selections and assignments.

use super::entity::Range;
use crate::simulate::SimulationOutcome;

/// What a range filter measured on one axis of an accepted selection.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisReading {
    /// Common window of all members (and the group target).
    Window { axis: String, window: Range },
    /// Arithmetic mean over the members.
    Mean { axis: String, mean: f64 },
}

impl AxisReading {
    pub fn axis(&self) -> &str {
        match self {
            AxisReading::Window { axis, .. } | AxisReading::Mean { axis, .. } => axis,
        }
    }
}

/// A valid set of `k` distinct entities for one group.
///
/// Members are listed in pool order. Identity is the group name plus the
/// member names; readings and the feeding trace are explanatory.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selection {
    pub group: String,
    pub members: Vec<String>,
    pub readings: Vec<AxisReading>,
    /// Present for groups that run the consumption simulation.
    pub feeding: Option<SimulationOutcome>,
}

impl Selection {
    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether the two selections share no member.
    pub fn is_disjoint(&self, other: &Selection) -> bool {
        !self.members.iter().any(|m| other.contains(m))
    }

    pub fn reading(&self, axis: &str) -> Option<&AxisReading> {
        self.readings.iter().find(|r| r.axis() == axis)
    }
}

impl PartialEq for Selection {
    fn eq(&self, other: &Self) -> bool {
        self.group == other.group && self.members == other.members
    }
}

impl Eq for Selection {}

/// One selection per group, in group order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub selections: Vec<Selection>,
}

impl Assignment {
    pub fn get(&self, group: &str) -> Option<&Selection> {
        self.selections.iter().find(|s| s.group == group)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Selection> {
        self.selections.iter()
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// No entity appears in two selections.
    pub fn is_exclusive(&self) -> bool {
        self.selections.iter().enumerate().all(|(i, a)| {
            self.selections[i + 1..].iter().all(|b| a.is_disjoint(b))
        })
    }
}
