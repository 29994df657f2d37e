//! Simulation outcome types.

use std::collections::BTreeMap;

/// One bite: `eater` took `amount` from `source`, which held `before`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeedEvent {
    pub eater: String,
    pub source: String,
    pub amount: f64,
    pub before: f64,
}

impl FeedEvent {
    pub fn after(&self) -> f64 {
        self.before - self.amount
    }
}

impl std::fmt::Display for FeedEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} eats {}: {} - {} = {}",
            self.eater,
            self.source,
            self.before,
            self.amount,
            self.after()
        )
    }
}

/// Final state of a simulation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    /// Every consumer fed and every member kept a positive remainder.
    Survived,
    /// `consumer` could not cover its need; `shortfall` is what was missing.
    Starved { consumer: String, shortfall: f64 },
    /// Everyone fed, but these members were eaten down to zero or below.
    Depleted { entities: Vec<String> },
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Survived => write!(f, "all survive"),
            Verdict::Starved { consumer, shortfall } => {
                write!(f, "{consumer} starves (short {shortfall})")
            }
            Verdict::Depleted { entities } => {
                write!(f, "consumed to 0: {}", entities.join(", "))
            }
        }
    }
}

/// Result of one simulation run.
///
/// Built fresh for every candidate; the pool values it started from are
/// never modified.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationOutcome {
    pub verdict: Verdict,
    /// Bites in the order they happened.
    pub events: Vec<FeedEvent>,
    /// Remaining provided value per member when the run stopped.
    pub remaining: BTreeMap<String, f64>,
}

impl SimulationOutcome {
    pub fn is_success(&self) -> bool {
        self.verdict == Verdict::Survived
    }
}
