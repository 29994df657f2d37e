//! Consumption simulation configuration.

/// How a consumer draws its need from its sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FeedingRule {
    /// The best source must cover the whole need on its own.
    #[default]
    SingleSource,
    /// Sources are eaten in rank order until the need is covered.
    Split,
}

/// Order among live sources holding the same remaining value.
///
/// Sources are always ranked by remaining value first, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TieBreak {
    /// Smallest name first.
    #[default]
    ByName,
    /// Earliest in the consumer's link list first.
    LinkOrder,
    /// Report an ambiguity error instead of choosing.
    Reject,
}

/// Which members must keep a positive remainder once everyone has eaten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SurvivalRule {
    /// Producers, and every member something was eaten from. A consumer
    /// nobody eats from may hold zero.
    #[default]
    Suppliers,
    /// Every member, eaten from or not. A consumer that provides nothing
    /// and that nobody eats from fails the run, as in the stricter
    /// ecosystem check.
    AllMembers,
}

/// Configuration for the consumption simulation.
///
/// # Examples
///
/// ```
/// use u_select::simulate::{FeedingRule, SimulationConfig, TieBreak};
///
/// let config = SimulationConfig::default()
///     .with_feeding(FeedingRule::Split)
///     .with_tie_break(TieBreak::LinkOrder);
/// assert_eq!(config.provided_attribute, "provided");
/// assert_eq!(config.feeding, FeedingRule::Split);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// Attribute holding what an entity supplies.
    pub provided_attribute: String,
    /// Attribute holding what a consumer must eat.
    pub needed_attribute: String,
    pub feeding: FeedingRule,
    pub tie_break: TieBreak,
    pub survival: SurvivalRule,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            provided_attribute: "provided".to_string(),
            needed_attribute: "needed".to_string(),
            feeding: FeedingRule::default(),
            tie_break: TieBreak::default(),
            survival: SurvivalRule::default(),
        }
    }
}

impl SimulationConfig {
    pub fn with_attributes(mut self, provided: impl Into<String>, needed: impl Into<String>) -> Self {
        self.provided_attribute = provided.into();
        self.needed_attribute = needed.into();
        self
    }

    pub fn with_feeding(mut self, feeding: FeedingRule) -> Self {
        self.feeding = feeding;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_survival(mut self, survival: SurvivalRule) -> Self {
        self.survival = survival;
        self
    }
}
