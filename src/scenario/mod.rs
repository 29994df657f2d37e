//! Problem definitions and built-in scenarios.
//!
//! A [`Problem`] is the serializable form of a pool plus its groups, as
//! read from a JSON file by the command-line front end.
//!
//! - [`reef`], [`mountain`]: food-web habitats, one group of 8
//! - [`sea_wolf`]: three microbe sites of 3, solved exclusively

mod ecosystem;
mod sea_wolf;

pub use ecosystem::{mountain, reef, HABITAT_SIZE};
pub use sea_wolf::{sea_wolf, SITE_SIZE};

use crate::error::ConfigError;
use crate::model::{Entity, GroupRequirement, Pool};
use crate::solver::Exclusivity;

/// Names accepted by [`by_name`].
pub const NAMES: &[&str] = &["reef", "mountain", "sea-wolf"];

/// An unvalidated problem: entities, groups and the default sharing mode.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Problem {
    pub pool: Vec<Entity>,
    pub groups: Vec<GroupRequirement>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub exclusivity: Exclusivity,
}

impl Problem {
    /// Validates the pool and every group against it.
    pub fn build(self) -> Result<(Pool, Vec<GroupRequirement>), ConfigError> {
        let pool = Pool::new(self.pool)?;
        for group in &self.groups {
            group.validate(&pool)?;
        }
        Ok((pool, self.groups))
    }

    pub fn group(&self, name: &str) -> Option<&GroupRequirement> {
        self.groups.iter().find(|g| g.name == name)
    }
}

/// Looks up a built-in scenario.
pub fn by_name(name: &str) -> Option<Problem> {
    match name {
        "reef" => Some(reef()),
        "mountain" => Some(mountain()),
        "sea-wolf" | "sea_wolf" => Some(sea_wolf()),
        _ => None,
    }
}
