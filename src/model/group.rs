//! Group requirements.

use std::collections::BTreeSet;

use super::entity::{Attribute, Entity, Pool, Range};
use crate::error::ConfigError;
use crate::simulate::SimulationConfig;

/// A numeric axis a group checks, with an optional target range.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Axis {
    /// Attribute name on the entities.
    pub name: String,
    /// Group-side range. Optional for intersection, required for averaging.
    #[cfg_attr(feature = "serde", serde(default))]
    pub target: Option<Range>,
}

impl Axis {
    /// An axis constrained only by the members' own ranges.
    pub fn open(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: None,
        }
    }

    pub fn within(name: impl Into<String>, min: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            target: Some(Range::new(min, max)),
        }
    }
}

/// Compatibility strategy of a group.
///
/// Each variant bundles its range filter, coverage filter and whether the
/// consumption simulation runs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Strategy {
    /// Ranges must overlap on every axis, every consumer needs one of its
    /// links present, and the consumption simulation must succeed.
    IntersectionDependency {
        #[cfg_attr(feature = "serde", serde(default))]
        simulation: SimulationConfig,
    },
    /// Axis means must fall in the target ranges and the members' traits
    /// must cover `required_traits`.
    AverageTraitSubset {
        #[cfg_attr(feature = "serde", serde(default))]
        required_traits: BTreeSet<String>,
    },
}

impl Strategy {
    pub fn intersection_dependency() -> Self {
        Strategy::IntersectionDependency {
            simulation: SimulationConfig::default(),
        }
    }

    pub fn average_traits<I, S>(traits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Strategy::AverageTraitSubset {
            required_traits: traits.into_iter().map(Into::into).collect(),
        }
    }

    pub fn simulation(&self) -> Option<&SimulationConfig> {
        match self {
            Strategy::IntersectionDependency { simulation } => Some(simulation),
            Strategy::AverageTraitSubset { .. } => None,
        }
    }
}

/// One selection target: a habitat, a site.
///
/// # Examples
///
/// ```
/// use u_select::model::{Axis, GroupRequirement, Strategy};
///
/// let site = GroupRequirement::new("Freshwater Lake", 3, Strategy::average_traits(["photosynthetic"]))
///     .with_axis(Axis::within("ph", 6.0, 7.5));
/// assert_eq!(site.size, 3);
/// assert_eq!(site.axes.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupRequirement {
    pub name: String,
    /// Number of entities to select.
    pub size: usize,
    #[cfg_attr(feature = "serde", serde(default))]
    pub axes: Vec<Axis>,
    pub strategy: Strategy,
}

impl GroupRequirement {
    pub fn new(name: impl Into<String>, size: usize, strategy: Strategy) -> Self {
        Self {
            name: name.into(),
            size,
            axes: Vec::new(),
            strategy,
        }
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axes.push(axis);
        self
    }

    /// Checks the group against the pool it will be solved on.
    ///
    /// Every entity of the pool must carry the attributes the strategy
    /// reads, since any of them may end up selected.
    pub fn validate(&self, pool: &Pool) -> Result<(), ConfigError> {
        if self.size == 0 || self.size > pool.len() {
            return Err(ConfigError::InvalidSize {
                group: self.name.clone(),
                size: self.size,
                pool_size: pool.len(),
            });
        }

        let averaging = matches!(self.strategy, Strategy::AverageTraitSubset { .. });
        for axis in &self.axes {
            match axis.target {
                Some(target) => target.check(&self.name, &axis.name)?,
                None if averaging => {
                    return Err(ConfigError::MissingTarget {
                        group: self.name.clone(),
                        axis: axis.name.clone(),
                    })
                }
                None => {}
            }
            for entity in pool.iter() {
                let attr = self.require(entity, &axis.name)?;
                if averaging && attr.as_scalar().is_none() {
                    return Err(self.not_scalar(&entity.name, &axis.name));
                }
            }
        }

        if let Some(sim) = self.strategy.simulation() {
            for entity in pool.iter() {
                if self.require(entity, &sim.provided_attribute)?.as_scalar().is_none() {
                    return Err(self.not_scalar(&entity.name, &sim.provided_attribute));
                }
                if !entity.is_producer()
                    && self.require(entity, &sim.needed_attribute)?.as_scalar().is_none()
                {
                    return Err(self.not_scalar(&entity.name, &sim.needed_attribute));
                }
            }
        }
        Ok(())
    }

    fn require<'e>(
        &self,
        entity: &'e Entity,
        attribute: &str,
    ) -> Result<&'e Attribute, ConfigError> {
        entity
            .attribute(attribute)
            .ok_or_else(|| ConfigError::MissingAttribute {
                group: self.name.clone(),
                entity: entity.name.clone(),
                attribute: attribute.to_string(),
            })
    }

    fn not_scalar(&self, entity: &str, attribute: &str) -> ConfigError {
        ConfigError::ExpectedScalar {
            group: self.name.clone(),
            entity: entity.to_string(),
            attribute: attribute.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    fn microbes() -> Pool {
        Pool::new(vec![
            Entity::new("m1").with_attribute("ph", 3.0),
            Entity::new("m2").with_attribute("ph", 5.0),
            Entity::new("m3").with_attribute("ph", 7.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_valid_average_group() {
        let g = GroupRequirement::new("site", 3, Strategy::average_traits(Vec::<String>::new()))
            .with_axis(Axis::within("ph", 4.0, 6.0));
        assert!(g.validate(&microbes()).is_ok());
    }

    #[test]
    fn test_size_bounds() {
        let zero = GroupRequirement::new("site", 0, Strategy::average_traits(["x"]));
        assert!(matches!(
            zero.validate(&microbes()),
            Err(ConfigError::InvalidSize { size: 0, .. })
        ));
        let big = GroupRequirement::new("site", 4, Strategy::average_traits(["x"]));
        assert!(matches!(
            big.validate(&microbes()),
            Err(ConfigError::InvalidSize { size: 4, pool_size: 3, .. })
        ));
    }

    #[test]
    fn test_inverted_target() {
        let g = GroupRequirement::new("site", 2, Strategy::average_traits(["x"]))
            .with_axis(Axis::within("ph", 6.0, 4.0));
        assert!(matches!(
            g.validate(&microbes()),
            Err(ConfigError::InvalidRange { ref owner, .. }) if owner == "site"
        ));
    }

    #[test]
    fn test_average_needs_target() {
        let g = GroupRequirement::new("site", 2, Strategy::average_traits(["x"]))
            .with_axis(Axis::open("ph"));
        assert!(matches!(
            g.validate(&microbes()),
            Err(ConfigError::MissingTarget { .. })
        ));
    }

    #[test]
    fn test_missing_attribute() {
        let g = GroupRequirement::new("site", 2, Strategy::average_traits(["x"]))
            .with_axis(Axis::within("salinity", 1.0, 2.0));
        assert!(matches!(
            g.validate(&microbes()),
            Err(ConfigError::MissingAttribute { ref attribute, .. }) if attribute == "salinity"
        ));
    }

    #[test]
    fn test_average_rejects_range_attribute() {
        let pool = Pool::new(vec![
            Entity::new("a").with_attribute("ph", Range::new(1.0, 2.0)),
            Entity::new("b").with_attribute("ph", 2.0),
        ])
        .unwrap();
        let g = GroupRequirement::new("site", 2, Strategy::average_traits(["x"]))
            .with_axis(Axis::within("ph", 1.0, 2.0));
        assert!(matches!(
            g.validate(&pool),
            Err(ConfigError::ExpectedScalar { ref entity, .. }) if entity == "a"
        ));
    }

    #[test]
    fn test_simulation_attributes_required() {
        let pool = Pool::new(vec![
            Entity::new("grass")
                .with_role(Role::Producer)
                .with_attribute("provided", 10.0),
            Entity::new("hare").with_attribute("provided", 3.0).with_link("grass"),
        ])
        .unwrap();
        let g = GroupRequirement::new("habitat", 2, Strategy::intersection_dependency());
        assert!(matches!(
            g.validate(&pool),
            Err(ConfigError::MissingAttribute { ref entity, ref attribute, .. })
                if entity == "hare" && attribute == "needed"
        ));
    }

    #[test]
    fn test_producer_needs_no_need() {
        let pool = Pool::new(vec![
            Entity::new("grass")
                .with_role(Role::Producer)
                .with_attribute("provided", 10.0),
            Entity::new("hare")
                .with_attribute("provided", 3.0)
                .with_attribute("needed", 2.0)
                .with_link("grass"),
        ])
        .unwrap();
        let g = GroupRequirement::new("habitat", 2, Strategy::intersection_dependency());
        assert!(g.validate(&pool).is_ok());
    }
}
