//! Discrete coverage filters.

use std::collections::{BTreeSet, HashSet};

use crate::model::Entity;

/// Why a subset failed the coverage check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoverageGap {
    /// A consumer has none of its links in the subset.
    Unfed { consumer: String },
    /// Required traits no member carries.
    MissingTraits(Vec<String>),
}

impl std::fmt::Display for CoverageGap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoverageGap::Unfed { consumer } => write!(f, "`{consumer}` has nothing to depend on"),
            CoverageGap::MissingTraits(t) => write!(f, "missing traits: {}", t.join(", ")),
        }
    }
}

/// Discrete requirement strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageFilter<'a> {
    /// Every consumer finds at least one of its links among the members.
    Dependency,
    /// The union of member traits contains every required trait.
    TraitSubset(&'a BTreeSet<String>),
}

impl CoverageFilter<'_> {
    pub fn check(&self, members: &[&Entity]) -> Result<(), CoverageGap> {
        match self {
            CoverageFilter::Dependency => {
                let present: HashSet<&str> = members.iter().map(|e| e.name.as_str()).collect();
                match members
                    .iter()
                    .filter(|e| !e.is_producer())
                    .find(|e| !e.links.iter().any(|l| present.contains(l.as_str())))
                {
                    Some(e) => Err(CoverageGap::Unfed {
                        consumer: e.name.clone(),
                    }),
                    None => Ok(()),
                }
            }
            CoverageFilter::TraitSubset(required) => {
                let missing: Vec<String> = required
                    .iter()
                    .filter(|t| !members.iter().any(|e| e.traits.contains(*t)))
                    .cloned()
                    .collect();
                if missing.is_empty() {
                    Ok(())
                } else {
                    Err(CoverageGap::MissingTraits(missing))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Role;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_trait_subset() {
        let required = set(&["nitrogen-fixing"]);
        let filter = CoverageFilter::TraitSubset(&required);
        let a = Entity::new("a").with_trait("photosynthetic");
        let b = Entity::new("b").with_trait("photosynthetic");
        assert_eq!(
            filter.check(&[&a, &b]),
            Err(CoverageGap::MissingTraits(vec!["nitrogen-fixing".into()]))
        );
        let c = Entity::new("c").with_trait("nitrogen-fixing");
        assert_eq!(filter.check(&[&a, &c]), Ok(()));
    }

    #[test]
    fn test_traits_jointly_supplied() {
        let required = set(&["anaerobic", "sulfur-oxidizing"]);
        let filter = CoverageFilter::TraitSubset(&required);
        let a = Entity::new("a").with_trait("anaerobic");
        let b = Entity::new("b").with_trait("sulfur-oxidizing");
        let c = Entity::new("c").with_trait("anaerobic");
        assert_eq!(filter.check(&[&a, &b, &c]), Ok(()));
    }

    #[test]
    fn test_empty_requirement_passes() {
        let required = BTreeSet::new();
        let a = Entity::new("a");
        assert_eq!(CoverageFilter::TraitSubset(&required).check(&[&a]), Ok(()));
    }

    #[test]
    fn test_dependency_flip() {
        let kelp = Entity::new("kelp").with_role(Role::Producer);
        let urchin = Entity::new("urchin").with_link("kelp");
        let otter = Entity::new("otter").with_link("urchin");
        let rock = Entity::new("rock").with_role(Role::Producer);

        assert_eq!(
            CoverageFilter::Dependency.check(&[&kelp, &otter, &rock]),
            Err(CoverageGap::Unfed { consumer: "otter".into() })
        );
        assert_eq!(CoverageFilter::Dependency.check(&[&kelp, &otter, &urchin]), Ok(()));
    }

    #[test]
    fn test_producers_vacuous() {
        let a = Entity::new("a").with_role(Role::Producer);
        let b = Entity::new("b").with_role(Role::Producer);
        assert_eq!(CoverageFilter::Dependency.check(&[&a, &b]), Ok(()));
    }

    #[test]
    fn test_consumer_without_links_fails() {
        let a = Entity::new("a").with_role(Role::Producer);
        let b = Entity::new("b");
        assert!(CoverageFilter::Dependency.check(&[&a, &b]).is_err());
    }
}
