//! Pool entities.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::ConfigError;

/// A closed numeric interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    /// Lower bound (inclusive).
    pub min: f64,
    /// Upper bound (inclusive).
    pub max: f64,
}

impl Range {
    /// Creates a range. Bounds are checked when the owning pool or group
    /// is validated.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Degenerate range holding a single value.
    pub fn point(value: f64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    /// `min <= max` and neither bound is NaN.
    pub fn is_valid(&self) -> bool {
        self.min <= self.max
    }

    /// Inclusive membership test.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Common part of two ranges, if any.
    pub fn intersect(&self, other: &Range) -> Option<Range> {
        let r = Range::new(self.min.max(other.min), self.max.min(other.max));
        r.is_valid().then_some(r)
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub(crate) fn check(&self, owner: &str, axis: &str) -> Result<(), ConfigError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(ConfigError::InvalidRange {
                owner: owner.to_string(),
                axis: axis.to_string(),
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// A numeric attribute value: a point value or a tolerance range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Attribute {
    Scalar(f64),
    Range(Range),
}

impl Attribute {
    /// The value as a range; a scalar becomes `[v, v]`.
    pub fn as_range(&self) -> Range {
        match *self {
            Attribute::Scalar(v) => Range::point(v),
            Attribute::Range(r) => r,
        }
    }

    /// The point value, if this is a scalar.
    pub fn as_scalar(&self) -> Option<f64> {
        match *self {
            Attribute::Scalar(v) => Some(v),
            Attribute::Range(_) => None,
        }
    }
}

impl From<f64> for Attribute {
    fn from(v: f64) -> Self {
        Attribute::Scalar(v)
    }
}

impl From<Range> for Attribute {
    fn from(r: Range) -> Self {
        Attribute::Range(r)
    }
}

/// Role of an entity in dependency coverage and consumption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Role {
    /// Supplies others and never needs a dependency.
    Producer,
    /// Needs at least one of its links present.
    #[default]
    Consumer,
}

/// An item of the candidate pool.
///
/// Entities are read-only inputs: solvers never write back to them.
///
/// # Examples
///
/// ```
/// use u_select::model::{Entity, Range, Role};
///
/// let kelp = Entity::new("Giant Kelp")
///     .with_role(Role::Producer)
///     .with_attribute("provided", 4000.0)
///     .with_attribute("depth", Range::new(5.0, 30.0));
/// assert!(kelp.is_producer());
/// assert_eq!(kelp.scalar("provided"), Some(4000.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    /// Unique name; the only cross-reference key.
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub role: Role,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attributes: BTreeMap<String, Attribute>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub traits: BTreeSet<String>,
    /// Names of entities this one depends on, in declaration order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub links: Vec<String>,
}

impl Entity {
    /// Creates a consumer with no attributes, traits or links.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: Role::default(),
            attributes: BTreeMap::new(),
            traits: BTreeSet::new(),
            links: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Attribute>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_trait(mut self, label: impl Into<String>) -> Self {
        self.traits.insert(label.into());
        self
    }

    pub fn with_link(mut self, target: impl Into<String>) -> Self {
        self.links.push(target.into());
        self
    }

    pub fn is_producer(&self) -> bool {
        self.role == Role::Producer
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn scalar(&self, name: &str) -> Option<f64> {
        self.attributes.get(name).and_then(Attribute::as_scalar)
    }
}

/// The ordered candidate list with a name index.
#[derive(Debug, Clone)]
pub struct Pool {
    entities: Vec<Entity>,
    index: HashMap<String, usize>,
}

impl Pool {
    /// Builds a pool, rejecting duplicate names, inverted ranges and
    /// links to entities outside the pool.
    pub fn new(entities: Vec<Entity>) -> Result<Self, ConfigError> {
        let mut index = HashMap::with_capacity(entities.len());
        for (i, e) in entities.iter().enumerate() {
            if index.insert(e.name.clone(), i).is_some() {
                return Err(ConfigError::DuplicateEntity(e.name.clone()));
            }
            for (axis, attr) in &e.attributes {
                attr.as_range().check(&e.name, axis)?;
            }
        }
        for e in &entities {
            if let Some(link) = e.links.iter().find(|l| !index.contains_key(l.as_str())) {
                return Err(ConfigError::UnknownLink {
                    entity: e.name.clone(),
                    link: link.clone(),
                });
            }
        }
        Ok(Self { entities, index })
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn get(&self, idx: usize) -> Option<&Entity> {
        self.entities.get(idx)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn by_name(&self, name: &str) -> Option<&Entity> {
        self.position(name).map(|i| &self.entities[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }
}

impl std::ops::Index<usize> for Pool {
    type Output = Entity;

    fn index(&self, idx: usize) -> &Entity {
        &self.entities[idx]
    }
}
