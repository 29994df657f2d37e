//! Numeric compatibility filters.

use crate::model::{Axis, AxisReading, Entity, Range};

/// Tolerance on mean bounds, absorbing float summation error.
const MEAN_EPSILON: f64 = 1e-9;

/// Why a subset failed the numeric check.
#[derive(Debug, Clone, PartialEq)]
pub enum AxisViolation {
    /// Highest minimum exceeds lowest maximum.
    Disjoint { axis: String, lower: f64, upper: f64 },
    /// Mean lies outside the group target.
    MeanOutside { axis: String, mean: f64, target: Range },
    /// A member lacks the attribute, or holds a range where a point is needed.
    Unreadable { axis: String, entity: String },
}

impl AxisViolation {
    pub fn axis(&self) -> &str {
        match self {
            AxisViolation::Disjoint { axis, .. }
            | AxisViolation::MeanOutside { axis, .. }
            | AxisViolation::Unreadable { axis, .. } => axis,
        }
    }
}

impl std::fmt::Display for AxisViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AxisViolation::Disjoint { axis, lower, upper } => {
                write!(f, "{axis}: no common window ({lower} > {upper})")
            }
            AxisViolation::MeanOutside { axis, mean, target } => {
                write!(f, "{axis}: mean {mean:.2} outside [{}, {}]", target.min, target.max)
            }
            AxisViolation::Unreadable { axis, entity } => {
                write!(f, "{axis}: no usable value on `{entity}`")
            }
        }
    }
}

/// Numeric compatibility strategy.
///
/// Both variants are pure functions of the members and the group axes.
/// Axes are checked in declaration order and the first violation wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeFilter {
    /// All member ranges, plus the axis target if any, share a value.
    Intersection,
    /// The members' mean lies in the axis target, bounds inclusive.
    Average,
}

impl RangeFilter {
    /// Checks every axis, returning one reading per axis on success.
    pub fn check(&self, members: &[&Entity], axes: &[Axis]) -> Result<Vec<AxisReading>, AxisViolation> {
        axes.iter()
            .map(|axis| match self {
                RangeFilter::Intersection => intersect_axis(members, axis),
                RangeFilter::Average => average_axis(members, axis),
            })
            .collect()
    }
}

fn intersect_axis(members: &[&Entity], axis: &Axis) -> Result<AxisReading, AxisViolation> {
    let mut lower = axis.target.map_or(f64::NEG_INFINITY, |t| t.min);
    let mut upper = axis.target.map_or(f64::INFINITY, |t| t.max);
    for e in members {
        let r = e
            .attribute(&axis.name)
            .map(|a| a.as_range())
            .ok_or_else(|| unreadable(axis, e))?;
        lower = lower.max(r.min);
        upper = upper.min(r.max);
        if lower > upper {
            return Err(AxisViolation::Disjoint {
                axis: axis.name.clone(),
                lower,
                upper,
            });
        }
    }
    Ok(AxisReading::Window {
        axis: axis.name.clone(),
        window: Range::new(lower, upper),
    })
}

fn average_axis(members: &[&Entity], axis: &Axis) -> Result<AxisReading, AxisViolation> {
    let mut sum = 0.0;
    for e in members {
        sum += e.scalar(&axis.name).ok_or_else(|| unreadable(axis, e))?;
    }
    let mean = sum / members.len() as f64;
    if let Some(target) = axis.target {
        if !(target.min - MEAN_EPSILON <= mean && mean <= target.max + MEAN_EPSILON) {
            return Err(AxisViolation::MeanOutside {
                axis: axis.name.clone(),
                mean,
                target,
            });
        }
    }
    Ok(AxisReading::Mean {
        axis: axis.name.clone(),
        mean,
    })
}

fn unreadable(axis: &Axis, e: &Entity) -> AxisViolation {
    AxisViolation::Unreadable {
        axis: axis.name.clone(),
        entity: e.name.clone(),
    }
}
