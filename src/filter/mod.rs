//! Group compatibility filters.
//!
//! - [`RangeFilter`]: numeric check, by range intersection or by mean
//! - [`CoverageFilter`]: discrete check, by dependency links or by traits
//!
//! Both are stateless predicates over a candidate subset. A group's
//! [`Strategy`] picks one of each.

mod coverage;
mod range;

pub use coverage::{CoverageFilter, CoverageGap};
pub use range::{AxisViolation, RangeFilter};

use crate::model::Strategy;

impl Strategy {
    pub fn range_filter(&self) -> RangeFilter {
        match self {
            Strategy::IntersectionDependency { .. } => RangeFilter::Intersection,
            Strategy::AverageTraitSubset { .. } => RangeFilter::Average,
        }
    }

    pub fn coverage_filter(&self) -> CoverageFilter<'_> {
        match self {
            Strategy::IntersectionDependency { .. } => CoverageFilter::Dependency,
            Strategy::AverageTraitSubset { required_traits } => {
                CoverageFilter::TraitSubset(required_traits)
            }
        }
    }
}
