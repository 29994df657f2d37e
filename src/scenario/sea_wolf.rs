//! Microbe sites: three microbes per site, averages within the site
//! ranges and the site's traits covered.

use super::Problem;
use crate::model::{Axis, Entity, GroupRequirement, Strategy};
use crate::solver::Exclusivity;

pub const SITE_SIZE: usize = 3;

/// name, ph, salinity, temperature, traits
type Microbe = (&'static str, f64, f64, f64, &'static [&'static str]);

/// name, ph, salinity, temperature ranges, required traits
type Site = (
    &'static str,
    (f64, f64),
    (f64, f64),
    (f64, f64),
    &'static [&'static str],
);

const MICROBES: &[Microbe] = &[
    ("Cyanobacteria A", 6.5, 3.0, 7.0, &["photosynthetic", "nitrogen-fixing"]),
    ("Cyanobacteria B", 7.0, 2.5, 6.5, &["photosynthetic"]),
    ("Diatom", 6.0, 5.0, 5.5, &["photosynthetic", "silica-shell"]),
    ("Green Algae", 5.5, 4.0, 6.0, &["photosynthetic"]),
    ("Nitrosomonas", 7.5, 4.5, 7.5, &["nitrogen-fixing", "aerobic"]),
    ("Nitrobacter", 7.0, 5.0, 7.0, &["nitrogen-fixing", "aerobic"]),
    ("Sulfur Bacteria", 4.0, 6.0, 8.0, &["anaerobic", "sulfur-oxidizing"]),
    ("Methanogen", 6.0, 3.5, 8.5, &["anaerobic", "methane-producing"]),
    ("Purple Bacteria", 5.0, 4.0, 7.0, &["photosynthetic", "anaerobic"]),
    ("Iron Bacteria", 5.5, 5.5, 6.5, &["aerobic", "iron-oxidizing"]),
    ("Archaea X", 3.5, 7.0, 9.0, &["extremophile", "anaerobic"]),
    ("Archaea Y", 4.0, 8.0, 8.5, &["extremophile", "sulfur-oxidizing"]),
];

const SITES: &[Site] = &[
    (
        "Coastal Estuary",
        (5.5, 7.0),
        (3.0, 5.0),
        (6.0, 7.5),
        &["photosynthetic", "nitrogen-fixing"],
    ),
    (
        "Deep Ocean Vent",
        (3.5, 5.0),
        (6.0, 8.0),
        (7.5, 9.0),
        &["anaerobic", "sulfur-oxidizing"],
    ),
    (
        "Freshwater Lake",
        (6.0, 7.5),
        (2.0, 4.0),
        (5.5, 7.0),
        &["photosynthetic"],
    ),
];

/// 12 microbes and three sites, solved without sharing microbes.
pub fn sea_wolf() -> Problem {
    let pool = MICROBES
        .iter()
        .map(|&(name, ph, salinity, temperature, traits)| {
            let e = Entity::new(name)
                .with_attribute("ph", ph)
                .with_attribute("salinity", salinity)
                .with_attribute("temperature", temperature);
            traits.iter().fold(e, |e, t| e.with_trait(*t))
        })
        .collect();

    let groups = SITES
        .iter()
        .map(|&(name, ph, salinity, temperature, traits)| {
            GroupRequirement::new(name, SITE_SIZE, Strategy::average_traits(traits.iter().copied()))
                .with_axis(Axis::within("ph", ph.0, ph.1))
                .with_axis(Axis::within("salinity", salinity.0, salinity.1))
                .with_axis(Axis::within("temperature", temperature.0, temperature.1))
        })
        .collect();

    Problem {
        pool,
        groups,
        exclusivity: Exclusivity::Exclusive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sites() {
        let problem = sea_wolf();
        assert_eq!(problem.pool.len(), 12);
        assert_eq!(problem.groups.len(), 3);
        let vent = &problem.groups[1];
        assert_eq!(vent.name, "Deep Ocean Vent");
        assert_eq!(vent.axes.len(), 3);
        let (pool, groups) = problem.build().unwrap();
        for g in &groups {
            g.validate(&pool).unwrap();
        }
    }
}
