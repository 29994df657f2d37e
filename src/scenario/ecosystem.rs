//! Food-web habitats: pick 8 species that share a habitat window and can
//! all be fed.

use super::Problem;
use crate::model::{Axis, Entity, GroupRequirement, Range, Role, Strategy};
use crate::solver::Exclusivity;

/// Number of species in a habitat.
pub const HABITAT_SIZE: usize = 8;

struct Species {
    name: &'static str,
    role: Role,
    provided: f64,
    needed: f64,
    /// Depth or elevation.
    span: (f64, f64),
    temperature: (f64, f64),
    eats: &'static [&'static str],
}

const fn producer(name: &'static str, provided: f64, span: (f64, f64), temperature: (f64, f64)) -> Species {
    Species {
        name,
        role: Role::Producer,
        provided,
        needed: 0.0,
        span,
        temperature,
        eats: &[],
    }
}

const fn consumer(
    name: &'static str,
    provided: f64,
    needed: f64,
    span: (f64, f64),
    temperature: (f64, f64),
    eats: &'static [&'static str],
) -> Species {
    Species {
        name,
        role: Role::Consumer,
        provided,
        needed,
        span,
        temperature,
        eats,
    }
}

const REEF: &[Species] = &[
    producer("Giant Kelp", 4000.0, (5.0, 30.0), (12.0, 20.0)),
    producer("Sea Grass", 2500.0, (0.0, 25.0), (15.0, 24.0)),
    producer("Coral", 1800.0, (5.0, 20.0), (18.0, 26.0)),
    consumer("Sea Urchin", 800.0, 600.0, (5.0, 25.0), (14.0, 22.0), &["Giant Kelp", "Sea Grass"]),
    consumer("Small Fish", 500.0, 350.0, (0.0, 30.0), (12.0, 24.0), &["Sea Grass", "Coral"]),
    consumer("Crab", 700.0, 450.0, (5.0, 20.0), (14.0, 20.0), &["Giant Kelp", "Coral"]),
    consumer("Lobster", 600.0, 400.0, (10.0, 30.0), (12.0, 18.0), &["Sea Urchin", "Small Fish"]),
    consumer("Octopus", 750.0, 500.0, (5.0, 35.0), (14.0, 22.0), &["Crab", "Lobster"]),
    consumer("Sea Bass", 650.0, 450.0, (10.0, 40.0), (12.0, 20.0), &["Small Fish", "Crab"]),
    consumer("Barracuda", 550.0, 600.0, (5.0, 30.0), (16.0, 24.0), &["Sea Bass", "Small Fish"]),
    consumer("Shark", 700.0, 800.0, (10.0, 50.0), (14.0, 22.0), &["Sea Bass", "Octopus", "Barracuda"]),
];

const MOUNTAIN: &[Species] = &[
    producer("Alpine Grass", 3500.0, (1500.0, 3000.0), (5.0, 18.0)),
    producer("Mountain Shrub", 2800.0, (1200.0, 2500.0), (8.0, 20.0)),
    producer("Pine Tree", 2000.0, (1000.0, 2200.0), (5.0, 15.0)),
    consumer("Mountain Hare", 700.0, 500.0, (1500.0, 2800.0), (4.0, 16.0), &["Alpine Grass", "Mountain Shrub"]),
    consumer("Marmot", 600.0, 400.0, (1800.0, 3000.0), (2.0, 14.0), &["Alpine Grass"]),
    consumer("Mountain Goat", 800.0, 650.0, (2000.0, 3500.0), (0.0, 12.0), &["Alpine Grass", "Mountain Shrub"]),
    consumer("Red Fox", 550.0, 450.0, (1200.0, 2600.0), (5.0, 18.0), &["Mountain Hare", "Marmot"]),
    consumer("Golden Eagle", 650.0, 500.0, (1500.0, 3500.0), (2.0, 16.0), &["Mountain Hare", "Marmot"]),
    consumer("Snow Leopard", 750.0, 700.0, (2000.0, 3500.0), (-5.0, 10.0), &["Mountain Goat", "Mountain Hare"]),
    consumer("Wolf", 850.0, 750.0, (1500.0, 3000.0), (0.0, 15.0), &["Mountain Goat", "Red Fox", "Marmot"]),
];

/// Coral reef: 11 species, habitat axes `depth` and `temperature`.
pub fn reef() -> Problem {
    habitat("reef", "depth", REEF)
}

/// Mountain: 10 species, habitat axes `elevation` and `temperature`.
pub fn mountain() -> Problem {
    habitat("mountain", "elevation", MOUNTAIN)
}

fn habitat(name: &str, span_axis: &str, table: &[Species]) -> Problem {
    let pool = table
        .iter()
        .map(|s| {
            let mut e = Entity::new(s.name)
                .with_role(s.role)
                .with_attribute("provided", s.provided)
                .with_attribute(span_axis, Range::new(s.span.0, s.span.1))
                .with_attribute("temperature", Range::new(s.temperature.0, s.temperature.1));
            if s.role == Role::Consumer {
                e = e.with_attribute("needed", s.needed);
            }
            s.eats.iter().fold(e, |e, food| e.with_link(*food))
        })
        .collect();

    let group = GroupRequirement::new(name, HABITAT_SIZE, Strategy::intersection_dependency())
        .with_axis(Axis::open(span_axis))
        .with_axis(Axis::open("temperature"));

    Problem {
        pool,
        groups: vec![group],
        exclusivity: Exclusivity::Reuse,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_build_valid_problems() {
        for problem in [reef(), mountain()] {
            let (pool, groups) = problem.build().unwrap();
            for g in &groups {
                g.validate(&pool).unwrap();
            }
        }
    }

    #[test]
    fn test_reef_shape() {
        let problem = reef();
        assert_eq!(problem.pool.len(), 11);
        assert_eq!(problem.pool.iter().filter(|e| e.is_producer()).count(), 3);
        let shark = problem.pool.iter().find(|e| e.name == "Shark").unwrap();
        assert_eq!(shark.links, vec!["Sea Bass", "Octopus", "Barracuda"]);
        assert_eq!(shark.attribute("depth").unwrap().as_range(), Range::new(10.0, 50.0));
    }

    #[test]
    fn test_producers_have_no_need() {
        let problem = mountain();
        let grass = problem.pool.iter().find(|e| e.name == "Alpine Grass").unwrap();
        assert!(grass.scalar("needed").is_none());
        assert!(grass.links.is_empty());
    }
}
