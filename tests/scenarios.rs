//! Regression counts on the built-in scenarios.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use u_select::filter::CoverageGap;
use u_select::model::{AxisReading, Range};
use u_select::scenario;
use u_select::solver::{
    Evaluation, GroupSolver, MultiGroupAssigner, Rejection, SolverConfig, Termination,
};

fn solve_habitat(problem: scenario::Problem) -> u_select::solver::GroupResult {
    let (pool, groups) = problem.build().unwrap();
    GroupSolver::new(&pool, &groups[0], &SolverConfig::default())
        .unwrap()
        .solve()
        .unwrap()
}

#[test]
fn reef_has_21_habitats() {
    let result = solve_habitat(scenario::reef());
    assert!(result.is_complete());
    assert_eq!(result.evaluated, 165);
    assert_eq!(result.selections.len(), 21);

    let first = &result.selections[0];
    assert_eq!(
        first.members,
        vec![
            "Giant Kelp",
            "Sea Grass",
            "Coral",
            "Sea Urchin",
            "Small Fish",
            "Crab",
            "Lobster",
            "Octopus"
        ]
    );
    assert_eq!(
        first.reading("depth"),
        Some(&AxisReading::Window {
            axis: "depth".into(),
            window: Range::new(10.0, 20.0)
        })
    );
    assert_eq!(
        first.reading("temperature"),
        Some(&AxisReading::Window {
            axis: "temperature".into(),
            window: Range::new(18.0, 18.0)
        })
    );
}

#[test]
fn reef_feeding_log() {
    let result = solve_habitat(scenario::reef());
    let feeding = result.selections[0].feeding.as_ref().unwrap();
    let log: Vec<String> = feeding.events.iter().map(|e| e.to_string()).collect();
    assert_eq!(
        log,
        vec![
            "Sea Urchin eats Giant Kelp: 4000 - 600 = 3400",
            "Octopus eats Crab: 700 - 500 = 200",
            "Crab eats Giant Kelp: 3400 - 450 = 2950",
            "Lobster eats Sea Urchin: 800 - 400 = 400",
            "Small Fish eats Sea Grass: 2500 - 350 = 2150",
        ]
    );
    assert_eq!(feeding.remaining["Crab"], 200.0);
}

#[test]
fn mountain_has_9_habitats() {
    let result = solve_habitat(scenario::mountain());
    assert_eq!(result.evaluated, 45);
    assert_eq!(result.selections.len(), 9);
    assert_eq!(
        result.selections[0].members,
        vec![
            "Alpine Grass",
            "Mountain Shrub",
            "Pine Tree",
            "Mountain Hare",
            "Marmot",
            "Mountain Goat",
            "Red Fox",
            "Golden Eagle"
        ]
    );
}

#[test]
fn reef_check_reports_unfed_shark() {
    let (pool, groups) = scenario::reef().build().unwrap();
    let solver = GroupSolver::new(&pool, &groups[0], &SolverConfig::default()).unwrap();
    let eval = solver
        .check(&[
            "Giant Kelp",
            "Sea Grass",
            "Coral",
            "Sea Urchin",
            "Small Fish",
            "Crab",
            "Lobster",
            "Shark",
        ])
        .unwrap();
    assert_eq!(
        eval,
        Evaluation::Rejected(Rejection::Coverage(CoverageGap::Unfed {
            consumer: "Shark".into()
        }))
    );
}

#[test]
fn sea_wolf_sites_independently() {
    let (pool, groups) = scenario::sea_wolf().build().unwrap();
    let assigner = MultiGroupAssigner::new(&pool, &groups, &SolverConfig::default()).unwrap();
    let results = assigner.solve_independent().unwrap();
    let counts: Vec<usize> = results.iter().map(|r| r.selections.len()).collect();
    assert_eq!(counts, vec![69, 16, 22]);
    assert!(results.iter().all(|r| r.evaluated == 220));
    assert_eq!(
        results[1].selections[0].members,
        vec!["Cyanobacteria A", "Archaea X", "Archaea Y"]
    );
}

#[test]
fn sea_wolf_exclusive_assignments() {
    let (pool, groups) = scenario::sea_wolf().build().unwrap();
    let assigner = MultiGroupAssigner::new(&pool, &groups, &SolverConfig::default()).unwrap();
    let result = assigner.solve_exclusive().unwrap();
    assert!(result.is_complete());
    assert_eq!(result.assignments.len(), 2029);
    assert!(result.assignments.iter().all(|a| a.is_exclusive()));

    let first = &result.assignments[0];
    assert_eq!(
        first.get("Coastal Estuary").unwrap().members,
        vec!["Cyanobacteria A", "Diatom", "Green Algae"]
    );
    assert_eq!(
        first.get("Deep Ocean Vent").unwrap().members,
        vec!["Nitrosomonas", "Archaea X", "Archaea Y"]
    );
    assert_eq!(
        first.get("Freshwater Lake").unwrap().members,
        vec!["Cyanobacteria B", "Nitrobacter", "Purple Bacteria"]
    );
}

#[test]
fn sea_wolf_exclusive_stops_at_solution_limit() {
    let (pool, groups) = scenario::sea_wolf().build().unwrap();
    let config = SolverConfig::default().with_max_solutions(5);
    let assigner = MultiGroupAssigner::new(&pool, &groups, &config).unwrap();
    let result = assigner.solve_exclusive().unwrap();
    assert_eq!(result.assignments.len(), 5);
    assert_eq!(result.termination, Termination::SolutionLimit);

    let full = MultiGroupAssigner::new(&pool, &groups, &SolverConfig::default())
        .unwrap()
        .solve_exclusive()
        .unwrap();
    assert_eq!(result.assignments[..], full.assignments[..5]);
}

#[test]
fn cancelled_search_is_flagged() {
    let (pool, groups) = scenario::sea_wolf().build().unwrap();
    let assigner = MultiGroupAssigner::new(&pool, &groups, &SolverConfig::default()).unwrap();
    let cancel = Arc::new(AtomicBool::new(true));
    let result = assigner.solve_exclusive_with_cancel(Some(cancel)).unwrap();
    assert_eq!(result.termination, Termination::Cancelled);
    assert!(result.into_complete().is_err());
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_sea_wolf_matches() {
    let (pool, groups) = scenario::sea_wolf().build().unwrap();
    let config = SolverConfig::default().with_parallel(true);
    let result = MultiGroupAssigner::new(&pool, &groups, &config)
        .unwrap()
        .solve_exclusive()
        .unwrap();
    assert_eq!(result.assignments.len(), 2029);
}

#[cfg(feature = "serde")]
#[test]
fn problem_from_json() {
    let text = r#"{
        "pool": [
            {"name": "Kelp", "role": "producer", "attributes": {"provided": 100, "depth": {"min": 0, "max": 10}}},
            {"name": "Urchin", "attributes": {"provided": 40, "needed": 30, "depth": {"min": 5, "max": 20}},
             "links": ["Kelp"]}
        ],
        "groups": [
            {"name": "bed", "size": 2, "axes": [{"name": "depth"}],
             "strategy": {"kind": "intersection_dependency"}}
        ]
    }"#;
    let problem: scenario::Problem = serde_json::from_str(text).unwrap();
    let (pool, groups) = problem.build().unwrap();
    let result = GroupSolver::new(&pool, &groups[0], &SolverConfig::default())
        .unwrap()
        .solve()
        .unwrap();
    assert_eq!(result.selections.len(), 1);
    assert_eq!(
        result.selections[0].reading("depth"),
        Some(&AxisReading::Window {
            axis: "depth".into(),
            window: Range::new(5.0, 10.0)
        })
    );
}
