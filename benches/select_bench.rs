//! Criterion benchmarks for u-select.
//!
//! Covers the built-in scenarios and synthetic averaging pools generated
//! from a fixed seed.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use u_select::combination::Combinations;
use u_select::model::{Axis, Entity, GroupRequirement, Pool, Strategy};
use u_select::scenario;
use u_select::solver::{GroupSolver, MultiGroupAssigner, SolverConfig};

// ===========================================================================
// Synthetic pools
// ===========================================================================

const TRAITS: [&str; 4] = ["red", "green", "blue", "gold"];

fn synthetic_pool(n: usize, seed: u64) -> Pool {
    let mut rng = StdRng::seed_from_u64(seed);
    let entities = (0..n)
        .map(|i| {
            let mut e = Entity::new(format!("E{i}"))
                .with_attribute("a", rng.random_range(1.0..10.0))
                .with_attribute("b", rng.random_range(1.0..10.0));
            for t in TRAITS {
                if rng.random_range(0.0..1.0) < 0.3 {
                    e = e.with_trait(t);
                }
            }
            e
        })
        .collect();
    Pool::new(entities).expect("synthetic names are unique")
}

fn synthetic_sites(count: usize, size: usize) -> Vec<GroupRequirement> {
    (0..count)
        .map(|i| {
            GroupRequirement::new(format!("site{i}"), size, Strategy::average_traits([TRAITS[i % 4]]))
                .with_axis(Axis::within("a", 4.0, 7.0))
                .with_axis(Axis::within("b", 3.0, 8.0))
        })
        .collect()
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_combinations(c: &mut Criterion) {
    let mut group = c.benchmark_group("combinations");
    for &(n, k) in &[(12usize, 3usize), (16, 8), (20, 5)] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{n}c{k}")),
            &(n, k),
            |b, &(n, k)| b.iter(|| Combinations::new(black_box(n), black_box(k)).count()),
        );
    }
    group.finish();
}

fn bench_scenarios(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios");
    group.sample_size(10);

    for name in ["reef", "mountain"] {
        let (pool, groups) = scenario::by_name(name).unwrap().build().unwrap();
        group.bench_function(name, |b| {
            b.iter(|| {
                GroupSolver::new(&pool, &groups[0], &SolverConfig::default())
                    .unwrap()
                    .solve()
                    .unwrap()
            })
        });
    }

    let (pool, groups) = scenario::sea_wolf().build().unwrap();
    group.bench_function("sea_wolf_exclusive", |b| {
        b.iter(|| {
            MultiGroupAssigner::new(&pool, &groups, &SolverConfig::default())
                .unwrap()
                .solve_exclusive()
                .unwrap()
        })
    });
    group.finish();
}

fn bench_synthetic_exclusive(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthetic_exclusive");
    group.sample_size(10);

    for &n in &[12usize, 15, 18] {
        let pool = synthetic_pool(n, 42);
        let sites = synthetic_sites(3, 3);
        let config = SolverConfig::default().with_max_solutions(10_000);
        group.bench_with_input(BenchmarkId::from_parameter(n), &(pool, sites), |b, (p, s)| {
            b.iter(|| {
                MultiGroupAssigner::new(p, s, &config)
                    .unwrap()
                    .solve_exclusive()
                    .unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_combinations,
    bench_scenarios,
    bench_synthetic_exclusive
);
criterion_main!(benches);
