//! Benchmark for RaptorRisk simulation performance.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use raptorrisk::core::random::seeded;
use raptorrisk::core::types::{AssetModel, Portfolio};
use raptorrisk::metrics::compute_risk_summary;
use raptorrisk::portfolio::monte_carlo::{run_simulation, SimulationEngine};

/// Generate an equally weighted portfolio of `n` assets.
fn generate_portfolio(n: usize) -> Portfolio {
    let weight = 100.0 / n as f64;
    let assets = (0..n)
        .map(|i| {
            let volatility = 5.0 + (i as f64 * 7.0) % 60.0;
            let price = 1.0 + i as f64 * 25.0;
            AssetModel::new(format!("ASSET{i}"), weight, volatility, price).unwrap()
        })
        .collect();
    Portfolio::new(1_000_000.0, assets).unwrap()
}

fn benchmark_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_run");
    let portfolio = generate_portfolio(10);

    for trials in [100, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(trials), &trials, |b, &trials| {
            b.iter(|| run_simulation(black_box(&portfolio), trials, &mut seeded(42)))
        });
    }

    group.finish();
}

fn benchmark_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("parallel_run");
    let portfolio = generate_portfolio(10);

    for trials in [1_000, 10_000, 100_000] {
        let engine = SimulationEngine::default().with_trial_count(trials);
        group.bench_with_input(BenchmarkId::from_parameter(trials), &engine, |b, engine| {
            b.iter(|| engine.run_parallel(black_box(&portfolio)))
        });
    }

    group.finish();
}

fn benchmark_risk_summary(c: &mut Criterion) {
    let portfolio = generate_portfolio(3);
    let results = SimulationEngine::default().with_trial_count(100_000).run_parallel(&portfolio);

    c.bench_function("risk_summary_100k", |b| {
        b.iter(|| compute_risk_summary(black_box(&results)))
    });
}

criterion_group!(benches, benchmark_sequential, benchmark_parallel, benchmark_risk_summary);
criterion_main!(benches);
