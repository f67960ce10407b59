//! Criterion benchmarks for full simulation steps on the reference profiles.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use lumen_bench::{reference_profile, stress_profile, REFERENCE_STEPS};
use lumen_engine::Simulation;

fn bench_step_60k(c: &mut Criterion) {
    let mut sim = Simulation::new(reference_profile()).unwrap();
    sim.step();

    c.bench_function("step_60k", |b| {
        b.iter(|| {
            let sample = sim.step();
            black_box(sample);
        });
    });
}

fn bench_step_540k(c: &mut Criterion) {
    let mut sim = Simulation::new(stress_profile()).unwrap();
    sim.step();

    c.bench_function("step_540k", |b| {
        b.iter(|| {
            let sample = sim.step();
            black_box(sample);
        });
    });
}

fn bench_reference_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("reference_run");
    group.sample_size(10);
    group.bench_function("600_steps_60k", |b| {
        b.iter(|| {
            let mut sim = Simulation::new(reference_profile()).unwrap();
            sim.run(REFERENCE_STEPS);
            black_box(sim.analyze_output().unwrap());
        });
    });
    group.finish();
}

criterion_group!(benches, bench_step_60k, bench_step_540k, bench_reference_run);
criterion_main!(benches);
