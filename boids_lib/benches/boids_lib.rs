use boids_lib::{
    options::{RunOptions, UpdateMode},
    simulation::Simulation,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn options(no_boids: usize, update_mode: UpdateMode) -> RunOptions {
    RunOptions {
        init_boids: no_boids,
        seed: Some(42),
        update_mode,
        ..Default::default()
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("update_boids");

    for no_boids in [64_usize, 256, 1024] {
        for (name, mode) in [
            ("sequential", UpdateMode::Sequential),
            ("snapshot", UpdateMode::Snapshot),
        ] {
            group.bench_with_input(BenchmarkId::new(name, no_boids), &no_boids, |b, &n| {
                let mut simulation = Simulation::new(&options(n, mode));
                b.iter(|| simulation.update_boids(black_box(1.)))
            });
        }
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
