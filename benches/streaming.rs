use criterion::{criterion_group, criterion_main, Criterion, black_box};

use rand::SeedableRng;
use rand::rngs::StdRng;

use gridstream::generation::RandomObjectPlacer;
use gridstream::streaming::{HeadlessHost, StreamingController};
use gridstream::world::{SeedPolicy, WorldConfig};

use glam::Vec3;

fn bench_place_default_32(c: &mut Criterion) {
    let config = WorldConfig::default();
    let placer = RandomObjectPlacer::new(32);
    let mut rng = StdRng::seed_from_u64(1);

    c.bench_function("place_default_32", |b| {
        b.iter(|| placer.place(black_box(&config.default.categories), &mut rng));
    });
}

fn bench_steady_state_tick(c: &mut Criterion) {
    let mut controller = StreamingController::new(WorldConfig::default(), HeadlessHost::new());
    controller.tick(Vec3::ZERO);

    c.bench_function("tick_steady_state", |b| {
        b.iter(|| controller.tick(black_box(Vec3::new(1.0, 0.0, 1.0))));
    });
}

fn bench_walk_transitions(c: &mut Criterion) {
    c.bench_function("walk_east_radius_5", |b| {
        b.iter(|| {
            let config = WorldConfig {
                seed: SeedPolicy::PerChunk { seed: 7 },
                ..WorldConfig::default()
            };
            let mut controller = StreamingController::new(config, HeadlessHost::new());

            // Cross 20 chunk borders along X
            for step in 0..200 {
                controller.tick(Vec3::new(step as f32, 0.0, 0.0));
            }
            black_box(controller.stats());
        });
    });
}

fn bench_teleport(c: &mut Criterion) {
    let mut controller = StreamingController::new(WorldConfig::default(), HeadlessHost::new());
    controller.tick(Vec3::ZERO);
    let mut far = false;

    c.bench_function("teleport_radius_5", |b| {
        b.iter(|| {
            far = !far;
            let pos = if far { Vec3::new(5000.0, 0.0, 0.0) } else { Vec3::ZERO };
            black_box(controller.tick(pos));
        });
    });
}

criterion_group!(
    benches,
    bench_place_default_32,
    bench_steady_state_tick,
    bench_walk_transitions,
    bench_teleport,
);
criterion_main!(benches);
