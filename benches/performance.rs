use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ember_smoke::breath::BreathSignals;
use ember_smoke::controls::SmokeControls;
use ember_smoke::frame_loop::{FrameInput, FrameLoop};
use ember_smoke::ik::{self, Bend};
use ember_smoke::scene::SceneKind;
use ember_smoke::smoke::{SmokeEnvironment, SmokeProfile, SmokeSystem};
use ember_smoke::surface::Surface;
use glam::Vec2;
use std::time::{Duration, Instant};

// The GPU side can't be benchmarked headless, but the simulation can

const ENV: SmokeEnvironment = SmokeEnvironment {
    wind: 0.18,
    width: 720.0,
};

fn benchmark_full_cap_update(c: &mut Criterion) {
    c.bench_function("update_1500_particles", |b| {
        let mut smoke = SmokeSystem::seeded(SmokeProfile::FIGURE, 1);
        smoke.spawn(1500.0, 1.0, Vec2::new(360.0, 300.0), 0.18);
        b.iter(|| {
            let mut s = SmokeSystem::seeded(SmokeProfile::FIGURE, 1);
            for p in smoke.particles() {
                s.push(*p);
            }
            s.update(black_box(1.0 / 60.0), ENV);
            black_box(s.len())
        })
    });
}

fn benchmark_steady_state(c: &mut Criterion) {
    c.bench_function("spawn_update_exhale_rate", |b| {
        let mut smoke = SmokeSystem::seeded(SmokeProfile::FIGURE, 2);
        let origin = Vec2::new(360.0, 200.0);
        b.iter(|| {
            smoke.spawn(black_box(68.0), 1.0 / 60.0, origin, 0.18);
            smoke.update(1.0 / 60.0, ENV);
            black_box(smoke.len())
        })
    });
}

fn benchmark_ik(c: &mut Criterion) {
    c.bench_function("two_bone_ik_solve", |b| {
        let shoulder = Vec2::new(320.0, 200.0);
        b.iter(|| {
            let target = black_box(Vec2::new(380.0, 170.0));
            black_box(ik::solve(shoulder, target, 38.0, 41.0, Bend::Negative))
        })
    });
}

fn benchmark_frame(c: &mut Criterion) {
    c.bench_function("frame_loop_tick_figure", |b| {
        let mut frame_loop = FrameLoop::with_smoke(
            Surface::default(),
            SceneKind::Figure,
            SmokeControls::default(),
            SmokeSystem::seeded(SmokeProfile::FIGURE, 3),
        );
        let start = Instant::now();
        let mut frame = 0u64;
        b.iter(|| {
            frame += 1;
            let now = start + Duration::from_millis(frame * 16);
            let drawn = frame_loop.tick(now, FrameInput::default()).map(|f| f.particles.len());
            black_box(drawn)
        })
    });

    c.bench_function("breath_signals", |b| {
        b.iter(|| black_box(BreathSignals::at(black_box(12.34))))
    });
}

criterion_group!(benches, benchmark_full_cap_update, benchmark_steady_state, benchmark_ik, benchmark_frame);
criterion_main!(benches);
