//! 粒子场性能基准测试
//!
//! 采样、逐帧推进与 CPU 着色求值

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{Mat4, Vec2};
use starfield::particles::{DistributionKind, DistributionSpec, Sampler};
use starfield::render::{CameraState, ShadingParams, ShadingProgram};
use starfield::scene::{presets, LayerCompositor};

fn bench_sampler(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampler");

    for count in [1_000u32, 15_000] {
        for kind in [
            DistributionKind::UniformVolume,
            DistributionKind::SphereShell,
            DistributionKind::UniformCube,
        ] {
            let spec = DistributionSpec::new(count, 10.0).with_kind(kind);
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", kind), count),
                &spec,
                |b, spec| {
                    b.iter(|| black_box(Sampler::generate_seeded(spec, 42)));
                },
            );
        }
    }

    group.finish();
}

fn bench_compositor_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("compositor_tick");

    for name in presets::PRESET_NAMES {
        let Some(mut config) = presets::by_name(name) else {
            continue;
        };
        config.seed = Some(1);
        let Ok(mut compositor) = LayerCompositor::from_config(&config) else {
            continue;
        };
        group.bench_function(name, |b| {
            b.iter(|| black_box(compositor.tick(1.0 / 60.0, Vec2::new(0.3, -0.2))));
        });
    }

    group.finish();
}

fn bench_shading(c: &mut Criterion) {
    let mut group = c.benchmark_group("shading");

    let spec = DistributionSpec::new(5_000, 10.0);
    let Ok(buffer) = Sampler::generate_seeded(&spec, 7) else {
        return;
    };
    let program = ShadingProgram::new(ShadingParams::default());
    let camera = CameraState::default();

    group.bench_function("vertex_5000", |b| {
        b.iter(|| {
            let mut total = 0.0;
            for (position, phase) in buffer.iter() {
                total += program
                    .vertex(position, phase, Mat4::IDENTITY, &camera, 1.5)
                    .point_size;
            }
            black_box(total)
        });
    });

    group.bench_function("fragment_grid", |b| {
        let vertex = program.vertex(glam::Vec3::ZERO, 0.3, Mat4::IDENTITY, &camera, 0.0);
        b.iter(|| {
            let mut total = 0.0;
            for y in 0..16 {
                for x in 0..16 {
                    let coord = Vec2::new(x as f32 / 16.0 - 0.5, y as f32 / 16.0 - 0.5);
                    if let Some(out) = program.fragment(coord, &vertex, glam::Vec3::ONE) {
                        total += out.alpha;
                    }
                }
            }
            black_box(total)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_sampler, bench_compositor_tick, bench_shading);
criterion_main!(benches);
