use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::{Mat4, Vec3};
use nebula_core::constants::DEFAULT_PARTICLE_COUNT;
use nebula_core::*;

fn bench_deform(c: &mut Criterion) {
    let field = ParticleField::create_seeded(DEFAULT_PARTICLE_COUNT, 1).unwrap();
    let colors = ThemeResolver::default().colors();
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 20.0), Vec3::ZERO, Vec3::Y);
    let mut deformer = Deformer::new(field.len());

    c.bench_function("ambient_frame_70k", |b| {
        let frame = FrameUniforms::new(ControlSignal::ambient(3.0), colors, view);
        b.iter(|| black_box(deformer.evaluate(&field, &frame).len()))
    });

    c.bench_function("interactive_frame_70k", |b| {
        let signal = ControlSignal {
            expansion: 0.3,
            hovering: true,
            rotation: 0.5,
            elapsed: 3.0,
        };
        let frame = FrameUniforms::new(signal, colors, view);
        b.iter(|| black_box(deformer.evaluate(&field, &frame).len()))
    });
}

criterion_group!(benches, bench_deform);
criterion_main!(benches);
