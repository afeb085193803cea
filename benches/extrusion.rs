use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec2;
use logo_viewer::math::shape::{extrude, Contour, FlatShape};
use std::f32::consts::TAU;

/// A gear-like outline with a polygonal hole, deterministic so runs are
/// comparable.
fn gear_shape(teeth: usize) -> FlatShape {
    let outline = Contour::new(
        (0..teeth * 2)
            .map(|i| {
                let angle = i as f32 / (teeth * 2) as f32 * TAU;
                let radius = if i % 2 == 0 { 100.0 } else { 70.0 };
                Vec2::new(angle.cos() * radius, angle.sin() * radius)
            })
            .collect(),
    );
    let hole = Contour::new(
        (0..16)
            .map(|i| {
                let angle = i as f32 / 16.0 * TAU;
                Vec2::new(angle.cos() * 30.0, angle.sin() * 30.0)
            })
            .collect(),
    );
    FlatShape::with_holes(outline, vec![hole])
}

fn bench_triangulate(c: &mut Criterion) {
    let shape = gear_shape(24);
    c.bench_function("triangulate_gear", |b| {
        b.iter(|| black_box(&shape).triangulate())
    });
}

fn bench_extrude(c: &mut Criterion) {
    let shape = gear_shape(24);
    c.bench_function("extrude_gear", |b| {
        b.iter(|| extrude(black_box(&shape), black_box(50.0)))
    });
}

criterion_group!(benches, bench_triangulate, bench_extrude);
criterion_main!(benches);
