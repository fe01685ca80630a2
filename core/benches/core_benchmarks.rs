use criterion::{black_box, criterion_group, criterion_main, Criterion};

use nanobricks_core::math::{mat4_from_translation, Mat4, Vec3};
use nanobricks_core::mesh::generators::{generate_brick, generate_quad};
use nanobricks_core::mesh::{merge, MeshSource};

// ---------------------------------------------------------------------------
// Mesh generation
// ---------------------------------------------------------------------------

fn bench_generate_brick(c: &mut Criterion) {
    c.bench_function("generate_brick", |b| {
        b.iter(|| generate_brick(black_box([0.5, 0.5, 0.5])));
    });
}

fn bench_generate_quad(c: &mut Criterion) {
    c.bench_function("generate_quad", |b| {
        b.iter(|| generate_quad(black_box(0.5), black_box(0.5)));
    });
}

// ---------------------------------------------------------------------------
// Buffer merging
// ---------------------------------------------------------------------------

fn brick_grid(count: usize) -> (Vec<MeshSource>, Vec<Mat4>) {
    let sources = vec![generate_brick([0.5, 0.5, 0.5]); count];
    let transforms = (0..count)
        .map(|i| mat4_from_translation(Vec3::new(i as f32, 0.0, 0.0)))
        .collect();
    (sources, transforms)
}

fn bench_merge_small(c: &mut Criterion) {
    let (sources, transforms) = brick_grid(16);
    c.bench_function("merge_16_bricks", |b| {
        b.iter(|| merge(black_box(&sources), black_box(&transforms)).unwrap());
    });
}

fn bench_merge_medium(c: &mut Criterion) {
    let (sources, transforms) = brick_grid(256);
    c.bench_function("merge_256_bricks", |b| {
        b.iter(|| merge(black_box(&sources), black_box(&transforms)).unwrap());
    });
}

fn bench_merge_large(c: &mut Criterion) {
    let (sources, transforms) = brick_grid(4096);
    c.bench_function("merge_4096_bricks", |b| {
        b.iter(|| merge(black_box(&sources), black_box(&transforms)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_generate_brick,
    bench_generate_quad,
    bench_merge_small,
    bench_merge_medium,
    bench_merge_large,
);
criterion_main!(benches);
