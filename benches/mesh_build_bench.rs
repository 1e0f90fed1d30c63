//! Benchmarks for the mesh-construction pipeline.
//!
//! Run with: `cargo bench --bench mesh_build_bench`
//!
//! Measures the full build on fully occupied and porous grids of
//! increasing resolution.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hexmesh_rs::{MeshBuilder, MeshOptions, VoxelGrid};

/// Deterministic porous occupancy: roughly 4 of 5 voxels fluid, with
/// enough solid scattered through the block to exercise the connectivity
/// filter and the walls patch.
fn porous_grid(n: usize) -> VoxelGrid {
    let data: Vec<u8> = (0..n * n * n)
        .map(|i| u8::from((i * 2_654_435_761_usize) % 5 != 0))
        .collect();
    VoxelGrid::new(data, n, n, n).unwrap()
}

fn bench_full_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_build");

    for n in [8, 16, 32] {
        let filled = VoxelGrid::filled(n, n, n);
        group.bench_with_input(BenchmarkId::new("filled", n), &filled, |b, grid| {
            b.iter(|| {
                let mesh = MeshBuilder::new(black_box(grid), MeshOptions::default())
                    .build()
                    .unwrap();
                black_box(mesh.n_faces())
            })
        });

        let porous = porous_grid(n);
        group.bench_with_input(BenchmarkId::new("porous", n), &porous, |b, grid| {
            b.iter(|| {
                let mesh = MeshBuilder::new(black_box(grid), MeshOptions::default())
                    .build()
                    .unwrap();
                black_box(mesh.n_faces())
            })
        });
    }

    group.finish();
}

fn bench_resample(c: &mut Criterion) {
    let grid = porous_grid(64);
    c.bench_function("resample_64_to_32", |b| {
        b.iter(|| black_box(&grid).resample(32).unwrap())
    });
}

criterion_group!(benches, bench_full_build, bench_resample);
criterion_main!(benches);
