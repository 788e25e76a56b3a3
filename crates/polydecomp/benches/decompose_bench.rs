//! Criterion benchmarks for the rotation search on star polygons.
//! Focus sizes: n in {8, 16, 32, 64}.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p polydecomp

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use polydecomp::api::{
    decompose, decompose_with, draw_star_polygon, extract, NoopObserver, Polygon, Residual,
    SearchCfg, StarCfg, StarReplay, VertexCount,
};

fn star(n: usize, seed: u64) -> Polygon {
    let cfg = StarCfg {
        vertex_count: VertexCount::Fixed(n),
        ..StarCfg::default()
    };
    draw_star_polygon(cfg, StarReplay { seed, index: 0 })
        .expect("star sampler produced colliding coordinates")
}

fn bench_decompose(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompose");
    for &n in &[8usize, 16, 32, 64] {
        group.bench_with_input(BenchmarkId::new("search_dedup", n), &n, |b, &n| {
            let poly = star(n, 41);
            b.iter(|| {
                let _res = decompose(&poly);
            })
        });

        group.bench_with_input(BenchmarkId::new("search_all_offsets", n), &n, |b, &n| {
            let poly = star(n, 41);
            let cfg = SearchCfg {
                dedup_rotations: false,
            };
            b.iter(|| {
                let _res = decompose_with(&poly, cfg, &mut NoopObserver);
            })
        });

        group.bench_with_input(BenchmarkId::new("first_extraction", n), &n, |b, &n| {
            let base = Residual::from_polygon(&star(n, 42));
            b.iter_batched(
                || base.clone(),
                |mut r| {
                    let _part = extract(&mut r, 0, 1);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_decompose);
criterion_main!(benches);
